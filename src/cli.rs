//! CLI mínima sobre un ejecutor de fixtures JSON.
//!
//! `main-core onboard --fixture <file> (--targets <file> | --addresses <a,b> [--platform <p>] [--port <n>] [--secrets-group <id>])`
//! `main-core import --fixture <file> --devices <file> [--previous <report.json>]`
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use onboard_core::inventory::FlatTargets;
use onboard_core::{CommandExecutor, DeviceRecord, RunLogger, ScriptedExecutor};

use crate::config::AppConfig;
use crate::errors::JobError;
use crate::jobs::{run_network_import, run_onboarding, OnboardingInput};
use crate::report::JobReport;

pub const USAGE: &str = "usage:
  main-core onboard --fixture <file> (--targets <file> | --addresses <a,b> [--platform <p>] [--port <n>] [--secrets-group <id>]) [--verbose]
  main-core import --fixture <file> --devices <file> [--previous <report.json>] [--verbose]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// JSON con `OnboardingInput` (tabla o lista plana).
    File(PathBuf),
    Flat(FlatTargets),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Onboard { fixture: PathBuf, targets: Targets },
    Import { fixture: PathBuf, devices: PathBuf, previous: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
}

/// `--verbose`/`-v` en cualquier posición. Se consulta antes del parseo
/// completo para instalar el logger con el nivel correcto.
pub fn verbose_requested(args: &[String]) -> bool {
    args.iter().any(|a| a == "--verbose" || a == "-v")
}

fn usage(msg: impl Into<String>) -> JobError {
    JobError::Config(msg.into())
}

/// Parsea los argumentos (sin el nombre del binario). Los errores de uso son
/// `JobError::Config` (código de salida 2).
pub fn parse_args(args: &[String], default_port: u16) -> Result<CliArgs, JobError> {
    let (subcommand, rest) = args.split_first().ok_or_else(|| usage("missing subcommand"))?;
    let mut options: BTreeMap<&str, String> = BTreeMap::new();
    let mut i = 0;
    while i < rest.len() {
        let flag = rest[i].as_str();
        match flag {
            "--verbose" | "-v" => {}
            "--fixture" | "--targets" | "--addresses" | "--platform" | "--port" | "--secrets-group" | "--devices" | "--previous" => {
                i += 1;
                let value = rest.get(i).ok_or_else(|| usage(format!("{flag} needs a value")))?;
                options.insert(flag, value.clone());
            }
            other => return Err(usage(format!("unknown option `{other}`"))),
        }
        i += 1;
    }

    let fixture = options.remove("--fixture")
                         .map(PathBuf::from)
                         .ok_or_else(|| usage("--fixture is required"))?;
    let command = match subcommand.as_str() {
        "onboard" => {
            let targets = match (options.remove("--targets"), options.remove("--addresses")) {
                (Some(file), None) => Targets::File(PathBuf::from(file)),
                (None, Some(addresses)) => {
                    let port = match options.remove("--port") {
                        Some(raw) => raw.parse::<u16>()
                                        .map_err(|_| usage(format!("--port `{raw}` is not a valid port")))?,
                        None => default_port,
                    };
                    Targets::Flat(FlatTargets { addresses,
                                                port,
                                                secrets_group: options.remove("--secrets-group"),
                                                platform: options.remove("--platform") })
                }
                _ => return Err(usage("onboard needs exactly one of --targets or --addresses")),
            };
            Command::Onboard { fixture, targets }
        }
        "import" => {
            let devices = options.remove("--devices")
                                 .map(PathBuf::from)
                                 .ok_or_else(|| usage("--devices is required"))?;
            Command::Import { fixture,
                              devices,
                              previous: options.remove("--previous").map(PathBuf::from) }
        }
        other => return Err(usage(format!("unknown subcommand `{other}`"))),
    };
    if let Some(flag) = options.keys().next() {
        return Err(usage(format!("{flag} does not apply to `{subcommand}`")));
    }
    Ok(CliArgs { command })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, JobError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn fixture_executor(path: &Path) -> Result<Arc<dyn CommandExecutor>, JobError> {
    let text = std::fs::read_to_string(path)?;
    Ok(Arc::new(ScriptedExecutor::from_json_str(&text)?))
}

/// Ejecuta el comando y devuelve el reporte del job.
pub async fn execute(command: Command, config: &AppConfig, logger: Arc<dyn RunLogger>) -> Result<JobReport, JobError> {
    match command {
        Command::Onboard { fixture, targets } => {
            let executor = fixture_executor(&fixture)?;
            let input = match targets {
                Targets::File(path) => read_json::<OnboardingInput>(&path)?,
                Targets::Flat(flat) => OnboardingInput::Flat(flat),
            };
            run_onboarding(input, executor, config, logger).await
        }
        Command::Import { fixture, devices, previous } => {
            let executor = fixture_executor(&fixture)?;
            let records: Vec<DeviceRecord> = read_json(&devices)?;
            if records.is_empty() {
                return Err(JobError::Input(format!("{} has no device records", devices.display())));
            }
            let previous = match previous {
                Some(path) => read_json::<JobReport>(&path)?.fingerprints(),
                None => BTreeMap::new(),
            };
            run_network_import(records, executor, config, logger, &previous).await
        }
    }
}
