//! Job de onboarding.
//!
//! Los hosts sin plataforma corren primero la sonda de descubrimiento; los
//! que se reconocen se despachan de nuevo con su set completo y su entrada
//! reemplaza a la de la sonda.
use std::sync::Arc;

use chrono::Utc;
use onboard_core::inventory::{FlatTargets, TargetBatch, TargetTable};
use onboard_core::{default_registry, AttachPlatformCommands, CommandExecutor, CompiledResult, HostDescriptor, HostEntry, JobKind,
                   OnboardError, Orchestrator, RawRow, RunLogger, StaticInventory};
use onboard_domain::{default_normalizers, detect_platform};
use serde::{Deserialize, Serialize};

use super::{build_report, PlatformTracker};
use crate::config::AppConfig;
use crate::errors::JobError;
use crate::report::JobReport;

/// Parámetros ya parseados del job: lista plana o tabla por dirección.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OnboardingInput {
    Flat(FlatTargets),
    Table(TargetTable),
}

impl OnboardingInput {
    /// Sólo una lista plana vacía es un error de entrada; las direcciones
    /// inválidas viajan en `rejected` y se reportan como hosts fallidos.
    pub fn into_hosts(self) -> Result<TargetBatch, OnboardError> {
        match self {
            OnboardingInput::Flat(flat) => flat.into_hosts(),
            OnboardingInput::Table(table) => Ok(table.into_hosts()),
        }
    }
}

pub async fn run_onboarding(input: OnboardingInput,
                            executor: Arc<dyn CommandExecutor>,
                            config: &AppConfig,
                            logger: Arc<dyn RunLogger>)
                            -> Result<JobReport, JobError> {
    let started_at = Utc::now();
    let TargetBatch { hosts, rejected } = input.into_hosts()?;
    for target in &rejected {
        logger.error(&format!("{}: {}", target.address, target.error));
    }
    let tracker = Arc::new(PlatformTracker::default());
    let orchestrator = Orchestrator::builder(executor,
                                             StaticInventory::new(hosts.clone()),
                                             AttachPlatformCommands::new(Arc::new(default_registry()))).processor(tracker.clone())
                                                                                                       .logger(logger.clone())
                                                                                                       .config(config.orchestrator())
                                                                                                       .build();

    let mut compiled = orchestrator.run(JobKind::DeviceOnboarding).await?;

    let detected = resolve_discovered(&mut compiled, &hosts, logger.as_ref());
    if !detected.is_empty() {
        logger.info(&format!("run {}: dispatching {} discovered hosts", compiled.run_id, detected.len()));
        let second = orchestrator.run_hosts(detected, JobKind::DeviceOnboarding).await?;
        for (address, entry) in second.hosts {
            compiled.replace_host(address, entry);
        }
    }

    build_report(&compiled,
                 &tracker.snapshot(),
                 default_normalizers(),
                 None,
                 &rejected,
                 started_at,
                 logger.as_ref())
}

/// Detecta la plataforma de cada host en descubrimiento a partir de la salida
/// de la sonda. Devuelve los hosts reconocidos, ya con plataforma; los no
/// reconocidos quedan fallidos en `compiled`.
fn resolve_discovered(compiled: &mut CompiledResult, hosts: &[HostDescriptor], logger: &dyn RunLogger) -> Vec<HostDescriptor> {
    let mut detected = Vec::new();
    for host in hosts.iter().filter(|h| h.is_discovery()) {
        let address = host.address();
        let probe: Vec<RawRow> = match compiled.get(address) {
            Some(entry) if !entry.is_failed() => entry.successful_rows().into_values().flatten().collect(),
            _ => continue,
        };
        match detect_platform(&probe) {
            Some(platform) => {
                logger.info(&format!("{address}: detected platform {platform}"));
                detected.push(host.with_platform(platform));
            }
            None => {
                let error = OnboardError::UnsupportedPlatform(format!("{address} platform could not be detected"));
                logger.error(&format!("{address}: {error}"));
                compiled.replace_host(address, HostEntry::failed(error));
            }
        }
    }
    detected
}
