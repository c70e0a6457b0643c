//! Configuración central de la aplicación.
//! Carga variables de entorno (.env opcional) y expone una estructura
//! inmutable (`CONFIG`). El núcleo nunca lee el entorno: recibe un
//! `OrchestratorConfig` derivado de aquí.
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use onboard_core::constants::{COMMAND_READ_TIMEOUT_SECS, DEFAULT_MAX_WORKERS, DEFAULT_SSH_PORT};
use onboard_core::OrchestratorConfig;

pub const ENV_MAX_WORKERS: &str = "ONBOARD_MAX_WORKERS";
pub const ENV_COMMAND_TIMEOUT_SECS: &str = "ONBOARD_COMMAND_TIMEOUT_SECS";
pub const ENV_DEFAULT_PORT: &str = "ONBOARD_DEFAULT_PORT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Hosts atendidos en paralelo.
    pub max_workers: usize,
    /// Timeout por comando, en segundos.
    pub command_timeout_secs: u64,
    /// Puerto de conexión cuando la entrada no trae uno.
    pub default_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { max_workers: DEFAULT_MAX_WORKERS,
               command_timeout_secs: COMMAND_READ_TIMEOUT_SECS,
               default_port: DEFAULT_SSH_PORT }
    }
}

impl AppConfig {
    /// Lee `.env` (si existe) y el entorno del proceso.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    /// Valores vacíos, inválidos o cero caen al default con un warning.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        Self { max_workers: positive_or(&lookup, ENV_MAX_WORKERS, defaults.max_workers),
               command_timeout_secs: positive_or(&lookup, ENV_COMMAND_TIMEOUT_SECS, defaults.command_timeout_secs),
               default_port: positive_or(&lookup, ENV_DEFAULT_PORT, defaults.default_port) }
    }

    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig { max_workers: self.max_workers,
                             command_timeout: Duration::from_secs(self.command_timeout_secs) }
    }
}

fn positive_or<F, T>(lookup: &F, key: &str, default: T) -> T
    where F: Fn(&str) -> Option<String>,
          T: FromStr + PartialOrd + Default + Display + Copy
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => value,
        _ => {
            log::warn!("{key}=`{raw}` is not a positive number, using {default}");
            default
        }
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
