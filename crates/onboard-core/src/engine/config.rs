use std::time::Duration;

use tokio::sync::Semaphore;

use crate::constants::{COMMAND_READ_TIMEOUT_SECS, DEFAULT_MAX_WORKERS};

/// Parámetros del pool de ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Hosts atendidos en paralelo.
    pub max_workers: usize,
    /// Timeout por comando; vencido, sólo ese comando falla.
    pub command_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self { max_workers: DEFAULT_MAX_WORKERS,
               command_timeout: Duration::from_secs(COMMAND_READ_TIMEOUT_SECS) }
    }
}

impl OrchestratorConfig {
    /// Permisos del semáforo de workers, acotados a `[1, Semaphore::MAX_PERMITS]`.
    pub fn worker_permits(&self) -> usize {
        self.max_workers.clamp(1, Semaphore::MAX_PERMITS)
    }
}
