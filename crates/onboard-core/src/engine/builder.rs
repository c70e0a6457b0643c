//! Builder del `Orchestrator`.
//!
//! Executor, inventario y transform son obligatorios; logger, processors
//! adicionales y configuración tienen defaults.
use std::sync::Arc;
use std::time::Duration;

use super::config::OrchestratorConfig;
use super::orchestrator::Orchestrator;
use crate::execution::CommandExecutor;
use crate::inventory::{HostTransform, InventorySource};
use crate::logging::{LogFacadeLogger, RunLogger};
use crate::processor::ResultProcessor;

pub struct OrchestratorBuilder<S: InventorySource> {
    executor: Arc<dyn CommandExecutor>,
    inventory: S,
    transform: Arc<dyn HostTransform>,
    processors: Vec<Arc<dyn ResultProcessor>>,
    logger: Option<Arc<dyn RunLogger>>,
    config: OrchestratorConfig,
}

impl<S: InventorySource> OrchestratorBuilder<S> {
    pub(super) fn new(executor: Arc<dyn CommandExecutor>, inventory: S, transform: Arc<dyn HostTransform>) -> Self {
        Self { executor,
               inventory,
               transform,
               processors: Vec::new(),
               logger: None,
               config: OrchestratorConfig::default() }
    }

    /// Añade un processor que observa la corrida junto al agregador.
    pub fn processor(mut self, processor: Arc<dyn ResultProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.config.max_workers = max_workers;
        self
    }

    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout = timeout;
        self
    }

    pub fn build(self) -> Orchestrator<S> {
        Orchestrator { executor: self.executor,
                       inventory: self.inventory,
                       transform: self.transform,
                       processors: self.processors,
                       logger: self.logger.unwrap_or_else(|| Arc::new(LogFacadeLogger::default())),
                       config: self.config }
    }
}
