//! Agregador del `CompiledResult`.
//!
//! Es el único dueño del mapa de resultados. `DashMap` serializa las
//! escrituras concurrentes por host; las llamadas de hosts distintos pueden
//! intercalarse en cualquier orden.
use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::ResultProcessor;
use crate::constants::DISPATCH_TASK;
use crate::inventory::HostDescriptor;
use crate::logging::RunLogger;
use crate::model::{CompiledResult, HostEntry, JobKind, TaskOutcome};

pub struct ResultAggregator {
    entries: DashMap<String, HostEntry>,
    logger: Arc<dyn RunLogger>,
}

impl ResultAggregator {
    pub fn new(logger: Arc<dyn RunLogger>) -> Self {
        Self { entries: DashMap::new(),
               logger }
    }

    /// Registra un outcome. Nunca falla: los errores se loguean y quedan
    /// registrados en la entrada del host.
    pub fn record(&self, address: &str, command_name: &str, outcome: &TaskOutcome) {
        if command_name == DISPATCH_TASK {
            if let Some(error) = outcome.error() {
                self.logger.error(&format!("{address}: {error}"));
                self.entries.insert(address.to_string(), HostEntry::failed(error.clone()));
            }
            return;
        }

        if let Some(error) = outcome.error() {
            self.logger.warn(&format!("{address}: `{command_name}` failed: {error}"));
        }
        let mut entry = self.entries.entry(address.to_string()).or_insert_with(HostEntry::empty);
        match entry.value_mut() {
            HostEntry::Commands { outcomes } => {
                outcomes.insert(command_name.to_string(), outcome.clone());
            }
            HostEntry::Failed { .. } => {
                self.logger.warn(&format!("{address}: ignoring `{command_name}` for a failed host"));
            }
        }
    }

    pub fn hosts_seen(&self) -> usize {
        self.entries.len()
    }

    /// Copia el estado actual a un `CompiledResult` ordenado por dirección.
    pub fn compile(&self, run_id: Uuid, job: JobKind) -> CompiledResult {
        let hosts: BTreeMap<String, HostEntry> = self.entries
                                                     .iter()
                                                     .map(|e| (e.key().clone(), e.value().clone()))
                                                     .collect();
        CompiledResult { run_id, job, hosts }
    }
}

impl ResultProcessor for ResultAggregator {
    fn on_task_complete(&self, host: &HostDescriptor, command_name: &str, outcome: &TaskOutcome) {
        self.record(host.address(), command_name, outcome);
    }

    fn on_host_complete(&self, host: &HostDescriptor) {
        // Un host sin comandos también deja su entrada: nunca se pierden hosts.
        let entry = self.entries.entry(host.address().to_string()).or_insert_with(HostEntry::empty);
        if !entry.is_failed() {
            let failed = entry.outcomes().filter(|o| o.failed()).count();
            let total = entry.outcomes().count();
            drop(entry);
            self.logger.info(&format!("{}: completed {}/{} commands", host.address(), total - failed, total));
        }
    }
}
