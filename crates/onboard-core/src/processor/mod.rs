//! Observadores de la corrida (Result Processor/Aggregator).

mod aggregator;

pub use aggregator::ResultAggregator;

use crate::inventory::HostDescriptor;
use crate::model::TaskOutcome;

/// Recibe cada outcome a medida que se completa. Las llamadas llegan desde
/// varios workers a la vez: las implementaciones sincronizan su estado.
///
/// Contrato por host: `on_host_start` una vez, `on_task_complete` una vez
/// por tarea en orden de despacho, `on_host_complete` una vez al final.
pub trait ResultProcessor: Send + Sync {
    fn on_host_start(&self, _host: &HostDescriptor) {}

    fn on_task_complete(&self, host: &HostDescriptor, command_name: &str, outcome: &TaskOutcome);

    fn on_host_complete(&self, host: &HostDescriptor);
}
