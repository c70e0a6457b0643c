//! Transform aplicado a cada host antes del despacho.
use std::sync::Arc;

use super::host::HostDescriptor;
use crate::model::JobKind;
use crate::registry::CommandRegistry;

/// Completa la bolsa de datos del host. Se inyecta en el orquestador; no hay
/// registro global de transforms.
pub trait HostTransform: Send + Sync {
    fn transform(&self, host: &mut HostDescriptor, job: JobKind);
}

impl<F> HostTransform for F where F: Fn(&mut HostDescriptor, JobKind) + Send + Sync
{
    fn transform(&self, host: &mut HostDescriptor, job: JobKind) {
        self(host, job)
    }
}

/// Resuelve en el registro los comandos de la plataforma del host (una
/// consulta por host y job). Hosts sin plataforma reciben el probe de
/// descubrimiento si el registro define uno; plataformas desconocidas quedan
/// sin comandos.
#[derive(Debug, Clone)]
pub struct AttachPlatformCommands {
    registry: Arc<CommandRegistry>,
}

impl AttachPlatformCommands {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }
}

impl HostTransform for AttachPlatformCommands {
    fn transform(&self, host: &mut HostDescriptor, job: JobKind) {
        let commands = match host.platform() {
            Some(platform) => self.registry.commands_for(platform, job).ok(),
            None => self.registry.discovery_commands(job),
        };
        host.data_mut().commands = commands;
    }
}
