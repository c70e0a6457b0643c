//! Capacidad de ejecución de comandos (colaborador externo).
//!
//! El núcleo sólo depende de este contrato: dado un host, un comando y su
//! parser hint, devolver filas estructuradas o un error. El transporte
//! (SSH, NETCONF, ...) queda fuera.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::inventory::HostDescriptor;
use crate::model::RawRow;
use crate::registry::CommandSpec;

mod scripted;

pub use scripted::{ScriptedExecutor, ScriptedFailure, ScriptedReply};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// El dispositivo no respondió dentro del timeout de lectura.
    #[error("read timeout")]
    Timeout,
    /// Error recuperable del comando (autenticación, parser, sintaxis).
    #[error("{0}")]
    Command(String),
    /// Fallo del plugin de conexión/inventario: aborta la corrida.
    #[error("{0}")]
    Infrastructure(String),
}

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Ejecuta `command` en `host`. `timeout` es el timeout de lectura que el
    /// transporte debería respetar; el orquestador además lo impone por fuera.
    async fn execute(&self, host: &HostDescriptor, command: &CommandSpec, timeout: Duration) -> Result<Vec<RawRow>, ExecutionError>;
}
