//! Taxonomía de errores del núcleo.
//!
//! Sólo `InfrastructureFailure` aborta una corrida completa; el resto se
//! recupera localmente como entradas del `CompiledResult`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum OnboardError {
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("command `{command}` timed out after {timeout_ms}ms")]
    CommandTimeout { command: String, timeout_ms: u64 },
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("infrastructure failure: {0}")]
    InfrastructureFailure(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl OnboardError {
    /// Indica si el error debe abortar la corrida completa.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InfrastructureFailure(_))
    }
}
