// errors.rs
use thiserror::Error;

/// Errores de normalización de resultados compilados.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("no normalizer registered for platform `{0}`")]
    UnknownPlatform(String),

    #[error("host {address} failed before normalization: {reason}")]
    HostFailed { address: String, reason: String },

    #[error("no platform known for host {0}")]
    MissingHost(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for NormalizeError {
    fn from(e: serde_json::Error) -> Self {
        NormalizeError::Serialization(e.to_string())
    }
}
