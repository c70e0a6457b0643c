use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipo de trabajo que determina el set de comandos por plataforma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Primer descubrimiento y registro de un dispositivo.
    DeviceOnboarding,
    /// Refresco/reconciliación de dispositivos ya conocidos.
    NetworkImport,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeviceOnboarding => "device_onboarding",
            Self::NetworkImport => "network_importer",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
