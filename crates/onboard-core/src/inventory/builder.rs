//! Construcción de descriptores a partir de los parámetros ya parseados del
//! job (tabla por dirección o parámetros planos).
use std::net::IpAddr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::host::{CredentialRef, HostDescriptor};
use crate::constants::DEFAULT_SSH_PORT;
use crate::errors::OnboardError;

/// Construye un `HostDescriptor`. Una plataforma ausente (o vacía) deja el
/// host en modo descubrimiento.
pub fn build_host(address: &str, platform: Option<&str>, port: u16, credentials: Option<CredentialRef>) -> Result<HostDescriptor, OnboardError> {
    let trimmed = address.trim();
    let ip: IpAddr = trimmed.parse()
                            .map_err(|_| OnboardError::InvalidTarget(format!("`{trimmed}` is not an IP address")))?;
    if port == 0 {
        return Err(OnboardError::InvalidTarget(format!("{ip}: port must be greater than zero")));
    }
    let platform = platform.map(str::trim).filter(|p| !p.is_empty()).map(String::from);
    Ok(HostDescriptor::new(ip, platform, port, credentials))
}

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// Fila de la tabla por dirección.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEntry {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub secrets_group: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Entrada estructurada: dirección → {plataforma?, credenciales?, puerto}.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetTable(pub IndexMap<String, TargetEntry>);

impl TargetTable {
    /// Direcciones inválidas quedan en `rejected`; el resto se construye.
    pub fn into_hosts(self) -> TargetBatch {
        let mut batch = TargetBatch::default();
        for (address, entry) in self.0 {
            let host = build_host(&address,
                                  entry.platform.as_deref(),
                                  entry.port,
                                  entry.secrets_group.map(CredentialRef));
            batch.push(&address, host);
        }
        batch
    }
}

/// Entrada plana: lista de direcciones separadas por coma con parámetros
/// compartidos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTargets {
    pub addresses: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub secrets_group: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

impl FlatTargets {
    /// Sólo una lista sin ninguna dirección es un error; las direcciones
    /// inválidas quedan en `rejected`.
    pub fn into_hosts(self) -> Result<TargetBatch, OnboardError> {
        let compact: String = self.addresses.chars().filter(|c| !c.is_whitespace()).collect();
        let mut batch = TargetBatch::default();
        for address in compact.split(',').filter(|a| !a.is_empty()) {
            let host = build_host(address,
                                  self.platform.as_deref(),
                                  self.port,
                                  self.secrets_group.clone().map(CredentialRef));
            batch.push(address, host);
        }
        if batch.is_empty() {
            return Err(OnboardError::InvalidTarget("no addresses given".into()));
        }
        Ok(batch)
    }
}

/// Dirección de entrada que no pudo convertirse en host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTarget {
    /// Dirección tal como llegó (sin espacios).
    pub address: String,
    pub error: OnboardError,
}

/// Resultado de construir el inventario de un job: hosts válidos y
/// direcciones rechazadas, ambos en orden de entrada.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetBatch {
    pub hosts: Vec<HostDescriptor>,
    pub rejected: Vec<RejectedTarget>,
}

impl TargetBatch {
    fn push(&mut self, address: &str, host: Result<HostDescriptor, OnboardError>) {
        match host {
            Ok(host) => push_unique(&mut self.hosts, host),
            Err(error) => {
                let address = address.trim().to_string();
                if !self.rejected.iter().any(|r| r.address == address) {
                    self.rejected.push(RejectedTarget { address, error });
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.rejected.is_empty()
    }
}

// La dirección es clave única dentro de la corrida: gana la primera aparición.
fn push_unique(hosts: &mut Vec<HostDescriptor>, host: HostDescriptor) {
    if !hosts.iter().any(|h| h.address() == host.address()) {
        hosts.push(host);
    }
}
