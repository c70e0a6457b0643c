//! Fuentes de inventario inyectadas en el orquestador.
use std::collections::HashSet;
use std::net::IpAddr;

use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::builder::build_host;
use super::host::{CredentialRef, HostDescriptor};
use crate::constants::DEFAULT_SSH_PORT;
use crate::errors::OnboardError;

/// Proveedor de hosts para una corrida. Un error aquí es un fallo de
/// infraestructura: aborta la corrida completa.
pub trait InventorySource: Send + Sync {
    fn load(&self) -> Result<Vec<HostDescriptor>, OnboardError>;
}

/// Inventario fijo construido de antemano (onboarding).
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    hosts: Vec<HostDescriptor>,
}

impl StaticInventory {
    pub fn new(hosts: Vec<HostDescriptor>) -> Self {
        Self { hosts }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl InventorySource for StaticInventory {
    fn load(&self) -> Result<Vec<HostDescriptor>, OnboardError> {
        Ok(self.hosts.clone())
    }
}

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// Dispositivo ya existente, con plataforma y metadatos de conexión.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    pub primary_address: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub secrets_group: Option<String>,
}

/// Inventario a partir de registros de dispositivos (network import).
#[derive(Debug, Clone, Default)]
pub struct DeviceRecordInventory {
    records: Vec<DeviceRecord>,
}

impl DeviceRecordInventory {
    pub fn new(records: Vec<DeviceRecord>) -> Self {
        Self { records }
    }

    /// Registros cuya dirección primaria ya reclamó un registro anterior.
    /// `load` los omite: la dirección es la clave del host en la corrida.
    pub fn shadowed(&self) -> Vec<&DeviceRecord> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|record| match canonical_address(&record.primary_address) {
                Some(address) => !seen.insert(address),
                None => false,
            })
            .collect()
    }
}

fn canonical_address(address: &str) -> Option<String> {
    address.trim().parse::<IpAddr>().ok().map(|ip| ip.to_string())
}

impl InventorySource for DeviceRecordInventory {
    fn load(&self) -> Result<Vec<HostDescriptor>, OnboardError> {
        let mut hosts: Vec<HostDescriptor> = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let credentials = record.secrets_group.clone().map(CredentialRef);
            let host = build_host(&record.primary_address, record.platform.as_deref(), record.port, credentials)
                .map_err(|e| OnboardError::InfrastructureFailure(format!("inventory record `{}`: {e}", record.name)))?;
            if let Some(owner) = hosts.iter().find(|h| h.address() == host.address()) {
                error!(target: "onboard",
                       "inventory record `{}` skipped: {} already belongs to `{}`",
                       record.name,
                       host.address(),
                       owner.name().unwrap_or_default());
                continue;
            }
            let mut host = host.with_name(&record.name);
            host.data_mut().attributes.insert("device_name".into(), Value::String(record.name.clone()));
            hosts.push(host);
        }
        Ok(hosts)
    }
}
