//! Descriptor de host listo para conexión.
use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::PlatformCommandSpec;

/// Referencia opaca a un grupo de credenciales. El núcleo nunca la resuelve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialRef(pub String);

impl CredentialRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Bolsa de datos auxiliares del host. La completa el transform antes del
/// despacho y queda de sólo lectura después.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostData {
    /// Comandos resueltos para el job en curso (`None` = sin soporte).
    pub commands: Option<PlatformCommandSpec>,
    pub attributes: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostDescriptor {
    address: IpAddr,
    /// Clave única dentro de la corrida (forma canónica de `address`).
    key: String,
    name: Option<String>,
    platform: Option<String>,
    credentials: Option<CredentialRef>,
    port: u16,
    data: HostData,
}

impl HostDescriptor {
    pub(crate) fn new(address: IpAddr, platform: Option<String>, port: u16, credentials: Option<CredentialRef>) -> Self {
        Self { key: address.to_string(),
               address,
               name: None,
               platform,
               credentials,
               port,
               data: HostData::default() }
    }

    /// Dirección de conexión en forma canónica; es la clave del host en el
    /// `CompiledResult`.
    pub fn address(&self) -> &str {
        &self.key
    }

    pub fn ip(&self) -> IpAddr {
        self.address
    }

    /// Nombre del dispositivo si viene de un registro existente.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn credentials(&self) -> Option<&CredentialRef> {
        self.credentials.as_ref()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Sin plataforma: el host corre sólo el probe de descubrimiento.
    pub fn is_discovery(&self) -> bool {
        self.platform.is_none()
    }

    pub fn data(&self) -> &HostData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut HostData {
        &mut self.data
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Copia del descriptor con la plataforma fijada y la bolsa de datos
    /// vacía, lista para un nuevo transform.
    pub fn with_platform(&self, platform: impl Into<String>) -> Self {
        Self { platform: Some(platform.into()),
               data: HostData::default(),
               ..self.clone() }
    }
}
