//! Capacidad de normalización por familia de plataforma y su registro.
//!
//! Cada familia implementa `VendorNormalizer`; el registro mapea clave de
//! plataforma → familia. Añadir una plataforma es registrar una entrada, sin
//! tocar el despacho.
use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use onboard_core::{JobKind, RawRow};

use crate::errors::NormalizeError;
use crate::facts::{CanonicalFacts, ImportFacts, OnboardingFacts};
use crate::vendors::{IosNormalizer, JunosNormalizer, NxosNormalizer};

/// Filas de los comandos exitosos de un host, por nombre de comando. Un
/// comando fallido simplemente no aparece.
pub type CommandRows = IndexMap<String, Vec<RawRow>>;

/// Funciones puras sobre la salida agregada de un host. Nunca fallan: un
/// campo que no se puede extraer queda en `None`.
pub trait VendorNormalizer: Send + Sync {
    fn family(&self) -> &'static str;

    fn normalize_onboarding(&self, host_address: &str, raw: &CommandRows) -> OnboardingFacts;

    fn normalize_import(&self, raw: &CommandRows) -> ImportFacts;

    fn normalize(&self, job: JobKind, host_address: &str, raw: &CommandRows) -> CanonicalFacts {
        match job {
            JobKind::DeviceOnboarding => CanonicalFacts::Onboarding(self.normalize_onboarding(host_address, raw)),
            JobKind::NetworkImport => CanonicalFacts::Import(self.normalize_import(raw)),
        }
    }
}

#[derive(Clone, Default)]
pub struct NormalizerRegistry {
    by_platform: HashMap<String, Arc<dyn VendorNormalizer>>,
}

impl NormalizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registro con las familias incluidas: ios (cisco_ios, cisco_xe), nxos
    /// y junos.
    pub fn with_defaults() -> Self {
        let ios: Arc<dyn VendorNormalizer> = Arc::new(IosNormalizer);
        let mut registry = Self::new();
        registry.register("cisco_ios", ios.clone())
                .register("cisco_xe", ios)
                .register("cisco_nxos", Arc::new(NxosNormalizer::default()))
                .register("juniper_junos", Arc::new(JunosNormalizer));
        registry
    }

    pub fn register(&mut self, platform: impl Into<String>, normalizer: Arc<dyn VendorNormalizer>) -> &mut Self {
        self.by_platform.insert(platform.into(), normalizer);
        self
    }

    pub fn supports(&self, platform: &str) -> bool {
        self.by_platform.contains_key(platform)
    }

    pub fn for_platform(&self, platform: &str) -> Result<&dyn VendorNormalizer, NormalizeError> {
        self.by_platform
            .get(platform)
            .map(|n| n.as_ref())
            .ok_or_else(|| NormalizeError::UnknownPlatform(platform.to_string()))
    }
}

static DEFAULT_NORMALIZERS: Lazy<NormalizerRegistry> = Lazy::new(NormalizerRegistry::with_defaults);

/// Registro por defecto compartido, construido una sola vez.
pub fn default_normalizers() -> &'static NormalizerRegistry {
    &DEFAULT_NORMALIZERS
}
