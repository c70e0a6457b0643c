//! Hechos canónicos por host.
//!
//! Los campos ausentes se serializan como `null` (nunca se omiten) para que
//! los consumidores vean siempre la misma forma.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::canonical::{sha256_hex, to_canonical_json};
use crate::errors::NormalizeError;

/// Hechos de onboarding: identidad del dispositivo e interfaz de gestión.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OnboardingFacts {
    pub device_type: Option<String>,
    pub hostname: Option<String>,
    pub serial: Option<String>,
    pub mgmt_interface: Option<String>,
    pub mask_length: Option<String>,
}

/// Tipo canónico de interfaz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterfaceType {
    #[serde(rename = "lag")]
    Lag,
    #[serde(rename = "virtual")]
    Virtual,
    #[serde(rename = "100base-tx")]
    Base100Tx,
    #[serde(rename = "1000base-t")]
    Base1000T,
    #[serde(rename = "1000base-x-sfp")]
    Base1000XSfp,
    #[serde(rename = "10gbase-x-sfpp")]
    Base10GXSfpp,
    #[default]
    #[serde(rename = "other")]
    Other,
}

impl InterfaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lag => "lag",
            Self::Virtual => "virtual",
            Self::Base100Tx => "100base-tx",
            Self::Base1000T => "1000base-t",
            Self::Base1000XSfp => "1000base-x-sfp",
            Self::Base10GXSfpp => "10gbase-x-sfpp",
            Self::Other => "other",
        }
    }
}

/// Modo 802.1Q de una interfaz de switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceMode {
    Access,
    Tagged,
    TaggedAll,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceFacts {
    pub mtu: Option<String>,
    #[serde(rename = "type")]
    pub kind: InterfaceType,
    pub media_type: Option<String>,
    pub hardware_type: Option<String>,
    pub description: Option<String>,
    pub mac_address: Option<String>,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<InterfaceMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_vlan: Option<String>,
}

/// Hechos de network import: serial e inventario de interfaces por nombre
/// canónico, en el orden reportado por el dispositivo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportFacts {
    pub serial: Option<String>,
    pub interfaces: IndexMap<String, InterfaceFacts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalFacts {
    Onboarding(OnboardingFacts),
    Import(ImportFacts),
}

impl CanonicalFacts {
    pub fn as_onboarding(&self) -> Option<&OnboardingFacts> {
        match self {
            Self::Onboarding(facts) => Some(facts),
            Self::Import(_) => None,
        }
    }

    pub fn as_import(&self) -> Option<&ImportFacts> {
        match self {
            Self::Import(facts) => Some(facts),
            Self::Onboarding(_) => None,
        }
    }

    /// sha256 de la forma canónica. No depende del orden de las interfaces.
    pub fn fingerprint(&self) -> Result<String, NormalizeError> {
        let value = serde_json::to_value(self)?;
        Ok(sha256_hex(&to_canonical_json(&value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn onboarding_facts_keep_empty_fields() {
        let value = serde_json::to_value(CanonicalFacts::Onboarding(OnboardingFacts::default())).unwrap();
        assert_eq!(value,
                   json!({"device_type": null, "hostname": null, "serial": null, "mgmt_interface": null, "mask_length": null}));
    }

    #[test]
    fn untagged_facts_deserialize_to_the_right_variant() {
        let import: CanonicalFacts = serde_json::from_value(json!({"serial": "X", "interfaces": {}})).unwrap();
        assert!(import.as_import().is_some());
        let onboarding: CanonicalFacts = serde_json::from_value(json!({"hostname": "sw1", "serial": "X",
                                                                       "device_type": null, "mgmt_interface": null,
                                                                       "mask_length": null})).unwrap();
        assert_eq!(onboarding.as_onboarding().and_then(|f| f.hostname.as_deref()), Some("sw1"));
    }

    #[test]
    fn interface_type_serializes_with_tag_names() {
        let facts = InterfaceFacts { kind: InterfaceType::Base100Tx,
                                     ..Default::default() };
        let value = serde_json::to_value(&facts).unwrap();
        assert_eq!(value["type"], json!("100base-tx"));
        assert_eq!(InterfaceType::default().as_str(), "other");
    }

    #[test]
    fn fingerprint_ignores_interface_order() {
        let a = InterfaceFacts { mtu: Some("1500".into()),
                                 ..Default::default() };
        let b = InterfaceFacts { kind: InterfaceType::Virtual,
                                 ..Default::default() };
        let mut first = ImportFacts::default();
        first.interfaces.insert("GigabitEthernet0/1".into(), a.clone());
        first.interfaces.insert("Vlan10".into(), b.clone());
        let mut second = ImportFacts::default();
        second.interfaces.insert("Vlan10".into(), b);
        second.interfaces.insert("GigabitEthernet0/1".into(), a);

        let f1 = CanonicalFacts::Import(first).fingerprint().unwrap();
        let f2 = CanonicalFacts::Import(second).fingerprint().unwrap();
        assert_eq!(f1, f2);
    }
}
