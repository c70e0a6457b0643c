//! Fila cruda devuelta por el colaborador de ejecución.
//!
//! Los parsers de texto estructurado producen diccionarios planos con claves
//! opcionales que varían por template. `RawRow` cierra ese conjunto: las
//! claves conocidas por los normalizadores son campos opcionales y cualquier
//! otra clave queda en `extra` sin interpretar.
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub hostname: Option<String>,
    /// Algunos templates devuelven el serial como lista (IOS), otros como string.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "one_or_many")]
    pub serial: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub pid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub prefix_length: Option<String>,
    /// JunOS: dirección local de la interfaz lógica.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub local: Option<String>,
    /// JunOS: red destino con longitud de máscara (`10.0.0.0/24`).
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub hardware_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub mtu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub link_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub admin_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub admin_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub access_vlan: Option<String>,
    /// Salida textual sin template (hint `Raw`).
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar")]
    pub output: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RawRow {
    /// Fila con sólo salida textual, como la devuelve un comando sin template.
    pub fn text(output: impl Into<String>) -> Self {
        Self { output: Some(output.into()),
               ..Default::default() }
    }

    /// Primer serial reportado, ignorando valores vacíos.
    pub fn first_serial(&self) -> Option<&str> {
        self.serial.iter().map(|s| s.trim()).find(|s| !s.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Scalar),
    Many(Vec<Scalar>),
}

// Los templates mezclan números y strings para el mismo campo (mtu, vlan).
fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where D: Deserializer<'de>
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where D: Deserializer<'de>
{
    let values = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s.into_string()],
        Some(OneOrMany::Many(v)) => v.into_iter().map(Scalar::into_string).collect(),
    };
    Ok(values.into_iter().filter(|s| !s.is_empty()).collect())
}
