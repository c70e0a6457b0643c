//! Normalización de interfaces: nombres, tipos y modo de switching.
use onboard_core::RawRow;

use crate::facts::{InterfaceMode, InterfaceType};

/// Abreviaturas de interfaz → nombre largo. Ordenadas de la más larga a la
/// más corta: gana la primera que aplique.
pub const INTERFACE_ABBREVIATIONS: &[(&str, &str)] = &[("TwentyFiveGigE", "TwentyFiveGigabitEthernet"),
                                                       ("HundredGigE", "HundredGigabitEthernet"),
                                                       ("FortyGigE", "FortyGigabitEthernet"),
                                                       ("TenGigE", "TenGigabitEthernet"),
                                                       ("GigE", "GigabitEthernet"),
                                                       ("Gig", "GigabitEthernet"),
                                                       ("Eth", "Ethernet"),
                                                       ("Twe", "TwentyFiveGigabitEthernet"),
                                                       ("Fa", "FastEthernet"),
                                                       ("Fo", "FortyGigabitEthernet"),
                                                       ("Gi", "GigabitEthernet"),
                                                       ("Hu", "HundredGigabitEthernet"),
                                                       ("Lo", "Loopback"),
                                                       ("Po", "Port-channel"),
                                                       ("Se", "Serial"),
                                                       ("Te", "TenGigabitEthernet"),
                                                       ("Tu", "Tunnel"),
                                                       ("Vl", "Vlan"),
                                                       ("Et", "Ethernet")];

/// Expande una abreviatura al nombre largo, una sola vez.
///
/// Un nombre que ya empieza por un nombre largo se devuelve tal cual, así
/// aplicar la función dos veces no vuelve a expandir. La abreviatura sólo
/// aplica si le sigue el número de puerto.
pub fn normalize_interface_name(name: &str) -> String {
    let name = name.trim();
    if INTERFACE_ABBREVIATIONS.iter().any(|(_, full)| name.starts_with(full)) {
        return name.to_string();
    }
    for (abbreviation, full) in INTERFACE_ABBREVIATIONS {
        if let Some(rest) = name.strip_prefix(abbreviation) {
            if rest.starts_with(|c: char| c.is_ascii_digit()) {
                return format!("{full}{rest}");
            }
        }
    }
    name.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    HardwareType,
    MediaType,
    /// Nombre ya normalizado de la interfaz.
    Name,
}

/// Criterio de coincidencia. `Exact` distingue mayúsculas; `Contains` y
/// `Prefix` no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    Exact(&'static str),
    Contains(&'static str),
    Prefix(&'static str),
}

impl Match {
    fn matches(&self, value: &str) -> bool {
        let lower = value.to_ascii_lowercase();
        match self {
            Match::Exact(expected) => value == *expected,
            Match::Contains(needle) => lower.contains(&needle.to_ascii_lowercase()),
            Match::Prefix(prefix) => lower.starts_with(&prefix.to_ascii_lowercase()),
        }
    }
}

/// Regla de inferencia de tipo: campo + criterio → tipo canónico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRule {
    pub field: RuleField,
    pub matcher: Match,
    pub kind: InterfaceType,
}

const fn rule(field: RuleField, matcher: Match, kind: InterfaceType) -> TypeRule {
    TypeRule { field, matcher, kind }
}

pub const IOS_TYPE_RULES: &[TypeRule] = &[rule(RuleField::HardwareType, Match::Exact("EtherChannel"), InterfaceType::Lag),
                                          rule(RuleField::HardwareType, Match::Exact("Ethernet SVI"), InterfaceType::Virtual),
                                          rule(RuleField::MediaType, Match::Exact("10/100/1000BaseTX"), InterfaceType::Base100Tx),
                                          rule(RuleField::Name, Match::Prefix("Loopback"), InterfaceType::Virtual),
                                          rule(RuleField::Name, Match::Prefix("Tunnel"), InterfaceType::Virtual)];

pub const NXOS_TYPE_RULES: &[TypeRule] = &[rule(RuleField::HardwareType, Match::Contains("Port-Channel"), InterfaceType::Lag),
                                           rule(RuleField::HardwareType, Match::Contains("EtherSVI"), InterfaceType::Virtual),
                                           rule(RuleField::Name, Match::Prefix("Vlan"), InterfaceType::Virtual),
                                           rule(RuleField::Name, Match::Prefix("loopback"), InterfaceType::Virtual),
                                           rule(RuleField::HardwareType, Match::Contains("10000 Ethernet"), InterfaceType::Base10GXSfpp),
                                           rule(RuleField::HardwareType, Match::Contains("1000 Ethernet"), InterfaceType::Base1000T)];

pub const JUNOS_TYPE_RULES: &[TypeRule] = &[rule(RuleField::Name, Match::Prefix("ae"), InterfaceType::Lag),
                                            rule(RuleField::Name, Match::Prefix("irb"), InterfaceType::Virtual),
                                            rule(RuleField::Name, Match::Prefix("vlan"), InterfaceType::Virtual),
                                            rule(RuleField::Name, Match::Prefix("lo"), InterfaceType::Virtual),
                                            rule(RuleField::Name, Match::Prefix("xe-"), InterfaceType::Base10GXSfpp),
                                            rule(RuleField::Name, Match::Prefix("ge-"), InterfaceType::Base1000XSfp)];

/// Primera regla que coincide; `Other` si ninguna.
pub fn infer_type(rules: &[TypeRule], row: &RawRow, normalized_name: &str) -> InterfaceType {
    rules.iter()
         .find(|r| {
             let value = match r.field {
                 RuleField::HardwareType => row.hardware_type.as_deref(),
                 RuleField::MediaType => row.media_type.as_deref(),
                 RuleField::Name => Some(normalized_name),
             };
             value.is_some_and(|v| r.matcher.matches(v))
         })
         .map(|r| r.kind)
         .unwrap_or_default()
}

/// `admin_mode` de `show interfaces switchport` → modo 802.1Q.
pub fn normalize_switchport_mode(admin_mode: &str) -> Option<InterfaceMode> {
    let mode = admin_mode.trim().to_ascii_lowercase();
    match mode.as_str() {
        "static access" | "access" => Some(InterfaceMode::Access),
        "trunk" => Some(InterfaceMode::Tagged),
        m if m.starts_with("dynamic") => Some(InterfaceMode::Tagged),
        _ => None,
    }
}
