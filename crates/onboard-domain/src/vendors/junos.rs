//! Juniper JunOS.
//!
//! La dirección de la interfaz viene en `local` y la máscara dentro de
//! `destination` (`10.0.0.0/24`).
use onboard_core::RawRow;

use crate::facts::{ImportFacts, OnboardingFacts};
use crate::interfaces::JUNOS_TYPE_RULES;
use crate::normalizer::{CommandRows, VendorNormalizer};

use super::{clean, collect_interfaces, find_by_address, first_row, rows, serial_of};

#[derive(Debug, Clone, Copy, Default)]
pub struct JunosNormalizer;

impl JunosNormalizer {
    /// `show version`; si no trae serial, la fila `Chassis` de
    /// `show chassis hardware`.
    fn serial(raw: &CommandRows) -> Option<String> {
        if let Some(serial) = first_row(raw, "show version").and_then(serial_of) {
            return Some(serial);
        }
        rows(raw, "show chassis hardware").iter()
                                          .find(|r| r.name.as_deref().map(str::trim) == Some("Chassis"))
                                          .and_then(serial_of)
    }
}

fn mask_from_destination(row: &RawRow) -> Option<String> {
    row.destination
       .as_deref()
       .and_then(|d| d.split_once('/'))
       .map(|(_, mask)| mask.trim().to_string())
       .filter(|mask| !mask.is_empty())
}

impl VendorNormalizer for JunosNormalizer {
    fn family(&self) -> &'static str {
        "junos"
    }

    fn normalize_onboarding(&self, host_address: &str, raw: &CommandRows) -> OnboardingFacts {
        let mut facts = OnboardingFacts::default();
        if let Some(version) = first_row(raw, "show version") {
            facts.device_type = clean(version.model.as_ref());
            facts.hostname = clean(version.hostname.as_ref());
        }
        facts.serial = Self::serial(raw);
        if let Some(mgmt) = find_by_address(rows(raw, "show interfaces"), host_address, |r| r.local.as_deref()) {
            facts.mgmt_interface = clean(mgmt.interface.as_ref());
            facts.mask_length = mask_from_destination(mgmt);
        }
        facts
    }

    fn normalize_import(&self, raw: &CommandRows) -> ImportFacts {
        ImportFacts { serial: Self::serial(raw),
                      interfaces: collect_interfaces(rows(raw, "show interfaces"), JUNOS_TYPE_RULES, false) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::InterfaceType;

    fn interfaces() -> Vec<RawRow> {
        vec![RawRow { interface: Some("ge-0/0/0.0".into()),
                      local: Some("172.16.1.1".into()),
                      destination: Some("172.16.1.0/30".into()),
                      link_status: Some("up".into()),
                      ..Default::default() },
             RawRow { interface: Some("fxp0.0".into()),
                      local: Some("10.10.10.2".into()),
                      destination: Some("10.10.10.0/24".into()),
                      link_status: Some("up".into()),
                      ..Default::default() },
             RawRow { interface: Some("ae0".into()),
                      link_status: Some("down".into()),
                      ..Default::default() }]
    }

    fn raw(version: RawRow) -> CommandRows {
        let mut raw = CommandRows::new();
        raw.insert("show version".into(), vec![version]);
        raw.insert("show chassis hardware".into(),
                   vec![RawRow { name: Some("Midplane".into()),
                                 serial_number: Some("MID1".into()),
                                 ..Default::default() },
                        RawRow { name: Some("Chassis".into()),
                                 serial_number: Some("JN11AB".into()),
                                 ..Default::default() }]);
        raw.insert("show interfaces".into(), interfaces());
        raw
    }

    #[test]
    fn mask_is_split_from_destination() {
        let version = RawRow { hostname: Some("vmx1".into()),
                               model: Some("vmx".into()),
                               ..Default::default() };
        let facts = JunosNormalizer.normalize_onboarding("10.10.10.2", &raw(version));
        assert_eq!(facts.device_type.as_deref(), Some("vmx"));
        assert_eq!(facts.mgmt_interface.as_deref(), Some("fxp0.0"));
        assert_eq!(facts.mask_length.as_deref(), Some("24"));
    }

    #[test]
    fn serial_prefers_version_then_chassis_row() {
        let with_serial = RawRow { serial: vec!["VERSION-SN".into()],
                                   ..Default::default() };
        assert_eq!(JunosNormalizer.normalize_onboarding("10.10.10.2", &raw(with_serial)).serial.as_deref(),
                   Some("VERSION-SN"));
        assert_eq!(JunosNormalizer.normalize_onboarding("10.10.10.2", &raw(RawRow::default())).serial.as_deref(),
                   Some("JN11AB"));
        assert_eq!(JunosNormalizer.normalize_onboarding("10.10.10.2", &CommandRows::new()).serial, None);
    }

    #[test]
    fn destination_without_prefix_does_not_crash() {
        let mut input = CommandRows::new();
        input.insert("show interfaces".into(),
                     vec![RawRow { interface: Some("lo0.0".into()),
                                   local: Some("10.255.0.1".into()),
                                   destination: Some("Unspecified".into()),
                                   ..Default::default() }]);
        let facts = JunosNormalizer.normalize_onboarding("10.255.0.1", &input);
        assert_eq!(facts.mgmt_interface.as_deref(), Some("lo0.0"));
        assert_eq!(facts.mask_length, None);
    }

    #[test]
    fn import_keeps_junos_names() {
        let facts = JunosNormalizer.normalize_import(&raw(RawRow::default()));
        assert_eq!(facts.serial.as_deref(), Some("JN11AB"));
        assert_eq!(facts.interfaces["ae0"].kind, InterfaceType::Lag);
        assert_eq!(facts.interfaces["ge-0/0/0.0"].kind, InterfaceType::Base1000XSfp);
        assert!(facts.interfaces["fxp0.0"].enabled);
    }
}
