//! Cisco NX-OS.
use std::fmt;
use std::sync::Arc;

use onboard_core::RawRow;

use crate::facts::{ImportFacts, OnboardingFacts};
use crate::interfaces::NXOS_TYPE_RULES;
use crate::normalizer::{CommandRows, VendorNormalizer};

use super::{apply_switchport, clean, collect_interfaces, find_by_address, first_row, rows, serial_of};

/// Extrae el PID desde las filas de `show inventory`.
pub type InventoryPidHook = Arc<dyn Fn(&[RawRow]) -> Option<String> + Send + Sync>;

/// Sin hook, el tipo de dispositivo sale de `platform` en `show version`; el
/// template de `show inventory` de NX-OS no da un PID fiable.
#[derive(Clone, Default)]
pub struct NxosNormalizer {
    inventory_pid: Option<InventoryPidHook>,
}

impl NxosNormalizer {
    pub fn with_inventory_pid(hook: InventoryPidHook) -> Self {
        Self { inventory_pid: Some(hook) }
    }
}

impl fmt::Debug for NxosNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NxosNormalizer")
         .field("inventory_pid", &self.inventory_pid.is_some())
         .finish()
    }
}

impl VendorNormalizer for NxosNormalizer {
    fn family(&self) -> &'static str {
        "nxos"
    }

    fn normalize_onboarding(&self, host_address: &str, raw: &CommandRows) -> OnboardingFacts {
        let mut facts = OnboardingFacts::default();
        if let Some(version) = first_row(raw, "show version") {
            facts.device_type = clean(version.platform.as_ref());
            facts.hostname = clean(version.hostname.as_ref());
            facts.serial = serial_of(version);
        }
        if let Some(hook) = &self.inventory_pid {
            if let Some(pid) = hook(rows(raw, "show inventory")) {
                facts.device_type = Some(pid);
            }
        }
        if let Some(mgmt) = find_by_address(rows(raw, "show interface"), host_address, |r| r.ip_address.as_deref()) {
            facts.mgmt_interface = clean(mgmt.interface.as_ref());
            facts.mask_length = clean(mgmt.prefix_length.as_ref());
        }
        facts
    }

    fn normalize_import(&self, raw: &CommandRows) -> ImportFacts {
        let mut interfaces = collect_interfaces(rows(raw, "show interface"), NXOS_TYPE_RULES, true);
        apply_switchport(&mut interfaces, rows(raw, "show interface switchport"));
        ImportFacts { serial: first_row(raw, "show version").and_then(serial_of),
                      interfaces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::InterfaceType;

    fn input() -> CommandRows {
        let mut raw = CommandRows::new();
        raw.insert("show version".into(),
                   vec![RawRow { hostname: Some("n9k-1".into()),
                                 platform: Some("N9K-C93180YC-EX".into()),
                                 serial_number: Some("SAL1234".into()),
                                 ..Default::default() }]);
        raw.insert("show inventory".into(),
                   vec![RawRow { name: Some("Chassis".into()),
                                 pid: Some("N9K-C93180YC-EX-CHASSIS".into()),
                                 ..Default::default() }]);
        raw.insert("show interface".into(),
                   vec![RawRow { interface: Some("mgmt0".into()),
                                 ip_address: Some("192.0.2.5".into()),
                                 prefix_length: Some("24".into()),
                                 hardware_type: Some("Ethernet".into()),
                                 link_status: Some("up".into()),
                                 ..Default::default() },
                        RawRow { interface: Some("Eth1/1".into()),
                                 hardware_type: Some("100/1000/10000 Ethernet".into()),
                                 link_status: Some("up".into()),
                                 ..Default::default() },
                        RawRow { interface: Some("Vlan20".into()),
                                 hardware_type: Some("EtherSVI".into()),
                                 ..Default::default() }]);
        raw
    }

    #[test]
    fn device_type_comes_from_version_without_hook() {
        let facts = NxosNormalizer::default().normalize_onboarding("192.0.2.5", &input());
        assert_eq!(facts.device_type.as_deref(), Some("N9K-C93180YC-EX"));
        assert_eq!(facts.serial.as_deref(), Some("SAL1234"));
        assert_eq!(facts.mgmt_interface.as_deref(), Some("mgmt0"));
        assert_eq!(facts.mask_length.as_deref(), Some("24"));
    }

    #[test]
    fn inventory_hook_overrides_device_type() {
        let hook: InventoryPidHook = Arc::new(|rows: &[RawRow]| {
            rows.iter()
                .find(|r| r.name.as_deref() == Some("Chassis"))
                .and_then(|r| r.pid.clone())
        });
        let facts = NxosNormalizer::with_inventory_pid(hook).normalize_onboarding("192.0.2.5", &input());
        assert_eq!(facts.device_type.as_deref(), Some("N9K-C93180YC-EX-CHASSIS"));
    }

    #[test]
    fn import_types() {
        let facts = NxosNormalizer::default().normalize_import(&input());
        assert_eq!(facts.interfaces["Ethernet1/1"].kind, InterfaceType::Base10GXSfpp);
        assert_eq!(facts.interfaces["Vlan20"].kind, InterfaceType::Virtual);
        assert_eq!(facts.interfaces["mgmt0"].kind, InterfaceType::Other);
    }
}
