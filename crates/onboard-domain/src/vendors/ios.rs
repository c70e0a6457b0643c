//! Cisco IOS / IOS-XE.
use crate::facts::{ImportFacts, OnboardingFacts};
use crate::interfaces::IOS_TYPE_RULES;
use crate::normalizer::{CommandRows, VendorNormalizer};

use super::{apply_switchport, clean, collect_interfaces, find_by_address, first_row, rows, serial_of};

#[derive(Debug, Clone, Copy, Default)]
pub struct IosNormalizer;

impl VendorNormalizer for IosNormalizer {
    fn family(&self) -> &'static str {
        "ios"
    }

    fn normalize_onboarding(&self, host_address: &str, raw: &CommandRows) -> OnboardingFacts {
        let mut facts = OnboardingFacts::default();
        if let Some(inventory) = first_row(raw, "show inventory") {
            facts.device_type = clean(inventory.pid.as_ref());
        }
        if let Some(version) = first_row(raw, "show version") {
            facts.hostname = clean(version.hostname.as_ref());
            facts.serial = serial_of(version);
        }
        if let Some(mgmt) = find_by_address(rows(raw, "show interfaces"), host_address, |r| r.ip_address.as_deref()) {
            facts.mgmt_interface = clean(mgmt.interface.as_ref());
            facts.mask_length = clean(mgmt.prefix_length.as_ref());
        }
        facts
    }

    fn normalize_import(&self, raw: &CommandRows) -> ImportFacts {
        let mut interfaces = collect_interfaces(rows(raw, "show interfaces"), IOS_TYPE_RULES, true);
        apply_switchport(&mut interfaces, rows(raw, "show interfaces switchport"));
        ImportFacts { serial: first_row(raw, "show version").and_then(serial_of),
                      interfaces }
    }
}
