//! Registro por defecto de plataformas soportadas.
use super::types::{CommandRegistry, CommandSpec, OutputShape, ParserHint};
use crate::model::JobKind;

type Getter = (&'static str, &'static str, OutputShape);

const IOS_ONBOARDING: &[Getter] = &[("hostname", "show version", OutputShape::Single),
                                    ("serial", "show version", OutputShape::Single),
                                    ("device_type", "show inventory", OutputShape::Table),
                                    ("mgmt_interface", "show interfaces", OutputShape::Table),
                                    ("mask_length", "show interfaces", OutputShape::Table)];

const IOS_IMPORT: &[Getter] = &[("serial", "show version", OutputShape::Single),
                                ("interfaces", "show interfaces", OutputShape::Table),
                                ("vlans", "show vlan", OutputShape::Table),
                                ("interface_mode", "show interfaces switchport", OutputShape::Table)];

const NXOS_ONBOARDING: &[Getter] = &[("hostname", "show version", OutputShape::Single),
                                     ("serial", "show version", OutputShape::Single),
                                     ("device_type", "show version", OutputShape::Single),
                                     ("inventory", "show inventory", OutputShape::Table),
                                     ("mgmt_interface", "show interface", OutputShape::Table),
                                     ("mask_length", "show interface", OutputShape::Table)];

const NXOS_IMPORT: &[Getter] = &[("serial", "show version", OutputShape::Single),
                                 ("interfaces", "show interface", OutputShape::Table),
                                 ("vlans", "show vlan", OutputShape::Table),
                                 ("interface_mode", "show interface switchport", OutputShape::Table)];

const JUNOS_ONBOARDING: &[Getter] = &[("hostname", "show version", OutputShape::Single),
                                      ("device_type", "show version", OutputShape::Single),
                                      ("serial", "show version", OutputShape::Single),
                                      ("serial", "show chassis hardware", OutputShape::Table),
                                      ("mgmt_interface", "show interfaces", OutputShape::Table),
                                      ("mask_length", "show interfaces", OutputShape::Table)];

const JUNOS_IMPORT: &[Getter] = &[("serial", "show version", OutputShape::Single),
                                  ("serial", "show chassis hardware", OutputShape::Table),
                                  ("interfaces", "show interfaces", OutputShape::Table)];

fn register_all(registry: &mut CommandRegistry, platform: &str, job: JobKind, getters: &[Getter]) {
    for (getter, command, shape) in getters {
        registry.register(platform, job, getter, CommandSpec::new(*command, ParserHint::TextFsm, *shape));
    }
}

/// Registro con las plataformas soportadas (`cisco_ios`, `cisco_xe`,
/// `cisco_nxos`, `juniper_junos`) y el probe de descubrimiento para
/// onboarding.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for platform in ["cisco_ios", "cisco_xe"] {
        register_all(&mut registry, platform, JobKind::DeviceOnboarding, IOS_ONBOARDING);
        register_all(&mut registry, platform, JobKind::NetworkImport, IOS_IMPORT);
    }
    register_all(&mut registry, "cisco_nxos", JobKind::DeviceOnboarding, NXOS_ONBOARDING);
    register_all(&mut registry, "cisco_nxos", JobKind::NetworkImport, NXOS_IMPORT);
    register_all(&mut registry, "juniper_junos", JobKind::DeviceOnboarding, JUNOS_ONBOARDING);
    register_all(&mut registry, "juniper_junos", JobKind::NetworkImport, JUNOS_IMPORT);

    registry.with_discovery_probe(JobKind::DeviceOnboarding,
                                  vec![CommandSpec::new("show version", ParserHint::Raw, OutputShape::Text)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ios_onboarding_runs_three_commands_in_order() {
        let spec = default_registry().commands_for("cisco_ios", JobKind::DeviceOnboarding).unwrap();
        let names: Vec<&str> = spec.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(names, vec!["show version", "show inventory", "show interfaces"]);
    }

    #[test]
    fn junos_onboarding_includes_chassis_hardware_for_serial() {
        let spec = default_registry().commands_for("juniper_junos", JobKind::DeviceOnboarding).unwrap();
        assert!(spec.iter().any(|c| c.command == "show chassis hardware"));
        assert_eq!(spec.len(), 3);
    }

    #[test]
    fn every_platform_supports_both_jobs() {
        let registry = default_registry();
        let platforms: Vec<String> = registry.platforms().map(String::from).collect();
        assert_eq!(platforms.len(), 4);
        for platform in platforms {
            assert!(registry.commands_for(&platform, JobKind::DeviceOnboarding).is_ok());
            assert!(registry.commands_for(&platform, JobKind::NetworkImport).is_ok());
        }
    }

    #[test]
    fn import_has_no_discovery_probe() {
        assert!(default_registry().discovery_commands(JobKind::NetworkImport).is_none());
    }
}
