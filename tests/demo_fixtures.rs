use std::collections::BTreeMap;
use std::sync::Arc;

use netonboard_rust::{run_network_import, run_onboarding, AppConfig, HostReport, OnboardingInput};
use onboard_core::{DeviceRecord, MemoryLogger, ScriptedExecutor};

const FIXTURE: &str = include_str!("../demos/fixture.json");
const TARGETS: &str = include_str!("../demos/targets.json");
const DEVICES: &str = include_str!("../demos/devices.json");

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn demo_onboarding_runs_end_to_end() {
    let executor = Arc::new(ScriptedExecutor::from_json_str(FIXTURE).unwrap());
    let input: OnboardingInput = serde_json::from_str(TARGETS).unwrap();

    let report = run_onboarding(input, executor, &AppConfig::default(), Arc::new(MemoryLogger::new())).await
                                                                                                     .unwrap();

    assert_eq!(report.hosts.len(), 4);
    assert_eq!(report.collected(), 3);
    let nxos = report.host("10.0.0.2").and_then(HostReport::facts).and_then(|f| f.as_onboarding()).unwrap();
    assert_eq!(nxos.device_type.as_deref(), Some("N9K-C93180YC-EX"));
    assert_eq!(nxos.mgmt_interface.as_deref(), Some("mgmt0"));
    let junos = report.host("10.0.0.3").and_then(HostReport::facts).and_then(|f| f.as_onboarding()).unwrap();
    assert_eq!(junos.serial.as_deref(), Some("VM5F1A"));
    assert_eq!(junos.mask_length.as_deref(), Some("24"));
    assert!(report.host("10.0.0.4").unwrap().is_failed());
}

#[tokio::test]
async fn demo_import_runs_end_to_end() {
    let executor = Arc::new(ScriptedExecutor::from_json_str(FIXTURE).unwrap());
    let records: Vec<DeviceRecord> = serde_json::from_str(DEVICES).unwrap();

    let report = run_network_import(records, executor, &AppConfig::default(), Arc::new(MemoryLogger::new()), &BTreeMap::new()).await
                                                                                                                              .unwrap();

    let edge = report.host("10.0.0.1").and_then(HostReport::facts).and_then(|f| f.as_import()).unwrap();
    assert_eq!(edge.interfaces.len(), 2);
    assert_eq!(edge.interfaces["GigabitEthernet0/1"].access_vlan.as_deref(), Some("10"));
    assert!(report.host("10.0.0.2").is_some_and(|h| !h.is_failed()));
    assert!(report.host("10.0.0.9").unwrap().is_failed());
}
