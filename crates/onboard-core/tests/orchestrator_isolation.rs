//! Aislamiento de fallos por host y por comando en el orquestador.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::Level;
use onboard_core::constants::DISPATCH_TASK;
use onboard_core::execution::ScriptedFailure;
use onboard_core::{
    build_host, default_registry, AttachPlatformCommands, DeviceRecord, DeviceRecordInventory, HostDescriptor, JobKind, MemoryLogger,
    OnboardError, Orchestrator, RawRow, ResultProcessor, ScriptedExecutor, StaticInventory, TaskOutcome,
};

fn row() -> Vec<RawRow> {
    vec![RawRow::default()]
}

fn ios_script(executor: ScriptedExecutor, address: &str) -> ScriptedExecutor {
    executor.rows(address, "show version", row())
            .rows(address, "show inventory", row())
            .rows(address, "show interfaces", row())
}

fn transform() -> AttachPlatformCommands {
    AttachPlatformCommands::new(Arc::new(default_registry()))
}

/// Processor que registra el orden de llamadas por host.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<(String, String)>>,
}

impl Recorder {
    fn for_host(&self, address: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, _)| a == address)
            .map(|(_, c)| c.clone())
            .collect()
    }
}

impl ResultProcessor for Recorder {
    fn on_host_start(&self, host: &HostDescriptor) {
        self.calls.lock().unwrap().push((host.address().to_string(), "<start>".into()));
    }
    fn on_task_complete(&self, host: &HostDescriptor, command_name: &str, _outcome: &TaskOutcome) {
        self.calls.lock().unwrap().push((host.address().to_string(), command_name.to_string()));
    }
    fn on_host_complete(&self, host: &HostDescriptor) {
        self.calls.lock().unwrap().push((host.address().to_string(), "<done>".into()));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unknown_platform_fails_without_running_commands() {
    let executor = Arc::new(ios_script(ScriptedExecutor::new(), "10.0.0.1"));
    let hosts = vec![build_host("10.0.0.1", Some("cisco_ios"), 22, None).unwrap(),
                     build_host("10.0.0.2", Some("hp_comware"), 22, None).unwrap()];
    let logger = Arc::new(MemoryLogger::new());
    let orchestrator = Orchestrator::builder(executor.clone(), StaticInventory::new(hosts), transform()).logger(logger.clone())
                                                                                                      .build();

    let compiled = orchestrator.run(JobKind::DeviceOnboarding).await.expect("run should complete");

    assert_eq!(compiled.len(), 2);
    assert!(compiled.get("10.0.0.2").unwrap().is_failed());
    assert!(executor.calls_for("10.0.0.2").await.is_empty(), "no command may run for an unsupported platform");
    assert_eq!(compiled.get("10.0.0.1").unwrap().outcomes().count(), 3);
    assert!(logger.entries()
                  .iter()
                  .any(|e| e.level == Level::Error && e.message.contains("unsupported platform set: hp_comware")));
}

#[tokio::test]
async fn import_host_without_platform_fails_with_reason() {
    let executor = Arc::new(ScriptedExecutor::new());
    let records = vec![DeviceRecord { name: "legacy-1".into(),
                                      primary_address: "10.9.9.9".into(),
                                      platform: None,
                                      port: 22,
                                      secrets_group: None }];
    let orchestrator = Orchestrator::builder(executor.clone(), DeviceRecordInventory::new(records), transform()).logger(Arc::new(MemoryLogger::new()))
                                                                                                              .build();

    let compiled = orchestrator.run(JobKind::NetworkImport).await.unwrap();

    match compiled.get("10.9.9.9").unwrap() {
        onboard_core::HostEntry::Failed { error, reason } => {
            assert!(matches!(error, OnboardError::UnsupportedPlatform(_)));
            assert!(reason.contains("has no platform set"));
        }
        other => panic!("expected failed entry, got {other:?}"),
    }
    assert!(executor.calls().await.is_empty());
}

#[tokio::test]
async fn discovery_host_runs_only_the_probe() {
    let executor = Arc::new(ScriptedExecutor::new().rows("10.0.0.7", "show version", vec![RawRow::text("Cisco IOS Software")]));
    let hosts = vec![build_host("10.0.0.7", None, 22, None).unwrap()];
    let orchestrator = Orchestrator::builder(executor.clone(), StaticInventory::new(hosts), transform()).logger(Arc::new(MemoryLogger::new()))
                                                                                                      .build();

    let compiled = orchestrator.run(JobKind::DeviceOnboarding).await.unwrap();

    assert_eq!(executor.calls_for("10.0.0.7").await, vec!["show version".to_string()]);
    let outcome = compiled.get("10.0.0.7").unwrap().outcome("show version").unwrap();
    assert_eq!(outcome.parser_hint, Some(onboard_core::ParserHint::Raw));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn timeout_on_one_host_does_not_block_another() {
    let executor = ScriptedExecutor::new().delayed("10.0.0.1", "show version", Duration::from_millis(800), row())
                                          .rows("10.0.0.1", "show inventory", row())
                                          .rows("10.0.0.1", "show interfaces", row());
    let executor = Arc::new(ios_script(executor, "10.0.0.2"));
    let hosts = vec![build_host("10.0.0.1", Some("cisco_ios"), 22, None).unwrap(),
                     build_host("10.0.0.2", Some("cisco_ios"), 22, None).unwrap()];
    let orchestrator = Orchestrator::builder(executor.clone(), StaticInventory::new(hosts), transform()).logger(Arc::new(MemoryLogger::new()))
                                                                                                      .command_timeout(Duration::from_millis(100))
                                                                                                      .build();

    let compiled = orchestrator.run(JobKind::DeviceOnboarding).await.unwrap();

    let slow = compiled.get("10.0.0.1").unwrap();
    let version = slow.outcome("show version").unwrap();
    assert!(matches!(version.error(), Some(OnboardError::CommandTimeout { timeout_ms: 100, .. })));
    // el resto de comandos del host lento siguen corriendo
    assert!(!slow.outcome("show inventory").unwrap().failed());
    assert!(!slow.outcome("show interfaces").unwrap().failed());

    let fast = compiled.get("10.0.0.2").unwrap();
    assert_eq!(fast.outcomes().filter(|o| !o.failed()).count(), 3);
}

#[tokio::test]
async fn command_error_is_recorded_and_host_continues() {
    let executor = ScriptedExecutor::new().rows("10.0.0.1", "show version", row())
                                          .fail("10.0.0.1", "show inventory", ScriptedFailure::Command, "% Invalid input")
                                          .fail("10.0.0.1", "show interfaces", ScriptedFailure::Timeout, "read timeout");
    let orchestrator = Orchestrator::builder(Arc::new(executor),
                                             StaticInventory::new(vec![build_host("10.0.0.1", Some("cisco_ios"), 22, None).unwrap()]),
                                             transform()).logger(Arc::new(MemoryLogger::new()))
                                                         .build();

    let compiled = orchestrator.run(JobKind::DeviceOnboarding).await.unwrap();

    let entry = compiled.get("10.0.0.1").unwrap();
    assert!(matches!(entry.outcome("show inventory").unwrap().error(), Some(OnboardError::CommandFailed(m)) if m == "% Invalid input"));
    assert!(matches!(entry.outcome("show interfaces").unwrap().error(), Some(OnboardError::CommandTimeout { .. })));
    assert!(!entry.is_failed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn infrastructure_failure_aborts_the_run_and_logs_once() {
    let executor = ScriptedExecutor::new().fail("10.0.0.1", "show version", ScriptedFailure::Infrastructure, "connection plugin crashed");
    let executor = ios_script(executor, "10.0.0.2");
    let hosts = vec![build_host("10.0.0.1", Some("cisco_ios"), 22, None).unwrap(),
                     build_host("10.0.0.2", Some("cisco_ios"), 22, None).unwrap()];
    let logger = Arc::new(MemoryLogger::new());
    let orchestrator = Orchestrator::builder(Arc::new(executor), StaticInventory::new(hosts), transform()).logger(logger.clone())
                                                                                                        .build();

    let err = orchestrator.run(JobKind::DeviceOnboarding).await.unwrap_err();

    assert!(err.is_fatal());
    assert!(err.to_string().contains("connection plugin crashed"));
    let aborted = logger.entries().iter().filter(|e| e.message.contains("aborted")).count();
    assert_eq!(aborted, 1);
}

#[tokio::test]
async fn inventory_failure_is_returned_as_error_value() {
    let records = vec![DeviceRecord { name: "bad".into(),
                                      primary_address: "999.1.1.1".into(),
                                      platform: Some("cisco_ios".into()),
                                      port: 22,
                                      secrets_group: None }];
    let logger = Arc::new(MemoryLogger::new());
    let orchestrator = Orchestrator::builder(Arc::new(ScriptedExecutor::new()), DeviceRecordInventory::new(records), transform()).logger(logger.clone())
                                                                                                                               .build();

    let err = orchestrator.run(JobKind::NetworkImport).await.unwrap_err();

    assert!(matches!(err, OnboardError::InfrastructureFailure(_)));
    assert_eq!(logger.count(Level::Error), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn processors_see_outcomes_in_registry_order_per_host() {
    let mut executor = ScriptedExecutor::new();
    let mut hosts = Vec::new();
    for i in 1..=6 {
        let address = format!("10.0.1.{i}");
        executor = ios_script(executor, &address);
        hosts.push(build_host(&address, Some("cisco_xe"), 22, None).unwrap());
    }
    hosts.push(build_host("10.0.1.99", Some("arista_eos"), 22, None).unwrap());
    let recorder = Arc::new(Recorder::default());
    let orchestrator = Orchestrator::builder(Arc::new(executor), StaticInventory::new(hosts), transform()).logger(Arc::new(MemoryLogger::new()))
                                                                                                        .processor(recorder.clone())
                                                                                                        .max_workers(3)
                                                                                                        .build();

    let compiled = orchestrator.run(JobKind::DeviceOnboarding).await.unwrap();

    assert_eq!(compiled.len(), 7);
    for i in 1..=6 {
        assert_eq!(recorder.for_host(&format!("10.0.1.{i}")),
                   vec!["<start>", "show version", "show inventory", "show interfaces", "<done>"]);
    }
    assert_eq!(recorder.for_host("10.0.1.99"), vec!["<start>", DISPATCH_TASK, "<done>"]);
}

#[tokio::test]
async fn run_ids_differ_between_runs() {
    let orchestrator = Orchestrator::builder(Arc::new(ScriptedExecutor::new()), StaticInventory::empty(), transform()).build();
    let first = orchestrator.run(JobKind::DeviceOnboarding).await.unwrap();
    let second = orchestrator.run(JobKind::DeviceOnboarding).await.unwrap();
    assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn oversized_worker_limit_still_runs() {
    let executor = ios_script(ScriptedExecutor::new(), "10.0.2.1");
    let hosts = vec![build_host("10.0.2.1", Some("cisco_ios"), 22, None).unwrap()];
    let orchestrator = Orchestrator::builder(Arc::new(executor), StaticInventory::new(hosts), transform()).max_workers(usize::MAX)
                                                                                                        .build();

    let compiled = orchestrator.run(JobKind::DeviceOnboarding).await.unwrap();

    assert_eq!(compiled.len(), 1);
    assert!(!compiled.get("10.0.2.1").unwrap().is_failed());
}
