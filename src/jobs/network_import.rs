//! Job de network import sobre dispositivos ya conocidos.
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use onboard_core::{default_registry, AttachPlatformCommands, CommandExecutor, DeviceRecord, DeviceRecordInventory, JobKind, Orchestrator,
                   RunLogger};
use onboard_domain::default_normalizers;

use super::{build_report, PlatformTracker};
use crate::config::AppConfig;
use crate::errors::JobError;
use crate::report::JobReport;

/// Refresca los hechos de `records`. `previous` son las huellas conocidas por
/// dirección; cada host del reporte indica si sus hechos cambiaron.
pub async fn run_network_import(records: Vec<DeviceRecord>,
                                executor: Arc<dyn CommandExecutor>,
                                config: &AppConfig,
                                logger: Arc<dyn RunLogger>,
                                previous: &BTreeMap<String, String>)
                                -> Result<JobReport, JobError> {
    let started_at = Utc::now();
    let inventory = DeviceRecordInventory::new(records);
    for record in inventory.shadowed() {
        logger.error(&format!("{}: primary address {} is already used by another device; skipped",
                              record.name,
                              record.primary_address.trim()));
    }
    let tracker = Arc::new(PlatformTracker::default());
    let orchestrator = Orchestrator::builder(executor,
                                             inventory,
                                             AttachPlatformCommands::new(Arc::new(default_registry()))).processor(tracker.clone())
                                                                                                       .logger(logger.clone())
                                                                                                       .config(config.orchestrator())
                                                                                                       .build();

    let compiled = orchestrator.run(JobKind::NetworkImport).await?;
    build_report(&compiled,
                 &tracker.snapshot(),
                 default_normalizers(),
                 Some(previous),
                 &[],
                 started_at,
                 logger.as_ref())
}
