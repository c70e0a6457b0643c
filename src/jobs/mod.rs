//! Puntos de entrada de los dos jobs.
//!
//! Cada job arma el orquestador con el registro por defecto, ejecuta la
//! corrida y pasa el `CompiledResult` por los normalizadores para producir un
//! `JobReport`.
pub mod network_import;
pub mod onboarding;

pub use network_import::run_network_import;
pub use onboarding::{run_onboarding, OnboardingInput};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use onboard_core::inventory::RejectedTarget;
use onboard_core::{CompiledResult, HostDescriptor, ResultProcessor, RunLogger, TaskOutcome};
use onboard_domain::{normalize_compiled, NormalizeError, NormalizerRegistry};

use crate::errors::JobError;
use crate::report::{HostReport, JobReport};

/// Processor que anota la plataforma con la que se despachó cada host.
#[derive(Debug, Default)]
pub struct PlatformTracker {
    platforms: DashMap<String, String>,
}

impl PlatformTracker {
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.platforms
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }
}

impl ResultProcessor for PlatformTracker {
    fn on_host_start(&self, host: &HostDescriptor) {
        if let Some(platform) = host.platform() {
            self.platforms.insert(host.address().to_string(), platform.to_string());
        }
    }

    fn on_task_complete(&self, _host: &HostDescriptor, _command_name: &str, _outcome: &TaskOutcome) {}

    fn on_host_complete(&self, _host: &HostDescriptor) {}
}

/// Normaliza el resultado compilado y arma el reporte. `previous` (sólo
/// network import) marca los hosts cuya huella cambió; `rejected` entra como
/// hosts fallidos sin pisar a un host despachado.
pub(crate) fn build_report(compiled: &CompiledResult,
                           platforms: &BTreeMap<String, String>,
                           registry: &NormalizerRegistry,
                           previous: Option<&BTreeMap<String, String>>,
                           rejected: &[RejectedTarget],
                           started_at: DateTime<Utc>,
                           logger: &dyn RunLogger)
                           -> Result<JobReport, JobError> {
    let mut hosts = BTreeMap::new();
    for (address, result) in normalize_compiled(compiled, platforms, registry) {
        let report = match result {
            Ok(facts) => {
                let fingerprint = facts.fingerprint()?;
                let changed = previous.map(|known| known.get(&address) != Some(&fingerprint));
                HostReport::Collected { platform: platforms.get(&address).cloned().unwrap_or_default(),
                                        facts,
                                        fingerprint,
                                        changed }
            }
            Err(NormalizeError::HostFailed { reason, .. }) => HostReport::Failed { reason },
            Err(err) => {
                logger.error(&format!("{address}: {err}"));
                HostReport::Failed { reason: err.to_string() }
            }
        };
        hosts.insert(address, report);
    }
    for target in rejected {
        hosts.entry(target.address.clone())
             .or_insert_with(|| HostReport::Failed { reason: target.error.to_string() });
    }

    let report = JobReport { run_id: compiled.run_id,
                             job: compiled.job,
                             started_at,
                             finished_at: Utc::now(),
                             hosts };
    logger.info(&format!("run {} ({}) finished: {} collected, {} failed",
                         report.run_id,
                         report.job,
                         report.collected(),
                         report.failed()));
    Ok(report)
}
