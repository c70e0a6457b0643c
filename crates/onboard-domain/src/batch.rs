//! Normalización de un `CompiledResult` completo.
//!
//! Los normalizadores son puros, así que los hosts se procesan en paralelo
//! con rayon una vez terminada la corrida.
use std::collections::BTreeMap;

use onboard_core::{CompiledResult, HostEntry, JobKind};
use rayon::prelude::*;

use crate::errors::NormalizeError;
use crate::facts::CanonicalFacts;
use crate::normalizer::NormalizerRegistry;

/// Normaliza la entrada de un host con el normalizador de su plataforma.
pub fn normalize_host(job: JobKind,
                      address: &str,
                      platform: Option<&str>,
                      entry: &HostEntry,
                      registry: &NormalizerRegistry)
                      -> Result<CanonicalFacts, NormalizeError> {
    if let HostEntry::Failed { reason, .. } = entry {
        return Err(NormalizeError::HostFailed { address: address.to_string(),
                                                reason: reason.clone() });
    }
    let platform = platform.ok_or_else(|| NormalizeError::MissingHost(address.to_string()))?;
    let normalizer = registry.for_platform(platform)?;
    Ok(normalizer.normalize(job, address, &entry.successful_rows()))
}

/// Un resultado por host del `CompiledResult`; `platforms` da la plataforma
/// resuelta de cada dirección.
pub fn normalize_compiled(compiled: &CompiledResult,
                          platforms: &BTreeMap<String, String>,
                          registry: &NormalizerRegistry)
                          -> BTreeMap<String, Result<CanonicalFacts, NormalizeError>> {
    compiled.hosts
            .par_iter()
            .map(|(address, entry)| {
                let result = normalize_host(compiled.job,
                                            address,
                                            platforms.get(address).map(String::as_str),
                                            entry,
                                            registry);
                if let Err(err) = &result {
                    log::debug!("run {}: {address} not normalized: {err}", compiled.run_id);
                }
                (address.clone(), result)
            })
            .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use onboard_core::{OnboardError, ParserHint, RawRow, TaskOutcome};
    use uuid::Uuid;

    fn version_entry(hostname: &str) -> HostEntry {
        let row = RawRow { hostname: Some(hostname.to_string()),
                           ..Default::default() };
        let outcome = TaskOutcome::success("show version", Some(ParserHint::TextFsm), vec![row], Utc::now());
        HostEntry::Commands { outcomes: [("show version".to_string(), outcome)].into_iter().collect() }
    }

    #[test]
    fn failed_and_unknown_hosts_are_errors() {
        let mut compiled = CompiledResult::new(Uuid::nil(), JobKind::DeviceOnboarding);
        compiled.replace_host("10.0.0.1", version_entry("sw1"));
        compiled.replace_host("10.0.0.2",
                              HostEntry::failed(OnboardError::UnsupportedPlatform("10.0.0.2 has no platform set".into())));
        compiled.replace_host("10.0.0.3", version_entry("sw3"));
        compiled.replace_host("10.0.0.4", version_entry("sw4"));
        let platforms: BTreeMap<String, String> = [("10.0.0.1", "cisco_ios"), ("10.0.0.3", "hp_comware")].into_iter()
                                                                                                          .map(|(a, p)| (a.to_string(), p.to_string()))
                                                                                                          .collect();

        let out = normalize_compiled(&compiled, &platforms, &NormalizerRegistry::with_defaults());

        assert_eq!(out.len(), 4);
        let facts = out["10.0.0.1"].as_ref().unwrap().as_onboarding().unwrap();
        assert_eq!(facts.hostname.as_deref(), Some("sw1"));
        assert!(matches!(out["10.0.0.2"], Err(NormalizeError::HostFailed { .. })));
        assert_eq!(out["10.0.0.3"], Err(NormalizeError::UnknownPlatform("hp_comware".into())));
        assert_eq!(out["10.0.0.4"], Err(NormalizeError::MissingHost("10.0.0.4".into())));
    }
}
