//! Reporte final de un job, listo para el colaborador de persistencia.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use onboard_core::JobKind;
use onboard_domain::CanonicalFacts;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HostReport {
    Collected {
        platform: String,
        facts: CanonicalFacts,
        fingerprint: String,
        /// Sólo en network import: la huella difiere de la conocida (o no
        /// había una previa).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        changed: Option<bool>,
    },
    Failed {
        reason: String,
    },
}

impl HostReport {
    pub fn is_failed(&self) -> bool {
        matches!(self, HostReport::Failed { .. })
    }

    pub fn facts(&self) -> Option<&CanonicalFacts> {
        match self {
            HostReport::Collected { facts, .. } => Some(facts),
            HostReport::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub run_id: Uuid,
    pub job: JobKind,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub hosts: BTreeMap<String, HostReport>,
}

impl JobReport {
    pub fn host(&self, address: &str) -> Option<&HostReport> {
        self.hosts.get(address)
    }

    pub fn collected(&self) -> usize {
        self.hosts.values().filter(|h| !h.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.hosts.values().filter(|h| h.is_failed()).count()
    }

    /// Huellas por dirección, para alimentar el siguiente network import.
    pub fn fingerprints(&self) -> BTreeMap<String, String> {
        self.hosts
            .iter()
            .filter_map(|(address, host)| match host {
                HostReport::Collected { fingerprint, .. } => Some((address.clone(), fingerprint.clone())),
                HostReport::Failed { .. } => None,
            })
            .collect()
    }
}
