//! Resultados por tarea y resultado compilado de una corrida.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{JobKind, RawRow};
use crate::errors::OnboardError;
use crate::registry::ParserHint;

/// Contenido de un outcome: filas estructuradas o el error recuperado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum TaskPayload {
    Rows(Vec<RawRow>),
    Error(OnboardError),
}

/// Resultado de una tarea (host, comando). Lo produce el orquestador y lo
/// consume una única vez cada processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub command: String,
    /// `None` para la tarea de despacho del host (no es un comando).
    pub parser_hint: Option<ParserHint>,
    pub payload: TaskPayload,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl TaskOutcome {
    pub fn success(command: impl Into<String>, parser_hint: Option<ParserHint>, rows: Vec<RawRow>, started_at: DateTime<Utc>) -> Self {
        Self { command: command.into(),
               parser_hint,
               payload: TaskPayload::Rows(rows),
               started_at,
               finished_at: Utc::now() }
    }

    pub fn failure(command: impl Into<String>, parser_hint: Option<ParserHint>, error: OnboardError, started_at: DateTime<Utc>) -> Self {
        Self { command: command.into(),
               parser_hint,
               payload: TaskPayload::Error(error),
               started_at,
               finished_at: Utc::now() }
    }

    pub fn failed(&self) -> bool {
        matches!(self.payload, TaskPayload::Error(_))
    }

    /// Filas del outcome; vacío si falló.
    pub fn rows(&self) -> &[RawRow] {
        match &self.payload {
            TaskPayload::Rows(rows) => rows,
            TaskPayload::Error(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&OnboardError> {
        match &self.payload {
            TaskPayload::Error(e) => Some(e),
            TaskPayload::Rows(_) => None,
        }
    }
}

/// Entrada de un host en el `CompiledResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HostEntry {
    /// El host no llegó a ejecutar comandos (plataforma ausente o no soportada).
    Failed { reason: String, error: OnboardError },
    /// Outcomes por nombre de comando, en orden de ejecución.
    Commands { outcomes: IndexMap<String, TaskOutcome> },
}

impl HostEntry {
    pub fn empty() -> Self {
        Self::Commands { outcomes: IndexMap::new() }
    }

    pub fn failed(error: OnboardError) -> Self {
        Self::Failed { reason: error.to_string(),
                       error }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn outcome(&self, command: &str) -> Option<&TaskOutcome> {
        match self {
            Self::Commands { outcomes } => outcomes.get(command),
            Self::Failed { .. } => None,
        }
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &TaskOutcome> {
        let outcomes = match self {
            Self::Commands { outcomes } => Some(outcomes.values()),
            Self::Failed { .. } => None,
        };
        outcomes.into_iter().flatten()
    }

    /// Filas de los comandos exitosos, por nombre de comando. Los comandos
    /// fallidos no aparecen: los normalizadores los tratan como ausentes.
    pub fn successful_rows(&self) -> IndexMap<String, Vec<RawRow>> {
        self.outcomes()
            .filter(|o| !o.failed())
            .map(|o| (o.command.clone(), o.rows().to_vec()))
            .collect()
    }
}

/// Resultado compilado de una corrida: una entrada por host, indexada por
/// dirección.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledResult {
    pub run_id: Uuid,
    pub job: JobKind,
    pub hosts: BTreeMap<String, HostEntry>,
}

impl CompiledResult {
    pub fn new(run_id: Uuid, job: JobKind) -> Self {
        Self { run_id,
               job,
               hosts: BTreeMap::new() }
    }

    pub fn get(&self, address: &str) -> Option<&HostEntry> {
        self.hosts.get(address)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn failed_hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().filter(|(_, e)| e.is_failed()).map(|(a, _)| a.as_str())
    }

    /// Reemplaza la entrada de un host (p.ej. tras una segunda pasada).
    pub fn replace_host(&mut self, address: impl Into<String>, entry: HostEntry) -> Option<HostEntry> {
        self.hosts.insert(address.into(), entry)
    }
}
