//! Ejecutor guionado: respuestas fijas por (host, comando).
//!
//! Se usa en tests y en la CLI con fixtures JSON de la forma
//! `{"10.0.0.1": {"show version": [ {..fila..} ], "show inventory": {"error": "..."}}}`.
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{CommandExecutor, ExecutionError};
use crate::inventory::HostDescriptor;
use crate::model::RawRow;
use crate::registry::CommandSpec;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedFailure {
    #[default]
    Command,
    Timeout,
    Infrastructure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptedReply {
    Rows(Vec<RawRow>),
    Delayed { delay_ms: u64, rows: Vec<RawRow> },
    Failure {
        error: String,
        #[serde(default)]
        kind: ScriptedFailure,
    },
}

#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    replies: HashMap<String, HashMap<String, ScriptedReply>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(fixture: &str) -> Result<Self, serde_json::Error> {
        let replies: HashMap<String, HashMap<String, ScriptedReply>> = serde_json::from_str(fixture)?;
        Ok(Self { replies,
                  calls: Mutex::new(Vec::new()) })
    }

    pub fn reply(mut self, address: &str, command: &str, reply: ScriptedReply) -> Self {
        self.replies
            .entry(address.to_string())
            .or_default()
            .insert(command.to_string(), reply);
        self
    }

    pub fn rows(self, address: &str, command: &str, rows: Vec<RawRow>) -> Self {
        self.reply(address, command, ScriptedReply::Rows(rows))
    }

    pub fn fail(self, address: &str, command: &str, kind: ScriptedFailure, error: &str) -> Self {
        self.reply(address,
                   command,
                   ScriptedReply::Failure { error: error.to_string(),
                                            kind })
    }

    pub fn delayed(self, address: &str, command: &str, delay: Duration, rows: Vec<RawRow>) -> Self {
        self.reply(address,
                   command,
                   ScriptedReply::Delayed { delay_ms: delay.as_millis() as u64,
                                            rows })
    }

    /// Llamadas recibidas (dirección, comando), en orden de llegada.
    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().await.clone()
    }

    pub async fn calls_for(&self, address: &str) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|(a, _)| a == address)
            .map(|(_, c)| c.clone())
            .collect()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, host: &HostDescriptor, command: &CommandSpec, _timeout: Duration) -> Result<Vec<RawRow>, ExecutionError> {
        self.calls
            .lock()
            .await
            .push((host.address().to_string(), command.command.clone()));

        let reply = self.replies
                        .get(host.address())
                        .and_then(|by_command| by_command.get(&command.command))
                        .cloned()
                        .ok_or_else(|| ExecutionError::Command(format!("no scripted output for `{}` on {}", command.command, host.address())))?;

        match reply {
            ScriptedReply::Rows(rows) => Ok(rows),
            ScriptedReply::Delayed { delay_ms, rows } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(rows)
            }
            ScriptedReply::Failure { error, kind } => Err(match kind {
                ScriptedFailure::Command => ExecutionError::Command(error),
                ScriptedFailure::Timeout => ExecutionError::Timeout,
                ScriptedFailure::Infrastructure => ExecutionError::Infrastructure(error),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::build_host;
    use crate::registry::{OutputShape, ParserHint};

    #[test]
    fn fixture_parses_rows_and_failures() {
        let executor = ScriptedExecutor::from_json_str(r#"{
            "10.0.0.1": {
                "show version": [{"hostname": "sw1", "serial": ["FTX123"]}],
                "show inventory": {"error": "template not found"},
                "show interfaces": {"delay_ms": 5, "rows": []},
                "show vlan": {"error": "plugin crashed", "kind": "infrastructure"}
            }
        }"#).unwrap();
        let host = &executor.replies["10.0.0.1"];
        assert!(matches!(host["show version"], ScriptedReply::Rows(ref r) if r.len() == 1));
        assert!(matches!(host["show inventory"], ScriptedReply::Failure { kind: ScriptedFailure::Command, .. }));
        assert!(matches!(host["show interfaces"], ScriptedReply::Delayed { delay_ms: 5, .. }));
        assert!(matches!(host["show vlan"], ScriptedReply::Failure { kind: ScriptedFailure::Infrastructure, .. }));
    }

    #[test]
    fn unscripted_command_is_a_command_error() {
        let executor = ScriptedExecutor::new();
        let host = build_host("10.0.0.1", Some("cisco_ios"), 22, None).unwrap();
        let spec = CommandSpec::new("show clock", ParserHint::Raw, OutputShape::Text);
        let res = tokio_test::block_on(executor.execute(&host, &spec, Duration::from_secs(1)));
        assert!(matches!(res, Err(ExecutionError::Command(_))));
        assert_eq!(tokio_test::block_on(executor.calls()).len(), 1);
    }
}
