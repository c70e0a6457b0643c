//! Colaborador de logging de la corrida.
//!
//! La severidad es lo que importa: fallos por host y el error fatal van a
//! `Error`, fallos de comando a `Warn`, hosts completados a `Info`.
use std::sync::Mutex;

use log::Level;

pub trait RunLogger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.log(Level::Info, message)
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message)
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message)
    }
}

/// Reenvía al facade `log` bajo un target fijo (`onboard` por defecto); el
/// run id viaja en los mensajes, no en el target.
#[derive(Debug, Clone)]
pub struct LogFacadeLogger {
    target: String,
}

impl LogFacadeLogger {
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into() }
    }
}

impl Default for LogFacadeLogger {
    fn default() -> Self {
        Self::new("onboard")
    }
}

impl RunLogger for LogFacadeLogger {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: self.target.as_str(), level, "{message}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

/// Guarda las entradas en memoria (tests, resumen de la CLI).
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.entries().iter().filter(|e| e.level == level).count()
    }
}

impl RunLogger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LogEntry { level,
                             message: message.to_string() });
    }
}
