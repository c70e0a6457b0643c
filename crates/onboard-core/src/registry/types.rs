//! Tipos del registro de comandos por plataforma.
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::OnboardError;
use crate::model::JobKind;

/// Indicación al colaborador de ejecución sobre qué parser aplicar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserHint {
    /// Template de texto estructurado (filas clave/valor).
    TextFsm,
    /// Sin template: una fila con la salida en `output`.
    Raw,
}

/// Forma esperada de la salida de un comando.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    Table,
    Single,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub command: String,
    pub parser_hint: ParserHint,
    pub shape: OutputShape,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>, parser_hint: ParserHint, shape: OutputShape) -> Self {
        Self { command: command.into(),
               parser_hint,
               shape }
    }

    fn same_key(&self, other: &CommandSpec) -> bool {
        self.command == other.command && self.parser_hint == other.parser_hint
    }
}

/// Un getter declara qué comando aporta un dato; varios getters pueden
/// compartir comando.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetterMapping {
    pub getter: String,
    pub spec: CommandSpec,
}

/// Lista ordenada y deduplicada de comandos para (plataforma, job).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCommandSpec {
    pub platform: String,
    pub job: JobKind,
    commands: Vec<CommandSpec>,
}

impl PlatformCommandSpec {
    /// Construye la lista deduplicando por (comando, parser_hint). El orden de
    /// primera inserción define el orden de ejecución.
    pub fn from_specs<'a>(platform: impl Into<String>, job: JobKind, specs: impl IntoIterator<Item = &'a CommandSpec>) -> Self {
        let mut commands: Vec<CommandSpec> = Vec::new();
        for spec in specs {
            if !commands.iter().any(|c| c.same_key(spec)) {
                commands.push(spec.clone());
            }
        }
        Self { platform: platform.into(),
               job,
               commands }
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Pseudo-plataforma usada para el probe de descubrimiento.
pub const DISCOVERY_PLATFORM: &str = "discovery";

/// Mapa estático plataforma → job → getters.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    platforms: IndexMap<String, HashMap<JobKind, Vec<GetterMapping>>>,
    discovery: HashMap<JobKind, Vec<CommandSpec>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un getter para (plataforma, job).
    pub fn register(&mut self, platform: &str, job: JobKind, getter: &str, spec: CommandSpec) -> &mut Self {
        self.platforms
            .entry(platform.to_string())
            .or_default()
            .entry(job)
            .or_default()
            .push(GetterMapping { getter: getter.to_string(),
                                  spec });
        self
    }

    /// Define el probe reducido que corren los hosts sin plataforma.
    pub fn with_discovery_probe(mut self, job: JobKind, probe: Vec<CommandSpec>) -> Self {
        self.discovery.insert(job, probe);
        self
    }

    pub fn supports(&self, platform: &str) -> bool {
        self.platforms.contains_key(platform)
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.platforms.keys().map(|k| k.as_str())
    }

    /// Getters registrados (plataforma, job), en orden de registro.
    pub fn getters(&self, platform: &str, job: JobKind) -> &[GetterMapping] {
        self.platforms
            .get(platform)
            .and_then(|jobs| jobs.get(&job))
            .map(|g| g.as_slice())
            .unwrap_or(&[])
    }

    /// Comandos a ejecutar para (plataforma, job). Determinista y sin efectos.
    pub fn commands_for(&self, platform: &str, job: JobKind) -> Result<PlatformCommandSpec, OnboardError> {
        let getters = self.platforms
                          .get(platform)
                          .ok_or_else(|| OnboardError::UnsupportedPlatform(format!("`{platform}` is not in the command registry")))?
                          .get(&job)
                          .ok_or_else(|| OnboardError::UnsupportedPlatform(format!("`{platform}` has no commands for {job}")))?;
        Ok(PlatformCommandSpec::from_specs(platform, job, getters.iter().map(|g| &g.spec)))
    }

    /// Probe de descubrimiento para el job, si existe.
    pub fn discovery_commands(&self, job: JobKind) -> Option<PlatformCommandSpec> {
        self.discovery
            .get(&job)
            .map(|probe| PlatformCommandSpec::from_specs(DISCOVERY_PLATFORM, job, probe.iter()))
    }
}
