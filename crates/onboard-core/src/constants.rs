//! Constantes del núcleo de onboarding.
//!
//! Agrupa los valores por defecto del orquestador. El núcleo nunca lee el
//! entorno: la aplicación decide si los sobreescribe (ver `OrchestratorConfig`).

/// Timeout de lectura por comando, en segundos.
pub const COMMAND_READ_TIMEOUT_SECS: u64 = 60;

/// Tamaño por defecto del pool de workers (hosts en paralelo).
pub const DEFAULT_MAX_WORKERS: usize = 20;

/// Puerto SSH por defecto de los targets.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Nombre de la tarea de despacho por host. Un outcome fallido con este
/// nombre marca al host completo como fallido (sin comandos ejecutados).
pub const DISPATCH_TASK: &str = "dispatch_commands";
