//! onboard-core: orquestación de comandos para onboarding de dispositivos.
//!
//! Flujo: el registro entrega comandos por plataforma → el transform los deja
//! en cada host → el orquestador despacha por host sobre un pool acotado →
//! el agregador compila los outcomes en un `CompiledResult`.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod execution;
pub mod inventory;
pub mod logging;
pub mod model;
pub mod processor;
pub mod registry;

pub use engine::{Orchestrator, OrchestratorBuilder, OrchestratorConfig};
pub use errors::OnboardError;
pub use execution::{CommandExecutor, ExecutionError, ScriptedExecutor};
pub use inventory::{build_host, AttachPlatformCommands, DeviceRecord, DeviceRecordInventory, HostDescriptor, HostTransform, InventorySource, StaticInventory};
pub use logging::{LogFacadeLogger, MemoryLogger, RunLogger};
pub use model::{CompiledResult, HostEntry, JobKind, RawRow, TaskOutcome};
pub use processor::{ResultAggregator, ResultProcessor};
pub use registry::{default_registry, CommandRegistry, CommandSpec, ParserHint};
