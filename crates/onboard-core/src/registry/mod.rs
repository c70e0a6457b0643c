//! Registro de comandos por plataforma (Platform Command Registry).

mod defaults;
mod types;

pub use defaults::default_registry;
pub use types::{CommandRegistry, CommandSpec, GetterMapping, OutputShape, ParserHint, PlatformCommandSpec, DISCOVERY_PLATFORM};
