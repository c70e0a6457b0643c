//! Motor de orquestación (Command Execution Orchestrator).

mod builder;
mod config;
mod orchestrator;

pub use builder::OrchestratorBuilder;
pub use config::OrchestratorConfig;
pub use orchestrator::Orchestrator;
