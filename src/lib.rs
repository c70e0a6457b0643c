//! netonboard-rust
//!
//! Capa de aplicación del onboarding de dispositivos de red:
//! - `config`: configuración desde entorno / `.env`.
//! - `jobs`: onboarding (con descubrimiento) y network import.
//! - `report`: reporte por host con hechos canónicos y huella.
//! - `cli`: parseo de argumentos y ejecución sobre fixtures JSON.

pub mod cli;
pub mod config;
pub mod errors;
pub mod jobs;
pub mod report;

pub use config::{AppConfig, CONFIG};
pub use errors::JobError;
pub use jobs::{run_network_import, run_onboarding, OnboardingInput, PlatformTracker};
pub use report::{HostReport, JobReport};
