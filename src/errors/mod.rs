//! Errores de la capa de aplicación.
pub mod job_error;

pub use job_error::JobError;
