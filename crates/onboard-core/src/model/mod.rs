//! Modelo de datos del núcleo: filas crudas, outcomes y resultado compilado.

mod job;
mod outcome;
mod raw;

pub use job::JobKind;
pub use outcome::{CompiledResult, HostEntry, TaskOutcome, TaskPayload};
pub use raw::RawRow;
