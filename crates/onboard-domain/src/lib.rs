//! onboard-domain: hechos canónicos y normalizadores por fabricante.
//!
//! Consume las filas crudas agregadas por `onboard-core` y produce
//! `CanonicalFacts` con forma estable, sin efectos secundarios.
pub mod batch;
pub mod canonical;
pub mod detect;
pub mod errors;
pub mod facts;
pub mod interfaces;
pub mod normalizer;
pub mod vendors;

pub use batch::{normalize_compiled, normalize_host};
pub use detect::detect_platform;
pub use errors::NormalizeError;
pub use facts::{CanonicalFacts, ImportFacts, InterfaceFacts, InterfaceMode, InterfaceType, OnboardingFacts};
pub use interfaces::normalize_interface_name;
pub use normalizer::{default_normalizers, CommandRows, NormalizerRegistry, VendorNormalizer};
pub use vendors::{IosNormalizer, JunosNormalizer, NxosNormalizer};
