//! Construcción de inventario (Host Inventory Builder), fuentes inyectables
//! y transform previo al despacho.

mod builder;
mod host;
mod source;
mod transform;

pub use builder::{build_host, FlatTargets, RejectedTarget, TargetBatch, TargetEntry, TargetTable};
pub use host::{CredentialRef, HostData, HostDescriptor};
pub use source::{DeviceRecord, DeviceRecordInventory, InventorySource, StaticInventory};
pub use transform::{AttachPlatformCommands, HostTransform};
