// permissions module

pub mod access_gate;
pub mod registry;
pub mod types;
pub use access_gate::{AccessGate, FieldPermissionResult};
pub use registry::{FieldDeclarations, PermissionRegistry, PlainStore, StoreKind, StoreSchema};
pub use types::policy::{FieldPermission, Permission};
