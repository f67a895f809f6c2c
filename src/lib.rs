//! # Scoped Store
//!
//! A hierarchical key-value store whose fields carry read/write permissions.
//! Fields are addressed with colon-delimited paths (`profile:email`) that
//! descend transparently into nested stores, and missing intermediate stores
//! are created on write.
//!
//! Permissions are declared per store kind through [`StoreSchema`] and
//! recorded in a [`PermissionRegistry`]. Fields without an annotation fall
//! back to the store's default policy.
//!
//! ```
//! use scoped_store::{FieldDeclarations, Permission, PermissionRegistry, Store, StoreSchema};
//! use serde_json::json;
//!
//! struct UserSettings;
//!
//! impl StoreSchema for UserSettings {
//!     fn declare(fields: &mut FieldDeclarations<'_>) {
//!         fields.restrict("user_id", Permission::ReadOnly);
//!     }
//! }
//!
//! let mut registry = PermissionRegistry::new();
//! registry.declare::<UserSettings>();
//! let mut settings = Store::with_registry::<UserSettings>(registry.into_shared())
//!     .with_field("user_id", json!(42));
//!
//! settings.write("profile:email", json!("ada@example.com")).unwrap();
//! assert_eq!(*settings.read("profile:email").unwrap(), json!("ada@example.com"));
//! assert!(settings.write("user_id", json!(7)).is_err());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod permissions;
pub mod store;
pub mod value;

pub use config::{ConfigError, ConfigResult, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use logging::{init_logging, LogSettings};
pub use path::{StorePath, MAX_SEGMENTS};
pub use permissions::{
    AccessGate, FieldDeclarations, FieldPermission, FieldPermissionResult, Permission,
    PermissionRegistry, PlainStore, StoreKind, StoreSchema,
};
pub use store::Store;
pub use value::{FieldValue, StoreFactory};
