//! Configuration for building a root store
//!
//! A [`StoreConfig`] is usually loaded from a TOML file:
//!
//! ```toml
//! default_policy = "rw"
//!
//! [logging]
//! level = "info"
//!
//! [seed]
//! theme = "dark"
//! "profile:email" = "ada@example.com"
//! ```
//!
//! Seed entries are applied through `write_entries` in file order, so they
//! are subject to the same permission checks as any other write.

pub mod error;

pub use error::{ConfigError, ConfigResult};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

use crate::logging::LogSettings;
use crate::permissions::{Permission, PermissionRegistry, StoreSchema};
use crate::store::Store;

/// Settings for a root store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Policy for fields without an explicit annotation
    #[serde(default)]
    pub default_policy: Permission,
    #[serde(default)]
    pub logging: LogSettings,
    /// Initial values keyed by path, kept in file order
    #[serde(default)]
    pub seed: Map<String, Value>,
}

impl StoreConfig {
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Creates a root store of kind `S` with the configured policy and seed values.
    pub fn build_store<S: StoreSchema>(&self, registry: Arc<PermissionRegistry>) -> ConfigResult<Store> {
        let mut store = Store::with_registry::<S>(registry).with_default_policy(self.default_policy);
        self.apply_seed(&mut store)?;
        Ok(store)
    }

    /// Writes the seed entries into `store` in file order, stopping at the first rejected one.
    pub fn apply_seed(&self, store: &mut Store) -> ConfigResult<()> {
        store.write_entries(self.seed.iter().map(|(path, value)| (path, value.clone())))?;
        Ok(())
    }
}
