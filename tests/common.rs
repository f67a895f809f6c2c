//! Common test utilities and fixtures for store tests

#![allow(dead_code)]

use scoped_store::{FieldDeclarations, Permission, PermissionRegistry, Store, StoreSchema};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init()
            .unwrap_or(()); // Ignore if already initialized
    });
}

/// Settings store used across the integration tests
pub struct UserSettings;

impl StoreSchema for UserSettings {
    fn declare(fields: &mut FieldDeclarations<'_>) {
        fields
            .restrict("user_id", Permission::ReadOnly)
            .restrict("password", Permission::WriteOnly)
            .restrict("secret", Permission::None)
            .restrict("plugins", Permission::None)
            .restrict("nickname", Permission::ReadWrite);
    }
}

pub fn registry() -> Arc<PermissionRegistry> {
    let mut registry = PermissionRegistry::new();
    registry.declare::<UserSettings>();
    registry.into_shared()
}

pub fn user_settings() -> Store {
    init_test_env();
    Store::with_registry::<UserSettings>(registry())
}
