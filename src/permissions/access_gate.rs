use super::registry::{PermissionRegistry, StoreKind};
use super::types::policy::Permission;
use crate::error::StoreError;

/// Decides whether a field may be read or written.
///
/// An explicit annotation registered for the field on the store's kind
/// always takes precedence; without one the store's default policy applies.
/// The gate holds no state of its own, so the same key can be judged
/// differently once the default policy changes.
#[derive(Clone, Copy)]
pub struct AccessGate<'a> {
    registry: &'a PermissionRegistry,
}

impl<'a> AccessGate<'a> {
    pub fn new(registry: &'a PermissionRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn allowed_to_read(&self, kind: StoreKind, default_policy: Permission, key: &str) -> bool {
        self.registry
            .lookup(kind, key)
            .map_or_else(|| default_policy.readable(), |field| field.readable)
    }

    #[must_use]
    pub fn allowed_to_write(&self, kind: StoreKind, default_policy: Permission, key: &str) -> bool {
        self.registry
            .lookup(kind, key)
            .map_or_else(|| default_policy.writable(), |field| field.writable)
    }
}

/// Outcome of a permission preflight for one path.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPermissionResult {
    pub path: String,
    pub allowed: bool,
    pub error: Option<StoreError>,
}

impl FieldPermissionResult {
    pub fn from_check<S: Into<String>>(path: S, check: Result<(), StoreError>) -> Self {
        match check {
            Ok(()) => Self {
                path: path.into(),
                allowed: true,
                error: None,
            },
            Err(error) => Self {
                path: path.into(),
                allowed: false,
                error: Some(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::registry::{FieldDeclarations, StoreSchema};

    struct Account;

    impl StoreSchema for Account {
        fn declare(fields: &mut FieldDeclarations<'_>) {
            fields
                .restrict("id", Permission::ReadOnly)
                .restrict("password", Permission::WriteOnly)
                .restrict("secret", Permission::None)
                .restrict("nickname", Permission::ReadWrite);
        }
    }

    fn registry() -> PermissionRegistry {
        let mut registry = PermissionRegistry::new();
        registry.declare::<Account>();
        registry
    }

    #[test]
    fn test_default_policy_fallback() {
        let registry = registry();
        let gate = AccessGate::new(&registry);
        let kind = StoreKind::of::<Account>();

        assert!(gate.allowed_to_read(kind, Permission::ReadWrite, "anything"));
        assert!(gate.allowed_to_write(kind, Permission::ReadWrite, "anything"));
        assert!(gate.allowed_to_read(kind, Permission::ReadOnly, "anything"));
        assert!(!gate.allowed_to_write(kind, Permission::ReadOnly, "anything"));
        assert!(!gate.allowed_to_read(kind, Permission::WriteOnly, "anything"));
        assert!(gate.allowed_to_write(kind, Permission::WriteOnly, "anything"));
        assert!(!gate.allowed_to_read(kind, Permission::None, "anything"));
        assert!(!gate.allowed_to_write(kind, Permission::None, "anything"));
    }

    #[test]
    fn test_annotation_overrides_default_policy() {
        let registry = registry();
        let gate = AccessGate::new(&registry);
        let kind = StoreKind::of::<Account>();

        for policy in [
            Permission::ReadOnly,
            Permission::WriteOnly,
            Permission::ReadWrite,
            Permission::None,
        ] {
            assert!(gate.allowed_to_read(kind, policy, "id"));
            assert!(!gate.allowed_to_write(kind, policy, "id"));
            assert!(!gate.allowed_to_read(kind, policy, "password"));
            assert!(gate.allowed_to_write(kind, policy, "password"));
            assert!(!gate.allowed_to_read(kind, policy, "secret"));
            assert!(!gate.allowed_to_write(kind, policy, "secret"));
            assert!(gate.allowed_to_read(kind, policy, "nickname"));
            assert!(gate.allowed_to_write(kind, policy, "nickname"));
        }
    }

    #[test]
    fn test_annotations_do_not_leak_to_other_kinds() {
        let registry = registry();
        let gate = AccessGate::new(&registry);

        assert!(gate.allowed_to_write(StoreKind::plain(), Permission::ReadWrite, "id"));
        assert!(gate.allowed_to_read(StoreKind::plain(), Permission::ReadWrite, "secret"));
    }

    #[test]
    fn test_permission_result_from_check() {
        let ok = FieldPermissionResult::from_check("a", Ok(()));
        assert!(ok.allowed);
        assert!(ok.error.is_none());

        let denied = FieldPermissionResult::from_check("b", Err(StoreError::write_denied("b")));
        assert!(!denied.allowed);
        assert_eq!(denied.error, Some(StoreError::write_denied("b")));
    }
}
