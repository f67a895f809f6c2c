use log::trace;
use once_cell::sync::Lazy;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::types::policy::{FieldPermission, Permission};

static EMPTY_REGISTRY: Lazy<Arc<PermissionRegistry>> =
    Lazy::new(|| Arc::new(PermissionRegistry::new()));

/// Declared shape of a store type.
///
/// Implementors are marker types standing for one kind of store. The
/// `declare` hook lists the fields of that kind that carry an explicit
/// permission; every other field falls back to the store's default policy.
///
/// ```
/// use scoped_store::{FieldDeclarations, Permission, StoreSchema};
///
/// struct UserSettings;
///
/// impl StoreSchema for UserSettings {
///     fn declare(fields: &mut FieldDeclarations<'_>) {
///         fields
///             .restrict("password", Permission::WriteOnly)
///             .restrict("user_id", Permission::ReadOnly);
///     }
/// }
/// ```
pub trait StoreSchema: 'static {
    fn declare(_fields: &mut FieldDeclarations<'_>) {}
}

/// Kind used for stores created without a schema and for auto-created children.
pub struct PlainStore;

impl StoreSchema for PlainStore {}

/// Type identity of a store kind. Two kinds are equal when their schema types are.
#[derive(Clone, Copy)]
pub struct StoreKind {
    id: TypeId,
    name: &'static str,
}

impl StoreKind {
    #[must_use]
    pub fn of<S: StoreSchema>() -> Self {
        Self {
            id: TypeId::of::<S>(),
            name: type_name::<S>(),
        }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self::of::<PlainStore>()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for StoreKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StoreKind {}

impl Hash for StoreKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoreKind").field(&self.name).finish()
    }
}

/// Records explicit field permissions per store kind.
///
/// Registration is append-once: the first annotation for a `(kind, key)`
/// pair wins and later ones are ignored. Stores share one registry through
/// an `Arc`, so it is normally fully declared before the first store is built.
#[derive(Debug, Default, Clone)]
pub struct PermissionRegistry {
    entries: HashMap<StoreKind, Vec<FieldPermission>>,
}

impl PermissionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry with no annotations, used by stores built without one.
    pub fn empty() -> Arc<Self> {
        Arc::clone(&EMPTY_REGISTRY)
    }

    /// Records `permission` for `key` on `kind` unless `key` already has an entry.
    pub fn register<S: Into<String>>(&mut self, kind: StoreKind, key: S, permission: Permission) {
        let key = key.into();
        let fields = self.entries.entry(kind).or_default();
        if fields.iter().any(|field| field.key == key) {
            trace!("Ignoring repeated annotation for {} on {}", key, kind.name());
            return;
        }
        trace!("Registering {} as {} on {}", key, permission, kind.name());
        fields.push(FieldPermission::new(key, permission));
    }

    /// Runs the schema's declaration hook against this registry.
    pub fn declare<S: StoreSchema>(&mut self) -> &mut Self {
        let mut fields = FieldDeclarations {
            registry: self,
            kind: StoreKind::of::<S>(),
        };
        S::declare(&mut fields);
        self
    }

    pub fn lookup(&self, kind: StoreKind, key: &str) -> Option<&FieldPermission> {
        self.entries
            .get(&kind)
            .and_then(|fields| fields.iter().find(|field| field.key == key))
    }

    /// Annotations of `kind` in registration order.
    pub fn fields(&self, kind: StoreKind) -> &[FieldPermission] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Builder handed to [`StoreSchema::declare`], bound to one store kind.
pub struct FieldDeclarations<'a> {
    registry: &'a mut PermissionRegistry,
    kind: StoreKind,
}

impl FieldDeclarations<'_> {
    pub fn restrict<S: Into<String>>(&mut self, key: S, permission: Permission) -> &mut Self {
        self.registry.register(self.kind, key, permission);
        self
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }
}
