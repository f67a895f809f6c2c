//! # Permission-scoped store
//!
//! [`Store`] is the recursive node of the tree. Each store owns its fields,
//! which hold JSON scalars, nested stores or factories producing nested
//! stores. Paths are resolved one segment at a time and the access gate is
//! consulted at the level that owns the terminal field:
//!
//! - reads are only checked at the terminal field, intermediate stores are
//!   traversed without a check;
//! - writes into an existing nested store are delegated to it unchecked, the
//!   nested store applies its own gate to the rest of the path;
//! - writes through an absent field are checked at the current level, since
//!   the nested store that would check them does not exist yet. When allowed,
//!   a plain nested store is created for the field and attached once the
//!   rest of the path has been written into it.
//!
//! A store is not synchronised. Callers sharing a tree between threads must
//! serialise access to it, e.g. by wrapping the root in a `Mutex`.

use log::{debug, trace};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::path::StorePath;
use crate::permissions::{
    AccessGate, FieldPermission, FieldPermissionResult, Permission, PermissionRegistry,
    PlainStore, StoreKind, StoreSchema,
};
use crate::value::FieldValue;

/// A node of the tree: named fields plus the default policy for fields without an annotation.
#[derive(Debug, Clone)]
pub struct Store {
    kind: StoreKind,
    default_policy: Permission,
    fields: HashMap<String, FieldValue>,
    registry: Arc<PermissionRegistry>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates a plain store backed by the shared empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry::<PlainStore>(PermissionRegistry::empty())
    }

    /// Creates a store of kind `S`, whose annotations are looked up in `registry`.
    #[must_use]
    pub fn with_registry<S: StoreSchema>(registry: Arc<PermissionRegistry>) -> Self {
        Self {
            kind: StoreKind::of::<S>(),
            default_policy: Permission::default(),
            fields: HashMap::new(),
            registry,
        }
    }

    #[must_use]
    pub fn with_default_policy(mut self, policy: Permission) -> Self {
        self.default_policy = policy;
        self
    }

    /// Initialises a field while building the store, without consulting the gate.
    #[must_use]
    pub fn with_field<K: Into<String>, V: Into<FieldValue>>(mut self, key: K, value: V) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn default_policy(&self) -> Permission {
        self.default_policy
    }

    pub fn set_default_policy(&mut self, policy: Permission) {
        self.default_policy = policy;
    }

    pub fn registry(&self) -> &Arc<PermissionRegistry> {
        &self.registry
    }

    /// The explicit annotation for `key` on this store's kind, if one was registered.
    pub fn field_permission(&self, key: &str) -> Option<&FieldPermission> {
        self.registry.lookup(self.kind, key)
    }

    pub fn allowed_to_read(&self, key: &str) -> bool {
        self.gate().allowed_to_read(self.kind, self.default_policy, key)
    }

    pub fn allowed_to_write(&self, key: &str) -> bool {
        self.gate().allowed_to_write(self.kind, self.default_policy, key)
    }

    /// Whether this level holds a field named `key`. Ignores permissions.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names held at this level, in no particular order. Ignores permissions.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Reads the value addressed by `path`.
    ///
    /// Values stored in this tree are borrowed. Values reached through a
    /// factory field live in a store built for this call only and are
    /// returned owned.
    pub fn read(&self, path: &str) -> StoreResult<Cow<'_, FieldValue>> {
        StorePath::validate(path)?;
        self.read_validated(path)
    }

    /// Writes `value` at `path`, creating missing nested stores on the way.
    ///
    /// Returns the value now stored at the first segment of the path: the
    /// written value for a single-segment path, otherwise the nested store.
    /// A nested store is only attached once the rest of the path has been
    /// written into it.
    pub fn write<V: Into<FieldValue>>(&mut self, path: &str, value: V) -> StoreResult<&FieldValue> {
        StorePath::validate(path)?;
        self.write_validated(path, value.into())
    }

    /// Applies `write` for every entry in iteration order.
    ///
    /// Stops at the first failing entry. Entries written before it stay written.
    pub fn write_entries<I, K, V>(&mut self, entries: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        for (path, value) in entries {
            self.write(path.as_ref(), value)?;
        }
        Ok(())
    }

    /// Flattening a store into a plain map is not provided; this always fails.
    pub fn entries(&self) -> StoreResult<Map<String, Value>> {
        Err(StoreError::NotImplemented {
            operation: "entries",
        })
    }

    /// Runs the gate decisions `read(path)` would make without returning a value.
    pub fn check_read(&self, path: &str) -> StoreResult<()> {
        StorePath::validate(path)?;
        self.check_read_validated(path)
    }

    /// Runs the gate decisions `write(path, ..)` would make without changing the store.
    pub fn check_write(&self, path: &str) -> StoreResult<()> {
        StorePath::validate(path)?;
        self.check_write_validated(path)
    }

    /// Checks every path of a pending `write_entries` batch independently.
    pub fn check_entries<I, K, V>(&self, entries: I) -> Vec<FieldPermissionResult>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        entries
            .into_iter()
            .map(|(path, _)| {
                let path = path.as_ref();
                FieldPermissionResult::from_check(path, self.check_write(path))
            })
            .collect()
    }

    fn read_validated(&self, path: &str) -> StoreResult<Cow<'_, FieldValue>> {
        let StorePath { head, tail } = StorePath::split_validated(path);

        let Some(tail) = tail else {
            self.ensure_readable(head)?;
            return self
                .fields
                .get(head)
                .map(Cow::Borrowed)
                .ok_or_else(|| StoreError::field_not_found(head));
        };

        match self.fields.get(head) {
            Some(FieldValue::Nested(store)) => {
                trace!("Delegating read of {} to nested store {}", tail, head);
                store.read_validated(tail)
            }
            Some(FieldValue::Factory(factory)) => {
                trace!("Building store from factory {} to read {}", head, tail);
                let store = factory.build();
                let value = store.read_validated(tail)?.into_owned();
                Ok(Cow::Owned(value))
            }
            Some(FieldValue::Scalar(_)) => Err(StoreError::not_a_store(path, head)),
            None => Err(StoreError::invalid_path(
                path,
                format!("field {} does not exist", head),
            )),
        }
    }

    fn write_validated(&mut self, path: &str, value: FieldValue) -> StoreResult<&FieldValue> {
        let StorePath { head, tail } = StorePath::split_validated(path);

        let Some(tail) = tail else {
            self.ensure_writable(head)?;
            return Ok(self.insert(head, value));
        };

        // Consulted only when no nested store exists yet to run its own check.
        let may_create = self.allowed_to_write(head);
        let kind = self.kind;
        let registry = &self.registry;
        let create_child = |value: FieldValue| -> StoreResult<FieldValue> {
            if !may_create {
                debug!("Write access denied for {} on {}", head, kind.name());
                return Err(StoreError::write_denied(head));
            }
            debug!("Creating nested store {} on {}", head, kind.name());
            let mut child = Store::with_registry::<PlainStore>(Arc::clone(registry));
            child.write_validated(tail, value)?;
            Ok(FieldValue::Nested(child))
        };

        match self.fields.entry(head.to_string()) {
            Entry::Occupied(entry) => {
                let field = entry.into_mut();
                match field {
                    FieldValue::Nested(child) => {
                        trace!("Delegating write of {} to nested store {}", tail, head);
                        child.write_validated(tail, value)?;
                    }
                    FieldValue::Scalar(_) => return Err(StoreError::not_a_store(path, head)),
                    FieldValue::Factory(_) => *field = create_child(value)?,
                }
                Ok(&*field)
            }
            Entry::Vacant(entry) => Ok(&*entry.insert(create_child(value)?)),
        }
    }

    fn check_read_validated(&self, path: &str) -> StoreResult<()> {
        let StorePath { head, tail } = StorePath::split_validated(path);

        let Some(tail) = tail else {
            return self.ensure_readable(head);
        };

        match self.fields.get(head) {
            Some(FieldValue::Nested(store)) => store.check_read_validated(tail),
            Some(FieldValue::Factory(factory)) => factory.build().check_read_validated(tail),
            _ => Err(StoreError::not_a_store(path, head)),
        }
    }

    fn check_write_validated(&self, path: &str) -> StoreResult<()> {
        let StorePath { head, tail } = StorePath::split_validated(path);

        let Some(tail) = tail else {
            return self.ensure_writable(head);
        };

        match self.fields.get(head) {
            Some(FieldValue::Nested(store)) => store.check_write_validated(tail),
            Some(FieldValue::Scalar(_)) => Err(StoreError::not_a_store(path, head)),
            Some(FieldValue::Factory(_)) | None => {
                self.ensure_writable(head)?;
                self.child().check_write_validated(tail)
            }
        }
    }

    fn gate(&self) -> AccessGate<'_> {
        AccessGate::new(&self.registry)
    }

    fn child(&self) -> Store {
        Store::with_registry::<PlainStore>(Arc::clone(&self.registry))
    }

    fn ensure_readable(&self, key: &str) -> StoreResult<()> {
        if self.allowed_to_read(key) {
            return Ok(());
        }
        debug!("Read access denied for {} on {}", key, self.kind.name());
        Err(StoreError::read_denied(key))
    }

    fn ensure_writable(&self, key: &str) -> StoreResult<()> {
        if self.allowed_to_write(key) {
            return Ok(());
        }
        debug!("Write access denied for {} on {}", key, self.kind.name());
        Err(StoreError::write_denied(key))
    }

    fn insert(&mut self, key: &str, value: FieldValue) -> &FieldValue {
        match self.fields.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(value),
        }
    }
}
