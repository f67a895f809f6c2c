//! Values held by store fields.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::store::Store;

/// Deferred constructor for a nested store.
///
/// Reading through a factory field builds a fresh store on every access; the
/// result is never cached in the owning store.
#[derive(Clone)]
pub struct StoreFactory(Arc<dyn Fn() -> Store + Send + Sync>);

impl StoreFactory {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Store + Send + Sync + 'static,
    {
        Self(Arc::new(factory))
    }

    pub fn build(&self) -> Store {
        (self.0)()
    }
}

impl fmt::Debug for StoreFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoreFactory(..)")
    }
}

/// A field value: plain JSON data, an owned nested store, or a factory producing one.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Scalar(Value),
    Nested(Store),
    Factory(StoreFactory),
}

impl FieldValue {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> Store + Send + Sync + 'static,
    {
        Self::Factory(StoreFactory::new(factory))
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_store(&self) -> Option<&Store> {
        match self {
            FieldValue::Nested(store) => Some(store),
            _ => None,
        }
    }

    pub fn as_store_mut(&mut self) -> Option<&mut Store> {
        match self {
            FieldValue::Nested(store) => Some(store),
            _ => None,
        }
    }

    pub fn is_store(&self) -> bool {
        matches!(self, FieldValue::Nested(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Scalar(_) => "scalar",
            FieldValue::Nested(_) => "store",
            FieldValue::Factory(_) => "factory",
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Store> for FieldValue {
    fn from(store: Store) -> Self {
        FieldValue::Nested(store)
    }
}

impl From<StoreFactory> for FieldValue {
    fn from(factory: StoreFactory) -> Self {
        FieldValue::Factory(factory)
    }
}

impl PartialEq<Value> for FieldValue {
    fn eq(&self, other: &Value) -> bool {
        self.as_scalar() == Some(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_accessors() {
        let value = FieldValue::from(json!({"theme": "dark"}));
        assert_eq!(value.as_scalar(), Some(&json!({"theme": "dark"})));
        assert!(value.as_store().is_none());
        assert!(!value.is_store());
        assert_eq!(value.type_name(), "scalar");
        assert_eq!(value, json!({"theme": "dark"}));
    }

    #[test]
    fn test_nested_accessors() {
        let mut value = FieldValue::from(Store::new());
        assert!(value.is_store());
        assert!(value.as_scalar().is_none());
        assert!(value.as_store_mut().is_some());
        assert_eq!(value.type_name(), "store");
    }

    #[test]
    fn test_factory_builds_fresh_stores() {
        let value = FieldValue::factory(|| Store::new().with_field("x", json!(1)));
        let FieldValue::Factory(factory) = &value else {
            panic!("expected a factory");
        };
        assert_eq!(value.type_name(), "factory");
        assert!(factory.build().contains_key("x"));
        assert!(!value.is_store());
    }
}
