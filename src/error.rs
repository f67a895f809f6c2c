//! # Store Error Handling
//!
//! Error type shared by every store operation. All failures are raised
//! synchronously to the caller of `read`/`write`/`write_entries`; nothing is
//! retried and a failed `write_entries` batch is not rolled back.

use thiserror::Error;

/// Errors produced by path resolution, the access gate and the store itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The terminal field's read permission resolved to false
    #[error("Read access denied for field {key}")]
    ReadAccessDenied { key: String },

    /// The terminal (or first absent) field's write permission resolved to false
    #[error("Write access denied for field {key}")]
    WriteAccessDenied { key: String },

    /// The path is malformed or tries to descend into something that is not a store
    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A readable leaf field holds no value
    #[error("Field not found: {key}")]
    FieldNotFound { key: String },

    /// The operation is reserved and has no implementation in the store
    #[error("Method not implemented: {operation}")]
    NotImplemented { operation: &'static str },

    /// A permission token outside of `r`, `w`, `rw` and `none`
    #[error("Invalid permission: {0}")]
    InvalidPermission(String),
}

impl StoreError {
    pub fn read_denied<S: Into<String>>(key: S) -> Self {
        Self::ReadAccessDenied { key: key.into() }
    }

    pub fn write_denied<S: Into<String>>(key: S) -> Self {
        Self::WriteAccessDenied { key: key.into() }
    }

    pub fn invalid_path<P: Into<String>, R: Into<String>>(path: P, reason: R) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// A multi-segment path whose `head` holds something other than a store
    pub fn not_a_store<P: Into<String>>(path: P, head: &str) -> Self {
        Self::invalid_path(path, format!("field {} is not a store", head))
    }

    pub fn field_not_found<S: Into<String>>(key: S) -> Self {
        Self::FieldNotFound { key: key.into() }
    }

    /// Check if this error came from a permission decision rather than from the path or data
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            StoreError::ReadAccessDenied { .. } | StoreError::WriteAccessDenied { .. }
        )
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::read_denied("secret").to_string(),
            "Read access denied for field secret"
        );
        assert_eq!(
            StoreError::invalid_path("a:b", "field a is not a store").to_string(),
            "Invalid path a:b: field a is not a store"
        );
        assert_eq!(
            StoreError::not_a_store("a:b", "a"),
            StoreError::invalid_path("a:b", "field a is not a store")
        );
        assert_eq!(
            StoreError::NotImplemented { operation: "entries" }.to_string(),
            "Method not implemented: entries"
        );
    }

    #[test]
    fn test_access_denied_classification() {
        assert!(StoreError::read_denied("a").is_access_denied());
        assert!(StoreError::write_denied("a").is_access_denied());
        assert!(!StoreError::field_not_found("a").is_access_denied());
    }
}
