use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Access level for a field, or the fallback policy of a store.
///
/// Serialized as the tokens `"r"`, `"w"`, `"rw"` and `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Permission {
    #[serde(rename = "r")]
    ReadOnly,
    #[serde(rename = "w")]
    WriteOnly,
    #[serde(rename = "rw")]
    #[default]
    ReadWrite,
    #[serde(rename = "none")]
    None,
}

impl Permission {
    #[must_use]
    pub fn readable(self) -> bool {
        matches!(self, Permission::ReadOnly | Permission::ReadWrite)
    }

    #[must_use]
    pub fn writable(self) -> bool {
        matches!(self, Permission::WriteOnly | Permission::ReadWrite)
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Permission::ReadOnly => "r",
            Permission::WriteOnly => "w",
            Permission::ReadWrite => "rw",
            Permission::None => "none",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for Permission {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Permission::ReadOnly),
            "w" => Ok(Permission::WriteOnly),
            "rw" => Ok(Permission::ReadWrite),
            "none" => Ok(Permission::None),
            other => Err(StoreError::InvalidPermission(other.to_string())),
        }
    }
}

/// Explicit read/write annotation for one field name on one store kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPermission {
    pub key: String,
    pub readable: bool,
    pub writable: bool,
}

impl FieldPermission {
    pub fn new<S: Into<String>>(key: S, permission: Permission) -> Self {
        Self {
            key: key.into(),
            readable: permission.readable(),
            writable: permission.writable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_flags() {
        assert!(Permission::ReadOnly.readable());
        assert!(!Permission::ReadOnly.writable());
        assert!(!Permission::WriteOnly.readable());
        assert!(Permission::WriteOnly.writable());
        assert!(Permission::ReadWrite.readable() && Permission::ReadWrite.writable());
        assert!(!Permission::None.readable() && !Permission::None.writable());
    }

    #[test]
    fn test_permission_tokens() {
        for token in ["r", "w", "rw", "none"] {
            let permission: Permission = token.parse().unwrap();
            assert_eq!(permission.to_string(), token);
        }
        assert_eq!(
            "x".parse::<Permission>(),
            Err(StoreError::InvalidPermission("x".to_string()))
        );
        assert_eq!(Permission::default(), Permission::ReadWrite);
    }

    #[test]
    fn test_permission_serde_uses_tokens() {
        assert_eq!(serde_json::to_string(&Permission::None).unwrap(), "\"none\"");
        let parsed: Permission = serde_json::from_str("\"r\"").unwrap();
        assert_eq!(parsed, Permission::ReadOnly);
    }

    #[test]
    fn test_field_permission_from_policy() {
        let field = FieldPermission::new("secret", Permission::None);
        assert_eq!(field.key, "secret");
        assert!(!field.readable);
        assert!(!field.writable);
    }
}
