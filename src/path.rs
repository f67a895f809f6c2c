//! Colon-delimited store paths.
//!
//! A path such as `profile:email` addresses `email` inside the store held by
//! `profile`. Only the first colon is significant at each level; the tail is
//! handed to the nested store which splits it again. The whole path is
//! validated once when it enters the store, nested levels only split.

use crate::error::{StoreError, StoreResult};

pub const SEPARATOR: char = ':';

/// Deepest nesting a single path may address.
pub const MAX_SEGMENTS: usize = 128;

/// A path split into the field on the current store and the remainder, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePath<'a> {
    pub head: &'a str,
    pub tail: Option<&'a str>,
}

impl<'a> StorePath<'a> {
    /// Splits `path` on its first colon.
    ///
    /// Every segment of the whole path must be non-empty, so a malformed path
    /// is rejected before any store along the way has been touched.
    pub fn split(path: &'a str) -> StoreResult<Self> {
        Self::validate(path)?;
        Ok(Self::split_validated(path))
    }

    /// Rejects paths with an empty segment or more than [`MAX_SEGMENTS`] segments.
    pub fn validate(path: &str) -> StoreResult<()> {
        let mut segments = 0;
        for segment in path.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(StoreError::invalid_path(path, "empty field name"));
            }
            segments += 1;
            if segments > MAX_SEGMENTS {
                return Err(StoreError::invalid_path(
                    path,
                    format!("more than {} segments", MAX_SEGMENTS),
                ));
            }
        }
        Ok(())
    }

    /// Splits a path that already passed [`StorePath::validate`].
    pub(crate) fn split_validated(path: &'a str) -> Self {
        match path.split_once(SEPARATOR) {
            Some((head, tail)) => Self {
                head,
                tail: Some(tail),
            },
            None => Self { head: path, tail: None },
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.tail.is_none()
    }
}
