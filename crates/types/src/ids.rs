//! Newtype wrappers for semantic identifiers.

use std::fmt;
use std::sync::Arc;

/// Handle to an image registered with a drawing surface.
///
/// Registering once and drawing many times lets a surface embed the
/// pixel data a single time.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ImageId(u32);

impl ImageId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Im{}", self.0)
    }
}

/// The key a resource provider resolves (a relative path or an in-memory name).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceKey(Arc<str>);

impl ResourceKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceKey {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ResourceKey {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
