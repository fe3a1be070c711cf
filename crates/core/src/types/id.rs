//! Backend-assigned identifiers.
//!
//! The cart backend stores items in a document database and hands out opaque
//! string ids (`_id` on the wire). They are never parsed, only echoed back.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque id of a persisted cart line.
///
/// # Example
///
/// ```rust
/// # use carrito_core::ItemId;
/// let id = ItemId::new("665f1c2e9b1d8a0012345678");
/// assert_eq!(id.as_str(), "665f1c2e9b1d8a0012345678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new ID from a backend value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the backend handed out an empty id.
    ///
    /// Empty ids cannot address an item, so they are treated as absent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
