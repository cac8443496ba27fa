//! Presentation keys.
//!
//! A [`PresentationKey`] is the stable identity that correlates one
//! presenting call site with its overlay controller and any cached payload.
//! Keys are explicit, caller-supplied strings: the key for a call site must
//! be stable across update cycles and unique among call sites that can
//! present concurrently.
//!
//! # Key uniqueness
//!
//! The library does not detect two concurrent presentations sharing a key.
//! When that happens, the registry entry is last-writer-wins: the second
//! presentation takes over the key and the first can no longer be updated
//! or force-dismissed individually. Choose distinct keys per call site.
//!
//! # Example
//!
//! ```
//! use horizon_scrim::PresentationKey;
//!
//! let key = PresentationKey::new("settings-sheet").unwrap();
//! assert_eq!(key.as_str(), "settings-sheet");
//!
//! // Empty identifiers are rejected.
//! assert!(PresentationKey::new("").is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A stable identifier for one presentation call site.
///
/// Keys are cheap to clone (the backing string is shared) and are used as
/// the lookup key in the [`PresentationRegistry`](crate::PresentationRegistry)
/// and as the tag assigned to the inserted overlay element.
///
/// # Related Types
///
/// - [`PresentationHost`](crate::PresentationHost) - Created with a key
/// - [`PresentationRegistry`](crate::PresentationRegistry) - Keyed by this type
/// - [`DismissToken`](crate::DismissToken) - Carries the key of its controller
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PresentationKey(Arc<str>);

impl PresentationKey {
    /// Create a key from an explicit identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`] if the identifier is empty or
    /// whitespace-only.
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref();
        if id.trim().is_empty() {
            return Err(Error::EmptyKey);
        }
        Ok(Self(Arc::from(id)))
    }

    /// The key's string identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PresentationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PresentationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PresentationKey").field(&&*self.0).finish()
    }
}

impl TryFrom<&str> for PresentationKey {
    type Error = Error;

    fn try_from(id: &str) -> Result<Self> {
        Self::new(id)
    }
}

impl TryFrom<String> for PresentationKey {
    type Error = Error;

    fn try_from(id: String) -> Result<Self> {
        Self::new(id)
    }
}
