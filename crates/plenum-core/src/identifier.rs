//! Stable identifiers for drawing objects.
//!
//! Every object in a drawing is addressed by an [`ObjectId`]. Ids are dense
//! non-negative integers handed out by the document's block store; absent
//! references are modelled with `Option<ObjectId>` rather than a negative
//! sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a drawing object.
///
/// # Examples
///
/// ```
/// use plenum_core::identifier::ObjectId;
///
/// let id = ObjectId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "#42");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates an id from its raw block number.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw block number.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Converts a signed block reference where negative values mark an
    /// empty slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use plenum_core::identifier::ObjectId;
    ///
    /// assert_eq!(ObjectId::from_signed(7), Some(ObjectId::new(7)));
    /// assert_eq!(ObjectId::from_signed(-1), None);
    /// ```
    pub fn from_signed(raw: i64) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }
}

impl From<u32> for ObjectId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
