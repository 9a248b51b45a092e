//! Stable entity identifiers and animation sequence identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique entity IDs
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A stable entity identifier.
///
/// Unlike internal ECS handles which may be recycled, `EntityId` stays
/// valid as a map key for the whole lifetime of a world.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create a new unique EntityId
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Create an EntityId from a raw value (for testing)
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an animation sequence as known to the instanced renderer.
///
/// Negative values mean "no sequence assigned"; [`SequenceId::NONE`] is the
/// canonical sentinel. The raw value is what ends up in instance records.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceId(pub i32);

impl SequenceId {
    pub const NONE: Self = Self(-1);

    pub fn raw(&self) -> i32 {
        self.0
    }

    /// True for the sentinel (any negative id)
    pub fn is_none(&self) -> bool {
        self.0 < 0
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<i32> for SequenceId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "SequenceId(none)")
        } else {
            write!(f, "SequenceId({})", self.0)
        }
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
