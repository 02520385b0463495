//! Slot model.
//!
//! A slot is a discrete candidate time derived from exactly one window.
//! It inherits the window's identity and location. Slots sharing a window
//! are *siblings*: at most one of any pair of overlapping siblings may
//! host a meeting, while slots from different windows are never mutually
//! constrained even when their times coincide.

use serde::{Deserialize, Serialize};

use super::TimeRange;

/// A candidate meeting time derived from a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    /// Identity of the window this slot was generated from.
    pub window_id: String,
    /// The slot's time span.
    pub range: TimeRange,
    /// Location inherited from the originating window.
    pub location: Option<String>,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(window_id: impl Into<String>, range: TimeRange) -> Self {
        Self {
            window_id: window_id.into(),
            range,
            location: None,
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Whether two slots derive from the same window.
    #[inline]
    pub fn is_sibling_of(&self, other: &Self) -> bool {
        self.window_id == other.window_id
    }
}
