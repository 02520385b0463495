//! Candidate window model.
//!
//! A window is one event from the organization's potential-times
//! collection: a contiguous range during which meetings may be placed,
//! optionally at a named location. Windows may overlap each other in
//! time — each represents an independently authorized pool of slots.

use serde::{Deserialize, Serialize};

use super::TimeRange;

/// A source event defining a candidate time range for meetings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    /// Unique window identifier.
    pub id: String,
    /// The time range this window spans.
    pub range: TimeRange,
    /// Optional location inherited by every slot derived from this window.
    pub location: Option<String>,
}

impl Window {
    /// Creates a new window.
    pub fn new(id: impl Into<String>, range: TimeRange) -> Self {
        Self {
            id: id.into(),
            range,
            location: None,
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
