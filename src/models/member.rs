//! Member model.
//!
//! A member is a person whose attendance the scheduler optimizes for.
//! Each member carries the busy intervals gathered from their calendar
//! for the week being scheduled; the intervals are immutable for the
//! duration of a run.

use serde::{Deserialize, Serialize};

use super::TimeRange;

/// A meeting participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique member identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Opaque reference to the member's calendar (provider-specific).
    pub calendar_ref: String,
    /// Busy intervals for the scheduling week, as fetched by the caller.
    pub busy: Vec<TimeRange>,
}

impl Member {
    /// Creates a new member with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            calendar_ref: String::new(),
            busy: Vec::new(),
        }
    }

    /// Sets the member name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the calendar reference.
    pub fn with_calendar_ref(mut self, calendar_ref: impl Into<String>) -> Self {
        self.calendar_ref = calendar_ref.into();
        self
    }

    /// Adds a busy interval.
    pub fn with_busy(mut self, busy: TimeRange) -> Self {
        self.busy.push(busy);
        self
    }

    /// Whether the member has no conflicting busy interval during `range`.
    pub fn is_free_during(&self, range: &TimeRange) -> bool {
        !self.busy.iter().any(|b| b.overlaps(range))
    }
}
