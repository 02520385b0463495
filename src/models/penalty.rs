//! Absence penalty configuration.
//!
//! Three non-negative weights price a member missing a meeting, by tier.
//! Weights apply per (meeting, member) pair; the key-attendee and
//! key-meeting tiers stack when both apply. With the defaults, a key
//! attendee's absence outweighs one hundred ordinary absences.

use serde::{Deserialize, Serialize};

/// Weights for the soft (penalized) absence constraints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PenaltyConfig {
    /// Penalty when a key attendee misses their meeting.
    pub key_attendee_absence: u64,
    /// Penalty added for every member who misses a key meeting.
    pub key_meeting_absence: u64,
    /// Penalty when an ordinary required member misses a meeting.
    pub required_member_absence: u64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            key_attendee_absence: 100,
            key_meeting_absence: 5,
            required_member_absence: 1,
        }
    }
}

impl PenaltyConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the key-attendee absence weight.
    pub fn with_key_attendee_absence(mut self, weight: u64) -> Self {
        self.key_attendee_absence = weight;
        self
    }

    /// Overrides the key-meeting absence weight.
    pub fn with_key_meeting_absence(mut self, weight: u64) -> Self {
        self.key_meeting_absence = weight;
        self
    }

    /// Overrides the ordinary required-member absence weight.
    pub fn with_required_member_absence(mut self, weight: u64) -> Self {
        self.required_member_absence = weight;
        self
    }
}
