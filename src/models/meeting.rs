//! Meeting model.
//!
//! A meeting names the members it requires and how strongly their absence
//! weighs on the objective: key attendees carry a higher absence penalty,
//! and key meetings add a further penalty for every member who misses them.
//! Only active meetings enter the optimization at all.

use serde::{Deserialize, Serialize};

/// A recurring meeting to be placed in the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique meeting identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// IDs of the members this meeting requires.
    pub members: Vec<String>,
    /// Members whose attendance is strongly preferred (subset of `members`).
    pub key_attendees: Vec<String>,
    /// Whether absences from this meeting carry the key-meeting penalty tier.
    pub is_key: bool,
    /// Whether this meeting is scheduled in the current run.
    /// Inactive meetings are excluded from the model entirely.
    pub active: bool,
}

impl Meeting {
    /// Creates a new active meeting with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            members: Vec::new(),
            key_attendees: Vec::new(),
            is_key: false,
            active: true,
        }
    }

    /// Sets the meeting name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a required member.
    pub fn with_member(mut self, member_id: impl Into<String>) -> Self {
        self.members.push(member_id.into());
        self
    }

    /// Adds several required members.
    pub fn with_members<I, S>(mut self, member_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members.extend(member_ids.into_iter().map(Into::into));
        self
    }

    /// Marks a required member as a key attendee.
    pub fn with_key_attendee(mut self, member_id: impl Into<String>) -> Self {
        self.key_attendees.push(member_id.into());
        self
    }

    /// Marks this meeting as a key meeting.
    pub fn key(mut self) -> Self {
        self.is_key = true;
        self
    }

    /// Excludes this meeting from scheduling.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether the meeting requires the given member.
    pub fn requires(&self, member_id: &str) -> bool {
        self.members.iter().any(|m| m == member_id)
    }

    /// Whether the given member is a key attendee of this meeting.
    pub fn is_key_attendee(&self, member_id: &str) -> bool {
        self.key_attendees.iter().any(|m| m == member_id)
    }
}
