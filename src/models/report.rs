//! Schedule report (solution) model.
//!
//! The decoded output of a run: which slot each meeting received, who
//! attends and who is absent at which penalty tier, residual
//! double-bookings across windows, aggregate attendance counts, and the
//! total incurred penalty. An empty report is the no-op result for a
//! problem with nothing to schedule.

use serde::{Deserialize, Serialize};

use super::{Meeting, PenaltyConfig, Slot, TimeRange};

/// Penalty tier of an absence.
///
/// Tiers stack: a key attendee missing a key meeting incurs both the
/// key-attendee and the key-meeting weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AbsenceTier {
    /// An ordinary required member missed the meeting.
    Ordinary,
    /// A key attendee missed the meeting.
    KeyAttendee,
    /// A required member missed a key meeting.
    KeyMeeting,
    /// A key attendee missed a key meeting (stacked tier).
    KeyAttendeeOfKeyMeeting,
}

impl AbsenceTier {
    /// Classifies the tier for a (meeting, member) pair.
    pub fn classify(meeting: &Meeting, member_id: &str) -> Self {
        match (meeting.is_key, meeting.is_key_attendee(member_id)) {
            (false, false) => Self::Ordinary,
            (false, true) => Self::KeyAttendee,
            (true, false) => Self::KeyMeeting,
            (true, true) => Self::KeyAttendeeOfKeyMeeting,
        }
    }

    /// The penalty this tier incurs under the given configuration.
    pub fn penalty(&self, config: &PenaltyConfig) -> u64 {
        match self {
            Self::Ordinary => config.required_member_absence,
            Self::KeyAttendee => config.key_attendee_absence,
            Self::KeyMeeting => config.key_meeting_absence,
            Self::KeyAttendeeOfKeyMeeting => {
                config.key_attendee_absence + config.key_meeting_absence
            }
        }
    }
}

/// One member's absence from one meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Absence {
    /// The absent member.
    pub member_id: String,
    /// Why the absence matters.
    pub tier: AbsenceTier,
    /// Penalty incurred by this absence.
    pub penalty: u64,
}

/// A meeting's chosen slot with its attendance outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingAssignment {
    /// The scheduled meeting.
    pub meeting_id: String,
    /// Meeting name (denormalized for reporting convenience).
    pub meeting_name: String,
    /// The slot the meeting received.
    pub slot: Slot,
    /// Members who attend.
    pub attendees: Vec<String>,
    /// Members who miss the meeting, with their penalty tier.
    pub absences: Vec<Absence>,
}

/// Per-member attendance summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    /// The member.
    pub member_id: String,
    /// Meetings the member attends.
    pub attended: Vec<String>,
    /// Meetings the member misses.
    pub missed: Vec<String>,
}

/// A member scheduled into two overlapping meetings.
///
/// Legitimate when the meetings sit in different windows — reported so the
/// member can choose, never treated as a constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoubleBooking {
    /// The double-booked member.
    pub member_id: String,
    /// First of the two overlapping meetings.
    pub first_meeting: String,
    /// Second of the two overlapping meetings.
    pub second_meeting: String,
}

/// Aggregate attendance counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttendanceStats {
    /// Number of (meeting, member) pairs where the member attends.
    pub present: usize,
    /// Total number of (meeting, member) pairs scheduled.
    pub expected: usize,
}

impl AttendanceStats {
    /// Attendance rate in [0, 1], or `None` when nothing was scheduled.
    pub fn rate(&self) -> Option<f64> {
        if self.expected == 0 {
            None
        } else {
            Some(self.present as f64 / self.expected as f64)
        }
    }
}

/// The complete output of one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// The week that was scheduled.
    pub week: TimeRange,
    /// One entry per active meeting.
    pub assignments: Vec<MeetingAssignment>,
    /// Per-member attendance summaries.
    pub members: Vec<MemberSummary>,
    /// Members attending two overlapping meetings (cross-window).
    pub double_bookings: Vec<DoubleBooking>,
    /// Aggregate attendance counts.
    pub attendance: AttendanceStats,
    /// Total soft penalty incurred by the optimal schedule.
    pub total_penalty: u64,
}

impl ScheduleReport {
    /// Creates the no-op report for a week with nothing to schedule.
    pub fn empty(week: TimeRange) -> Self {
        Self {
            week,
            assignments: Vec::new(),
            members: Vec::new(),
            double_bookings: Vec::new(),
            attendance: AttendanceStats::default(),
            total_penalty: 0,
        }
    }

    /// Whether the report schedules nothing.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Finds the assignment for a given meeting.
    pub fn assignment_for(&self, meeting_id: &str) -> Option<&MeetingAssignment> {
        self.assignments.iter().find(|a| a.meeting_id == meeting_id)
    }

    /// Number of scheduled meetings.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
