//! Scheduling problem (input container).
//!
//! Everything one run consumes: the week being scheduled, the members with
//! their busy intervals already fetched, the meetings, the candidate
//! windows, mandatory-attendance constraints, and the penalty weights.
//! The problem is constructed fresh by the caller for every run and is
//! immutable while the run executes.

use serde::{Deserialize, Serialize};

use super::{Meeting, Member, PenaltyConfig, TimeRange, Window};

/// A mandatory-attendance requirement.
///
/// The solution must place the meeting at a slot where this member has no
/// conflict; if no such slot exists the hard model is infeasible. This is
/// independent of the soft key-attendee mechanism — both may apply to the
/// same (meeting, member) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedConstraint {
    /// The meeting that must be attended.
    pub meeting_id: String,
    /// The member who must attend it.
    pub member_id: String,
}

impl FixedConstraint {
    /// Creates a new fixed constraint.
    pub fn new(meeting_id: impl Into<String>, member_id: impl Into<String>) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            member_id: member_id.into(),
        }
    }
}

/// Input container for one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingProblem {
    /// The date range [week_start, week_end) being scheduled.
    pub week: TimeRange,
    /// Members, with busy intervals for the week.
    pub members: Vec<Member>,
    /// Meetings to place (inactive ones are skipped).
    pub meetings: Vec<Meeting>,
    /// Candidate windows from the potential-times collection.
    pub windows: Vec<Window>,
    /// Mandatory-attendance constraints.
    pub fixed_constraints: Vec<FixedConstraint>,
    /// Absence penalty weights.
    pub penalties: PenaltyConfig,
}

impl SchedulingProblem {
    /// Creates an empty problem for the given week.
    pub fn new(week: TimeRange) -> Self {
        Self {
            week,
            members: Vec::new(),
            meetings: Vec::new(),
            windows: Vec::new(),
            fixed_constraints: Vec::new(),
            penalties: PenaltyConfig::default(),
        }
    }

    /// Adds a member.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Adds a meeting.
    pub fn with_meeting(mut self, meeting: Meeting) -> Self {
        self.meetings.push(meeting);
        self
    }

    /// Adds a candidate window.
    pub fn with_window(mut self, window: Window) -> Self {
        self.windows.push(window);
        self
    }

    /// Adds a mandatory-attendance constraint.
    pub fn with_fixed_constraint(mut self, constraint: FixedConstraint) -> Self {
        self.fixed_constraints.push(constraint);
        self
    }

    /// Sets the penalty weights.
    pub fn with_penalties(mut self, penalties: PenaltyConfig) -> Self {
        self.penalties = penalties;
        self
    }

    /// Looks up a member by ID.
    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Looks up a meeting by ID.
    pub fn meeting(&self, meeting_id: &str) -> Option<&Meeting> {
        self.meetings.iter().find(|m| m.id == meeting_id)
    }

    /// Iterates over the meetings that enter the optimization.
    pub fn active_meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.meetings.iter().filter(|m| m.active)
    }

    /// IDs of members mandated to attend the given meeting.
    pub fn mandated_members(&self, meeting_id: &str) -> Vec<&str> {
        self.fixed_constraints
            .iter()
            .filter(|c| c.meeting_id == meeting_id)
            .map(|c| c.member_id.as_str())
            .collect()
    }
}
