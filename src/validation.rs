//! Input validation for scheduling problems.
//!
//! Checks structural integrity of a problem before model construction.
//! Detects:
//! - Duplicate IDs (members, meetings, windows)
//! - Meetings referencing unknown or repeated members
//! - Key attendees that are not required members of their meeting
//! - Fixed constraints referencing unknown meetings/members, or members
//!   the meeting does not require
//! - An inverted week range
//!
//! All errors are collected and reported together, not first-error-only.

use crate::models::SchedulingProblem;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A meeting or constraint references a member that doesn't exist.
    UnknownMember,
    /// A constraint references a meeting that doesn't exist.
    UnknownMeeting,
    /// A key attendee is not among the meeting's required members.
    KeyAttendeeNotRequired,
    /// A fixed constraint mandates a member the meeting does not require.
    MandateNotRequired,
    /// A meeting has no required members.
    EmptyMeeting,
    /// The week range is empty or inverted.
    InvalidWeek,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a scheduling problem.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &SchedulingProblem) -> ValidationResult {
    let mut errors = Vec::new();

    if !problem.week.is_well_formed() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWeek,
            "week end is not after week start",
        ));
    }

    // Collect member IDs
    let mut member_ids = HashSet::new();
    for m in &problem.members {
        if !member_ids.insert(m.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate member ID: {}", m.id),
            ));
        }
    }

    // Collect meeting IDs and check member references
    let mut meeting_ids = HashSet::new();
    for meeting in &problem.meetings {
        if !meeting_ids.insert(meeting.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate meeting ID: {}", meeting.id),
            ));
        }

        if meeting.members.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyMeeting,
                format!("Meeting '{}' has no required members", meeting.id),
            ));
        }

        let mut seen = HashSet::new();
        for member_id in &meeting.members {
            if !member_ids.contains(member_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownMember,
                    format!(
                        "Meeting '{}' references unknown member '{}'",
                        meeting.id, member_id
                    ),
                ));
            }
            if !seen.insert(member_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!(
                        "Meeting '{}' lists member '{}' more than once",
                        meeting.id, member_id
                    ),
                ));
            }
        }

        for key in &meeting.key_attendees {
            if !meeting.requires(key) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::KeyAttendeeNotRequired,
                    format!(
                        "Key attendee '{}' is not a required member of meeting '{}'",
                        key, meeting.id
                    ),
                ));
            }
        }
    }

    // Window IDs
    let mut window_ids = HashSet::new();
    for w in &problem.windows {
        if !window_ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate window ID: {}", w.id),
            ));
        }
    }

    // Fixed constraints
    for c in &problem.fixed_constraints {
        if !member_ids.contains(c.member_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownMember,
                format!("Fixed constraint references unknown member '{}'", c.member_id),
            ));
        }
        match problem.meeting(&c.meeting_id) {
            None => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownMeeting,
                    format!(
                        "Fixed constraint references unknown meeting '{}'",
                        c.meeting_id
                    ),
                ));
            }
            Some(meeting) => {
                if member_ids.contains(c.member_id.as_str()) && !meeting.requires(&c.member_id) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::MandateNotRequired,
                        format!(
                            "Fixed constraint mandates '{}' who is not required by meeting '{}'",
                            c.member_id, c.meeting_id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedConstraint, Meeting, Member, SchedulingProblem, TimeRange, Window};
    use chrono::{TimeZone, Utc};

    fn week() -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap(),
        )
    }

    fn sample_problem() -> SchedulingProblem {
        SchedulingProblem::new(week())
            .with_member(Member::new("alice"))
            .with_member(Member::new("bob"))
            .with_meeting(
                Meeting::new("standup")
                    .with_members(["alice", "bob"])
                    .with_key_attendee("alice"),
            )
            .with_window(Window::new(
                "w1",
                TimeRange::new(
                    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
                    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
                ),
            ))
    }

    #[test]
    fn test_valid_problem() {
        assert!(validate_problem(&sample_problem()).is_ok());
    }

    #[test]
    fn test_duplicate_member_id() {
        let p = sample_problem().with_member(Member::new("alice"));
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("alice")));
    }

    #[test]
    fn test_unknown_member_in_meeting() {
        let p = sample_problem().with_meeting(Meeting::new("retro").with_member("nobody"));
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownMember));
    }

    #[test]
    fn test_key_attendee_must_be_required() {
        let p = sample_problem().with_meeting(
            Meeting::new("retro")
                .with_member("alice")
                .with_key_attendee("bob"),
        );
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::KeyAttendeeNotRequired));
    }

    #[test]
    fn test_fixed_constraint_references() {
        let p = sample_problem()
            .with_fixed_constraint(FixedConstraint::new("nope", "alice"))
            .with_fixed_constraint(FixedConstraint::new("standup", "nobody"));
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownMeeting));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownMember));
    }

    #[test]
    fn test_mandate_must_be_required_member() {
        let p = sample_problem()
            .with_meeting(Meeting::new("retro").with_member("alice"))
            .with_fixed_constraint(FixedConstraint::new("retro", "bob"));
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MandateNotRequired));
    }

    #[test]
    fn test_empty_meeting() {
        let p = sample_problem().with_meeting(Meeting::new("empty"));
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyMeeting));
    }

    #[test]
    fn test_inverted_week() {
        let mut p = sample_problem();
        std::mem::swap(&mut p.week.start, &mut p.week.end);
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidWeek));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let p = sample_problem()
            .with_meeting(Meeting::new("empty"))
            .with_fixed_constraint(FixedConstraint::new("nope", "nobody"));
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
