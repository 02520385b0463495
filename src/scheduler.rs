//! One-shot scheduling pipeline.
//!
//! Runs a complete scheduling pass: validate the problem, expand windows
//! into slots, build the weighted CNF model, solve it, and decode the
//! optimal model into a report. The scheduler is stateless across runs —
//! each call rebuilds everything from the problem it is handed.
//!
//! # Algorithm
//!
//! 1. [`validate_problem`] — reject structurally broken input up front.
//! 2. [`expand_windows`] — malformed windows are dropped with a warning.
//! 3. [`ModelBuilder::build`] — an empty problem short-circuits to an
//!    empty report (a no-op is not an error).
//! 4. Solve through the configured [`MaxSatSolver`].
//! 5. Decode, re-verify invariants, and assemble the report.
//!
//! Solving is a single blocking call with no timeout contract; callers
//! needing responsiveness should run it off their critical path and
//! abandon the attempt, discarding the instance.

use tracing::info;

use crate::decode::decode_report;
use crate::encoder::ModelBuilder;
use crate::error::{Result, ScheduleError};
use crate::models::{ScheduleReport, SchedulingProblem};
use crate::sat::{BranchBoundSolver, MaxSatSolver, SolveOutcome};
use crate::slots::{expand_windows, SlotPolicy};
use crate::validation::validate_problem;

/// Schedules meetings into candidate slots at minimal total penalty.
///
/// Generic over the solving backend; defaults to the bundled exact
/// [`BranchBoundSolver`].
///
/// # Example
///
/// ```
/// use meeting_scheduler::Scheduler;
/// use meeting_scheduler::models::{
///     Meeting, Member, SchedulingProblem, TimeRange, Window,
/// };
/// use chrono::{TimeZone, Utc};
///
/// let week = TimeRange::new(
///     Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap(),
/// );
/// let window = TimeRange::new(
///     Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
/// );
/// let problem = SchedulingProblem::new(week)
///     .with_member(Member::new("alice"))
///     .with_meeting(Meeting::new("standup").with_member("alice"))
///     .with_window(Window::new("w1", window));
///
/// let report = Scheduler::new().schedule(&problem).unwrap();
/// assert_eq!(report.assignment_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler<S = BranchBoundSolver> {
    policy: SlotPolicy,
    solver: S,
}

impl Scheduler<BranchBoundSolver> {
    /// Creates a scheduler with the default slot policy and the bundled
    /// exact solver.
    pub fn new() -> Self {
        Self {
            policy: SlotPolicy::default(),
            solver: BranchBoundSolver::new(),
        }
    }
}

impl Default for Scheduler<BranchBoundSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MaxSatSolver> Scheduler<S> {
    /// Sets the slot generation policy.
    pub fn with_policy(mut self, policy: SlotPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the solving backend.
    pub fn with_solver<T: MaxSatSolver>(self, solver: T) -> Scheduler<T> {
        Scheduler {
            policy: self.policy,
            solver,
        }
    }

    /// Runs one scheduling pass over the problem.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidProblem`] when input validation fails.
    /// - [`ScheduleError::InfeasibleHardConstraints`] when no schedule can
    ///   satisfy the hard rules; never silently relaxed.
    /// - [`ScheduleError::InternalInvariantViolation`] when the decoded
    ///   solution contradicts the encoding (a defect, not a user error).
    ///
    /// A problem with nothing to schedule returns an empty report.
    pub fn schedule(&self, problem: &SchedulingProblem) -> Result<ScheduleReport> {
        validate_problem(problem).map_err(|errors| ScheduleError::InvalidProblem { errors })?;

        let slots = expand_windows(&problem.windows, &self.policy);

        let model = match ModelBuilder::new(problem, &slots).build() {
            Ok(model) => model,
            Err(ScheduleError::EmptyProblem) => {
                info!("nothing to schedule; returning empty report");
                return Ok(ScheduleReport::empty(problem.week));
            }
            Err(e) => return Err(e),
        };

        match self.solver.solve(model.formula()) {
            SolveOutcome::Optimal(optimal) => decode_report(problem, &slots, &model, &optimal),
            SolveOutcome::Infeasible => Err(ScheduleError::InfeasibleHardConstraints {
                reason: "the hard clause set is unsatisfiable".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AbsenceTier, FixedConstraint, Meeting, Member, PenaltyConfig, TimeRange, Window,
    };
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    fn range(h1: u32, h2: u32) -> TimeRange {
        TimeRange::new(at(h1), at(h2))
    }

    fn week() -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap(),
        )
    }

    /// The reference scenario: a busy 9–10, b free, c busy 13–14; one
    /// window 9:00–12:00; one meeting requiring all three with c as key
    /// attendee.
    fn reference_problem(window: TimeRange) -> SchedulingProblem {
        SchedulingProblem::new(week())
            .with_member(Member::new("a").with_busy(range(9, 10)))
            .with_member(Member::new("b"))
            .with_member(Member::new("c").with_busy(range(13, 14)))
            .with_meeting(
                Meeting::new("m1")
                    .with_members(["a", "b", "c"])
                    .with_key_attendee("c"),
            )
            .with_window(Window::new("w1", window))
            .with_penalties(
                PenaltyConfig::new()
                    .with_key_attendee_absence(100)
                    .with_required_member_absence(1),
            )
    }

    #[test]
    fn test_reference_scenario_full_window() {
        let report = Scheduler::new()
            .schedule(&reference_problem(range(9, 12)))
            .unwrap();

        let assignment = report.assignment_for("m1").unwrap();
        assert_eq!(assignment.slot.range, range(10, 11));
        assert_eq!(report.total_penalty, 0);
        assert_eq!(assignment.attendees.len(), 3);
    }

    #[test]
    fn test_reference_scenario_narrow_window() {
        let report = Scheduler::new()
            .schedule(&reference_problem(range(9, 10)))
            .unwrap();

        let assignment = report.assignment_for("m1").unwrap();
        assert_eq!(assignment.slot.range, range(9, 10));
        assert_eq!(report.total_penalty, 1);
        assert_eq!(assignment.absences.len(), 1);
        assert_eq!(assignment.absences[0].member_id, "a");
        assert_eq!(assignment.absences[0].tier, AbsenceTier::Ordinary);
    }

    #[test]
    fn test_exactly_one_slot_per_meeting() {
        let problem = SchedulingProblem::new(week())
            .with_member(Member::new("a"))
            .with_meeting(Meeting::new("m1").with_member("a"))
            .with_meeting(Meeting::new("m2").with_member("a"))
            .with_meeting(Meeting::new("m3").with_member("a"))
            .with_window(Window::new("w1", range(9, 12)));

        let report = Scheduler::new().schedule(&problem).unwrap();
        assert_eq!(report.assignment_count(), 3);
        for id in ["m1", "m2", "m3"] {
            assert!(report.assignment_for(id).is_some());
        }
    }

    #[test]
    fn test_intra_window_exclusion() {
        // Two meetings, one window with two slots: they must not collide.
        let problem = SchedulingProblem::new(week())
            .with_member(Member::new("a"))
            .with_meeting(Meeting::new("m1").with_member("a"))
            .with_meeting(Meeting::new("m2").with_member("a"))
            .with_window(Window::new("w1", range(9, 11)));

        let report = Scheduler::new().schedule(&problem).unwrap();
        let s1 = &report.assignment_for("m1").unwrap().slot;
        let s2 = &report.assignment_for("m2").unwrap().slot;
        assert!(!s1.range.overlaps(&s2.range));
    }

    #[test]
    fn test_cross_window_coincidence_is_legitimate() {
        // Identical ranges in different windows: both meetings schedule,
        // and the shared member's clash is reported as a double-booking.
        let problem = SchedulingProblem::new(week())
            .with_member(Member::new("a"))
            .with_meeting(Meeting::new("m1").with_member("a"))
            .with_meeting(Meeting::new("m2").with_member("a"))
            .with_window(Window::new("w1", range(9, 10)))
            .with_window(Window::new("w2", range(9, 10)));

        let report = Scheduler::new().schedule(&problem).unwrap();
        assert_eq!(report.assignment_count(), 2);
        assert_eq!(report.double_bookings.len(), 1);
        assert_eq!(report.double_bookings[0].member_id, "a");
    }

    #[test]
    fn test_mandatory_attendance_is_honored() {
        let problem = reference_problem(range(9, 12))
            .with_fixed_constraint(FixedConstraint::new("m1", "a"));

        let report = Scheduler::new().schedule(&problem).unwrap();
        let slot = &report.assignment_for("m1").unwrap().slot;
        // a is busy 9–10; the mandate keeps the meeting off that slot.
        assert!(!slot.range.overlaps(&range(9, 10)));
    }

    #[test]
    fn test_disjoint_mandates_are_infeasible() {
        // a and b are both mandated but share no free slot in the window.
        let problem = SchedulingProblem::new(week())
            .with_member(Member::new("a").with_busy(range(9, 10)))
            .with_member(Member::new("b").with_busy(range(10, 11)))
            .with_meeting(Meeting::new("m1").with_members(["a", "b"]))
            .with_window(Window::new("w1", range(9, 11)))
            .with_fixed_constraint(FixedConstraint::new("m1", "a"))
            .with_fixed_constraint(FixedConstraint::new("m1", "b"));

        let err = Scheduler::new().schedule(&problem).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InfeasibleHardConstraints { .. }
        ));
    }

    #[test]
    fn test_raising_key_attendee_weight_never_loses_key_attendance() {
        // a is free only at 9:00, key attendee b only at 10:00; the slot
        // choice trades one absence for the other.
        let problem_with_weight = |weight: u64| {
            SchedulingProblem::new(week())
                .with_member(Member::new("a").with_busy(range(10, 11)))
                .with_member(Member::new("b").with_busy(range(9, 10)))
                .with_meeting(
                    Meeting::new("m1")
                        .with_members(["a", "b"])
                        .with_key_attendee("b"),
                )
                .with_window(Window::new("w1", range(9, 11)))
                .with_penalties(
                    PenaltyConfig::new()
                        .with_key_attendee_absence(weight)
                        .with_required_member_absence(1),
                )
        };

        let key_attending = |weight: u64| -> usize {
            let report = Scheduler::new()
                .schedule(&problem_with_weight(weight))
                .unwrap();
            let assignment = report.assignment_for("m1").unwrap();
            usize::from(assignment.attendees.iter().any(|m| m == "b"))
        };

        let low = key_attending(0);
        let high = key_attending(100);
        assert!(high >= low);
        assert_eq!(high, 1); // at weight 100 the 10:00 slot wins
    }

    #[test]
    fn test_resolving_keeps_the_optimal_cost() {
        let scheduler = Scheduler::new();
        let problem = reference_problem(range(9, 10));

        let first = scheduler.schedule(&problem).unwrap();
        let second = scheduler.schedule(&problem).unwrap();
        assert_eq!(first.total_penalty, second.total_penalty);
    }

    #[test]
    fn test_empty_problem_is_a_noop_report() {
        let problem = SchedulingProblem::new(week());
        let report = Scheduler::new().schedule(&problem).unwrap();
        assert!(report.is_empty());

        // Meetings exist but there are no candidate windows at all.
        let problem = SchedulingProblem::new(week())
            .with_member(Member::new("a"))
            .with_meeting(Meeting::new("m1").with_member("a"));
        let report = Scheduler::new().schedule(&problem).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_inactive_meetings_do_not_schedule() {
        let problem = SchedulingProblem::new(week())
            .with_member(Member::new("a"))
            .with_meeting(Meeting::new("m1").with_member("a"))
            .with_meeting(Meeting::new("m2").with_member("a").inactive())
            .with_window(Window::new("w1", range(9, 12)));

        let report = Scheduler::new().schedule(&problem).unwrap();
        assert_eq!(report.assignment_count(), 1);
        assert!(report.assignment_for("m2").is_none());
    }

    #[test]
    fn test_invalid_problem_is_rejected() {
        let problem = SchedulingProblem::new(week())
            .with_meeting(Meeting::new("m1").with_member("ghost"))
            .with_window(Window::new("w1", range(9, 12)));

        let err = Scheduler::new().schedule(&problem).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidProblem { .. }));
    }

    #[test]
    fn test_malformed_window_is_dropped_not_fatal() {
        let problem = SchedulingProblem::new(week())
            .with_member(Member::new("a"))
            .with_meeting(Meeting::new("m1").with_member("a"))
            .with_window(Window::new("bad", range(12, 9)))
            .with_window(Window::new("good", range(9, 10)));

        let report = Scheduler::new().schedule(&problem).unwrap();
        assert_eq!(report.assignment_for("m1").unwrap().slot.window_id, "good");
    }

    #[test]
    fn test_key_meeting_outranks_ordinary_meeting() {
        // One free slot each can't be given to both meetings; the key
        // meeting gets the slot where the shared member can attend.
        let problem = SchedulingProblem::new(week())
            .with_member(Member::new("a").with_busy(range(10, 11)))
            .with_meeting(Meeting::new("routine").with_member("a"))
            .with_meeting(Meeting::new("board").with_member("a").key())
            .with_window(Window::new("w1", range(9, 11)));

        let report = Scheduler::new().schedule(&problem).unwrap();
        let board = report.assignment_for("board").unwrap();
        assert_eq!(board.slot.range, range(9, 10));
        assert!(board.absences.is_empty());

        let routine = report.assignment_for("routine").unwrap();
        assert_eq!(routine.absences.len(), 1);
        assert_eq!(report.total_penalty, 1);
    }

    #[test]
    fn test_report_serializes() {
        let report = Scheduler::new()
            .schedule(&reference_problem(range(9, 12)))
            .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: ScheduleReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_penalty, report.total_penalty);
        assert_eq!(back.assignment_count(), report.assignment_count());
    }
}
