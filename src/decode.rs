//! Schedule decoding and reporting.
//!
//! Reads the solver's optimal model back into domain terms and assembles
//! the run report. Before trusting the model, the decoder independently
//! re-verifies everything the encoding is supposed to guarantee: exactly
//! one slot per meeting, no overlapping sibling assignments, mandatory
//! attendance, attendance flags agreeing with busy intervals, and the
//! solver's cost agreeing with the recomputed penalty. Any failure is an
//! encoding defect and surfaces as
//! [`ScheduleError::InternalInvariantViolation`] — never as a scheduling
//! failure.

use tracing::info;

use crate::encoder::ScheduleModel;
use crate::error::{Result, ScheduleError};
use crate::models::{
    Absence, AbsenceTier, AttendanceStats, DoubleBooking, MeetingAssignment, MemberSummary,
    ScheduleReport, SchedulingProblem, Slot,
};
use crate::sat::OptimalModel;

fn invariant(detail: impl Into<String>) -> ScheduleError {
    ScheduleError::InternalInvariantViolation {
        detail: detail.into(),
    }
}

/// Decodes an optimal model into a [`ScheduleReport`].
pub(crate) fn decode_report(
    problem: &SchedulingProblem,
    slots: &[Slot],
    model: &ScheduleModel,
    optimal: &OptimalModel,
) -> Result<ScheduleReport> {
    // Exactly one chosen slot per meeting.
    let mut chosen: Vec<usize> = Vec::with_capacity(model.meeting_count());
    for (i, meeting_id) in model.meeting_ids().iter().enumerate() {
        let assigned: Vec<usize> = model
            .candidates(i)
            .iter()
            .filter(|c| optimal.value(c.var))
            .map(|c| c.slot_index)
            .collect();
        if assigned.len() != 1 {
            return Err(invariant(format!(
                "meeting '{}' decoded to {} slots instead of one",
                meeting_id,
                assigned.len()
            )));
        }
        chosen.push(assigned[0]);
    }

    // No two meetings on overlapping sibling slots.
    for i in 0..chosen.len() {
        for j in (i + 1)..chosen.len() {
            let (a, b) = (&slots[chosen[i]], &slots[chosen[j]]);
            if a.is_sibling_of(b) && a.range.overlaps(&b.range) {
                return Err(invariant(format!(
                    "meetings '{}' and '{}' share window '{}' at overlapping times",
                    model.meeting_ids()[i],
                    model.meeting_ids()[j],
                    a.window_id
                )));
            }
        }
    }

    // Mandated members must be free at the chosen slot.
    for constraint in &problem.fixed_constraints {
        let Some(i) = model
            .meeting_ids()
            .iter()
            .position(|id| *id == constraint.meeting_id)
        else {
            continue; // inactive meeting
        };
        if let Some(member) = problem.member(&constraint.member_id) {
            if !member.is_free_during(&slots[chosen[i]].range) {
                return Err(invariant(format!(
                    "mandated member '{}' has a conflict with the slot chosen for '{}'",
                    constraint.member_id, constraint.meeting_id
                )));
            }
        }
    }

    // Attendance read-back, cross-checked against busy intervals.
    let mut assignments = Vec::with_capacity(model.meeting_count());
    let mut stats = AttendanceStats::default();
    let mut total_penalty: u64 = 0;
    for (i, meeting_id) in model.meeting_ids().iter().enumerate() {
        let meeting = problem
            .meeting(meeting_id)
            .ok_or_else(|| invariant(format!("model references unknown meeting '{meeting_id}'")))?;
        let slot = slots[chosen[i]].clone();

        let mut attendees = Vec::new();
        let mut absences = Vec::new();
        for (member_id, attend_var) in model.attendance(i) {
            let member = problem
                .member(member_id)
                .ok_or_else(|| invariant(format!("model references unknown member '{member_id}'")))?;
            let decoded = optimal.value(*attend_var);
            if decoded != member.is_free_during(&slot.range) {
                return Err(invariant(format!(
                    "attendance flag for '{}' at '{}' disagrees with their busy intervals",
                    member_id, meeting_id
                )));
            }

            stats.expected += 1;
            if decoded {
                stats.present += 1;
                attendees.push(member_id.clone());
            } else {
                let tier = AbsenceTier::classify(meeting, member_id);
                let penalty = tier.penalty(&problem.penalties);
                total_penalty += penalty;
                absences.push(Absence {
                    member_id: member_id.clone(),
                    tier,
                    penalty,
                });
            }
        }

        assignments.push(MeetingAssignment {
            meeting_id: meeting_id.clone(),
            meeting_name: meeting.name.clone(),
            slot,
            attendees,
            absences,
        });
    }

    if total_penalty != optimal.cost() {
        return Err(invariant(format!(
            "recomputed penalty {} disagrees with solver cost {}",
            total_penalty,
            optimal.cost()
        )));
    }

    // Per-member summaries over the scheduled meetings.
    let members = problem
        .members
        .iter()
        .map(|member| {
            let mut attended = Vec::new();
            let mut missed = Vec::new();
            for a in &assignments {
                if a.attendees.iter().any(|m| *m == member.id) {
                    attended.push(a.meeting_id.clone());
                } else if a.absences.iter().any(|ab| ab.member_id == member.id) {
                    missed.push(a.meeting_id.clone());
                }
            }
            MemberSummary {
                member_id: member.id.clone(),
                attended,
                missed,
            }
        })
        .collect();

    // Residual double-bookings: a member attending two meetings whose slots
    // overlap. Possible across windows; reported, not forbidden.
    let mut double_bookings = Vec::new();
    for i in 0..assignments.len() {
        for j in (i + 1)..assignments.len() {
            if !assignments[i].slot.range.overlaps(&assignments[j].slot.range) {
                continue;
            }
            for member_id in &assignments[i].attendees {
                if assignments[j].attendees.contains(member_id) {
                    double_bookings.push(DoubleBooking {
                        member_id: member_id.clone(),
                        first_meeting: assignments[i].meeting_id.clone(),
                        second_meeting: assignments[j].meeting_id.clone(),
                    });
                }
            }
        }
    }

    info!(
        meetings = assignments.len(),
        penalty = total_penalty,
        "decoded optimal schedule"
    );

    Ok(ScheduleReport {
        week: problem.week,
        assignments,
        members,
        double_bookings,
        attendance: stats,
        total_penalty,
    })
}
