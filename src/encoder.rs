//! Constraint model builder.
//!
//! Translates a scheduling problem plus its generated slots into a
//! weighted CNF instance:
//!
//! - `assign[m, s]` variables place meeting `m` at candidate slot `s`;
//!   candidates are the slots inside the scheduling week that also satisfy
//!   every mandatory-attendance constraint on `m` (restricting candidates
//!   is equivalent to forbidding the mandated-conflict assignments, and
//!   makes an emptied candidate set directly attributable).
//! - `attend[m, mem]` variables are tied to `assign` by a hard CNF
//!   equivalence: the member attends iff the chosen slot avoids their busy
//!   intervals. Keeping the linkage declarative leaves the whole problem
//!   solver-checkable.
//! - Hard clauses enforce exactly one slot per meeting and mutual
//!   exclusion between overlapping sibling slots. Exclusion is generated
//!   strictly within each window's own slot set: separate windows are
//!   independently authorized pools, so coincident times across windows
//!   are never constrained.
//! - Soft unit clauses on `attend` price each potential absence at its
//!   tier weight; the key-meeting tier stacks on the key-attendee tier.
//!
//! Exactly-one uses the pairwise at-most-one encoding — candidate counts
//! per meeting are small enough that auxiliary-variable encodings would
//! not pay for themselves.
//!
//! # References
//!
//! - Sinz (2005), "Towards an Optimal CNF Encoding of Boolean Cardinality
//!   Constraints"
//! - Biere et al. (2021), "Handbook of Satisfiability", Ch. 2 (encodings)

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::models::{AbsenceTier, Member, SchedulingProblem, Slot};
use crate::sat::{Lit, Var, WcnfFormula};

/// An `assign` variable together with the slot it places the meeting at.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    /// Index into the slot list the model was built from.
    pub slot_index: usize,
    /// The assignment variable.
    pub var: Var,
}

/// The encoded instance plus the bookkeeping needed to decode a solution.
#[derive(Debug)]
pub struct ScheduleModel {
    formula: WcnfFormula,
    meeting_ids: Vec<String>,
    candidates: Vec<Vec<Candidate>>,
    attendance: Vec<Vec<(String, Var)>>,
}

impl ScheduleModel {
    /// The weighted CNF instance.
    pub fn formula(&self) -> &WcnfFormula {
        &self.formula
    }

    /// IDs of the active meetings, in model order.
    pub fn meeting_ids(&self) -> &[String] {
        &self.meeting_ids
    }

    /// Candidate slots for the `i`-th active meeting.
    pub fn candidates(&self, i: usize) -> &[Candidate] {
        &self.candidates[i]
    }

    /// `(member_id, attend_var)` pairs for the `i`-th active meeting.
    pub fn attendance(&self, i: usize) -> &[(String, Var)] {
        &self.attendance[i]
    }

    /// Number of active meetings in the model.
    pub fn meeting_count(&self) -> usize {
        self.meeting_ids.len()
    }
}

/// Builds a weighted CNF model from scheduling domain objects.
///
/// The builder assumes a problem that passed
/// [`validate_problem`](crate::validation::validate_problem); dangling
/// member references are ignored rather than re-reported here.
pub struct ModelBuilder<'a> {
    problem: &'a SchedulingProblem,
    slots: &'a [Slot],
}

impl<'a> ModelBuilder<'a> {
    /// Creates a new builder over a problem and its generated slots.
    pub fn new(problem: &'a SchedulingProblem, slots: &'a [Slot]) -> Self {
        Self { problem, slots }
    }

    /// Builds the weighted CNF instance.
    ///
    /// # Errors
    /// - [`ScheduleError::EmptyProblem`] when there are no active meetings
    ///   or no candidate slots inside the week at all.
    /// - [`ScheduleError::InfeasibleHardConstraints`] when a meeting's
    ///   candidate set is empty — in particular when mandatory attendance
    ///   filters away every slot.
    pub fn build(&self) -> Result<ScheduleModel> {
        let active: Vec<_> = self.problem.active_meetings().collect();
        if active.is_empty() {
            return Err(ScheduleError::EmptyProblem);
        }

        let week_slots: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| self.problem.week.encloses(&s.range))
            .map(|(i, _)| i)
            .collect();
        if week_slots.is_empty() {
            return Err(ScheduleError::EmptyProblem);
        }

        let mut formula = WcnfFormula::new();
        let mut meeting_ids = Vec::with_capacity(active.len());
        let mut candidates: Vec<Vec<Candidate>> = Vec::with_capacity(active.len());

        // Assignment variables over mandate-filtered candidate slots.
        for meeting in &active {
            let mandated: Vec<&Member> = self
                .problem
                .mandated_members(&meeting.id)
                .into_iter()
                .filter_map(|id| self.problem.member(id))
                .collect();

            let meeting_candidates: Vec<Candidate> = week_slots
                .iter()
                .copied()
                .filter(|&si| {
                    mandated
                        .iter()
                        .all(|m| m.is_free_during(&self.slots[si].range))
                })
                .map(|slot_index| Candidate {
                    slot_index,
                    var: formula.new_var(),
                })
                .collect();

            if meeting_candidates.is_empty() {
                let reason = if mandated.is_empty() {
                    format!(
                        "meeting '{}' has no candidate slot in the scheduling week",
                        meeting.id
                    )
                } else {
                    let names: Vec<&str> = mandated.iter().map(|m| m.id.as_str()).collect();
                    format!(
                        "meeting '{}' has no candidate slot where mandated member(s) [{}] are free",
                        meeting.id,
                        names.join(", ")
                    )
                };
                return Err(ScheduleError::InfeasibleHardConstraints { reason });
            }

            meeting_ids.push(meeting.id.clone());
            candidates.push(meeting_candidates);
        }

        // Exactly one slot per meeting: at-least-one + pairwise at-most-one.
        for meeting_candidates in &candidates {
            formula.add_hard(meeting_candidates.iter().map(|c| Lit::pos(c.var)).collect());
            for x in 0..meeting_candidates.len() {
                for y in (x + 1)..meeting_candidates.len() {
                    formula.add_hard(vec![
                        Lit::neg(meeting_candidates[x].var),
                        Lit::neg(meeting_candidates[y].var),
                    ]);
                }
            }
        }

        // Intra-window exclusion, scoped per window's own slot set.
        let mut users: BTreeMap<usize, Vec<(usize, Var)>> = BTreeMap::new();
        for (m, meeting_candidates) in candidates.iter().enumerate() {
            for c in meeting_candidates {
                users.entry(c.slot_index).or_default().push((m, c.var));
            }
        }
        let mut by_window: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for &si in users.keys() {
            by_window
                .entry(self.slots[si].window_id.as_str())
                .or_default()
                .push(si);
        }
        for slot_indices in by_window.values() {
            for (pos, &si) in slot_indices.iter().enumerate() {
                let here = &users[&si];

                // At most one meeting in this exact slot.
                for x in 0..here.len() {
                    for y in (x + 1)..here.len() {
                        formula.add_hard(vec![Lit::neg(here[x].1), Lit::neg(here[y].1)]);
                    }
                }

                // Distinct overlapping sibling slots exclude each other.
                for &sj in &slot_indices[pos + 1..] {
                    if !self.slots[si].range.overlaps(&self.slots[sj].range) {
                        continue;
                    }
                    for &(m1, v1) in here {
                        for &(m2, v2) in &users[&sj] {
                            if m1 != m2 {
                                formula.add_hard(vec![Lit::neg(v1), Lit::neg(v2)]);
                            }
                        }
                    }
                }
            }
        }

        // Attendance linkage and tiered soft absence penalties.
        let mut attendance: Vec<Vec<(String, Var)>> = Vec::with_capacity(active.len());
        for (m, meeting) in active.iter().enumerate() {
            let mut meeting_attendance = Vec::new();
            for member in meeting.members.iter().filter_map(|id| self.problem.member(id)) {
                let attend = formula.new_var();

                let free: Vec<Var> = candidates[m]
                    .iter()
                    .filter(|c| member.is_free_during(&self.slots[c.slot_index].range))
                    .map(|c| c.var)
                    .collect();

                // attend → some free slot is chosen (unit ¬attend when none).
                let mut clause = vec![Lit::neg(attend)];
                clause.extend(free.iter().map(|&v| Lit::pos(v)));
                formula.add_hard(clause);
                // chosen free slot → attend.
                for &v in &free {
                    formula.add_hard(vec![Lit::neg(v), Lit::pos(attend)]);
                }

                let tier = AbsenceTier::classify(meeting, &member.id);
                let weight = tier.penalty(&self.problem.penalties);
                if weight > 0 {
                    formula.add_soft(weight, vec![Lit::pos(attend)]);
                }

                meeting_attendance.push((member.id.clone(), attend));
            }
            attendance.push(meeting_attendance);
        }

        debug!(
            meetings = meeting_ids.len(),
            vars = formula.num_vars(),
            hard = formula.hard().len(),
            soft = formula.soft().len(),
            "built scheduling model"
        );

        Ok(ScheduleModel {
            formula,
            meeting_ids,
            candidates,
            attendance,
        })
    }
}
