//! Exact branch-and-bound weighted-MaxSAT backend.
//!
//! # Algorithm
//!
//! Depth-first search over variable assignments with unit propagation on
//! the hard clauses and an admissible lower bound: the total weight of
//! soft clauses already falsified by the partial assignment. A branch is
//! pruned when its bound reaches the best complete solution found so far;
//! a falsified hard clause prunes immediately. The search is exhaustive,
//! so the returned cost is the global minimum, and branching order is
//! deterministic (ascending variable index, `true` first), so repeated
//! solves of one instance return identical results.
//!
//! Weekly scheduling instances stay small (meetings × slots plus one
//! attendance variable per required member), well within what exhaustive
//! search handles instantly.
//!
//! # References
//!
//! - Davis, Putnam, Logemann, Loveland (1962), "A machine program for
//!   theorem-proving"
//! - Li & Manyà (2021), "MaxSAT, Hard and Soft Constraints", Handbook of
//!   Satisfiability Ch. 23 (branch-and-bound MaxSAT)

use super::{Lit, MaxSatSolver, OptimalModel, SolveOutcome, WcnfFormula};

/// Exact DPLL-style branch-and-bound solver.
#[derive(Debug, Clone, Default)]
pub struct BranchBoundSolver;

impl BranchBoundSolver {
    /// Creates a new solver.
    pub fn new() -> Self {
        Self
    }
}

impl MaxSatSolver for BranchBoundSolver {
    fn solve(&self, formula: &WcnfFormula) -> SolveOutcome {
        Search::new(formula).run()
    }
}

struct Search<'a> {
    formula: &'a WcnfFormula,
    values: Vec<Option<bool>>,
    best: Option<(Vec<bool>, u64)>,
}

impl<'a> Search<'a> {
    fn new(formula: &'a WcnfFormula) -> Self {
        Self {
            formula,
            values: vec![None; formula.num_vars()],
            best: None,
        }
    }

    fn run(mut self) -> SolveOutcome {
        self.explore();
        match self.best {
            Some((values, cost)) => SolveOutcome::Optimal(OptimalModel::new(values, cost)),
            None => SolveOutcome::Infeasible,
        }
    }

    fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.values[lit.var().index()].map(|v| v == lit.is_positive())
    }

    /// Unit propagation over hard clauses to fixpoint.
    ///
    /// Assigned variables are pushed onto `trail`; returns `false` when a
    /// hard clause is fully falsified.
    fn propagate(&mut self, trail: &mut Vec<usize>) -> bool {
        let formula = self.formula;
        loop {
            let mut changed = false;
            for clause in formula.hard() {
                let mut satisfied = false;
                let mut unassigned = None;
                let mut unassigned_count = 0;
                for &lit in clause {
                    match self.lit_value(lit) {
                        Some(true) => {
                            satisfied = true;
                            break;
                        }
                        Some(false) => {}
                        None => {
                            unassigned_count += 1;
                            unassigned = Some(lit);
                        }
                    }
                }
                if satisfied {
                    continue;
                }
                if unassigned_count == 0 {
                    return false;
                }
                if unassigned_count == 1 {
                    if let Some(lit) = unassigned {
                        self.values[lit.var().index()] = Some(lit.is_positive());
                        trail.push(lit.var().index());
                        changed = true;
                    }
                }
            }
            if !changed {
                return true;
            }
        }
    }

    /// Total weight of soft clauses falsified by the current partial
    /// assignment. Admissible: extending the assignment can only add.
    fn falsified_soft_weight(&self) -> u64 {
        self.formula
            .soft()
            .iter()
            .filter(|s| s.clause.iter().all(|&l| self.lit_value(l) == Some(false)))
            .map(|s| s.weight)
            .sum()
    }

    fn next_unassigned(&self) -> Option<usize> {
        self.values.iter().position(|v| v.is_none())
    }

    fn undo(&mut self, trail: &[usize]) {
        for &index in trail {
            self.values[index] = None;
        }
    }

    fn explore(&mut self) {
        let mut trail = Vec::new();
        if !self.propagate(&mut trail) {
            self.undo(&trail);
            return;
        }

        let lower_bound = self.falsified_soft_weight();
        if let Some((_, best_cost)) = &self.best {
            if lower_bound >= *best_cost {
                self.undo(&trail);
                return;
            }
        }

        match self.next_unassigned() {
            None => {
                // Complete assignment; propagation guarantees every hard
                // clause holds, so the bound is the exact cost.
                let model = self.values.iter().map(|v| v.unwrap_or(false)).collect();
                self.best = Some((model, lower_bound));
            }
            Some(index) => {
                for value in [true, false] {
                    self.values[index] = Some(value);
                    self.explore();
                    self.values[index] = None;
                }
            }
        }

        self.undo(&trail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::Var;

    fn vars(f: &mut WcnfFormula, n: usize) -> Vec<Var> {
        (0..n).map(|_| f.new_var()).collect()
    }

    fn solve(f: &WcnfFormula) -> SolveOutcome {
        BranchBoundSolver::new().solve(f)
    }

    #[test]
    fn test_trivially_satisfiable() {
        let mut f = WcnfFormula::new();
        let v = vars(&mut f, 1);
        f.add_hard(vec![Lit::pos(v[0])]);

        match solve(&f) {
            SolveOutcome::Optimal(m) => {
                assert!(m.value(v[0]));
                assert_eq!(m.cost(), 0);
            }
            SolveOutcome::Infeasible => panic!("expected optimal"),
        }
    }

    #[test]
    fn test_infeasible_hard_clauses() {
        let mut f = WcnfFormula::new();
        let v = vars(&mut f, 1);
        f.add_hard(vec![Lit::pos(v[0])]);
        f.add_hard(vec![Lit::neg(v[0])]);

        assert!(matches!(solve(&f), SolveOutcome::Infeasible));
    }

    #[test]
    fn test_unit_propagation_chain() {
        let mut f = WcnfFormula::new();
        let v = vars(&mut f, 3);
        f.add_hard(vec![Lit::pos(v[0])]);
        f.add_hard(vec![Lit::neg(v[0]), Lit::pos(v[1])]);
        f.add_hard(vec![Lit::neg(v[1]), Lit::pos(v[2])]);

        match solve(&f) {
            SolveOutcome::Optimal(m) => {
                assert!(m.value(v[0]) && m.value(v[1]) && m.value(v[2]));
            }
            SolveOutcome::Infeasible => panic!("expected optimal"),
        }
    }

    #[test]
    fn test_minimizes_weighted_cost() {
        // Exactly one of x, y; violating [x] costs 3, violating [y] costs 1.
        let mut f = WcnfFormula::new();
        let v = vars(&mut f, 2);
        f.add_hard(vec![Lit::pos(v[0]), Lit::pos(v[1])]);
        f.add_hard(vec![Lit::neg(v[0]), Lit::neg(v[1])]);
        f.add_soft(3, vec![Lit::pos(v[0])]);
        f.add_soft(1, vec![Lit::pos(v[1])]);

        match solve(&f) {
            SolveOutcome::Optimal(m) => {
                assert!(m.value(v[0]));
                assert!(!m.value(v[1]));
                assert_eq!(m.cost(), 1);
            }
            SolveOutcome::Infeasible => panic!("expected optimal"),
        }
    }

    #[test]
    fn test_not_fooled_by_branch_order() {
        // Branching tries `true` first, but the optimum is x = false.
        let mut f = WcnfFormula::new();
        let v = vars(&mut f, 1);
        f.add_soft(2, vec![Lit::neg(v[0])]);

        match solve(&f) {
            SolveOutcome::Optimal(m) => {
                assert!(!m.value(v[0]));
                assert_eq!(m.cost(), 0);
            }
            SolveOutcome::Infeasible => panic!("expected optimal"),
        }
    }

    #[test]
    fn test_unavoidable_cost() {
        // Soft clauses demand both polarities; one must be violated.
        let mut f = WcnfFormula::new();
        let v = vars(&mut f, 1);
        f.add_soft(5, vec![Lit::pos(v[0])]);
        f.add_soft(2, vec![Lit::neg(v[0])]);

        match solve(&f) {
            SolveOutcome::Optimal(m) => {
                assert!(m.value(v[0]));
                assert_eq!(m.cost(), 2);
            }
            SolveOutcome::Infeasible => panic!("expected optimal"),
        }
    }

    #[test]
    fn test_empty_formula() {
        let f = WcnfFormula::new();
        match solve(&f) {
            SolveOutcome::Optimal(m) => assert_eq!(m.cost(), 0),
            SolveOutcome::Infeasible => panic!("empty formula is satisfiable"),
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let mut f = WcnfFormula::new();
        let v = vars(&mut f, 3);
        f.add_hard(vec![Lit::pos(v[0]), Lit::pos(v[1]), Lit::pos(v[2])]);
        f.add_soft(1, vec![Lit::neg(v[0])]);
        f.add_soft(1, vec![Lit::neg(v[1])]);

        let (first, second) = (solve(&f), solve(&f));
        match (first, second) {
            (SolveOutcome::Optimal(a), SolveOutcome::Optimal(b)) => {
                assert_eq!(a.cost(), b.cost());
                for &var in &v {
                    assert_eq!(a.value(var), b.value(var));
                }
            }
            _ => panic!("expected optimal twice"),
        }
    }
}
