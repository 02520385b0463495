//! Error types for scheduling runs.
//!
//! Infeasibility is a first-class, caller-visible outcome: the builder and
//! decoder never relax a hard constraint to recover. An empty problem is
//! the one failure mode the pipeline converts back into a success (an
//! empty report).

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors that can occur while building, solving, or decoding a schedule.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A candidate window has malformed timing (end not after start).
    ///
    /// Recoverable: the orchestrator drops the window with a warning and
    /// continues with the rest.
    #[error("invalid window '{window_id}': {reason}")]
    InvalidWindow {
        /// The offending window.
        window_id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The problem failed input validation before model construction.
    #[error("problem validation failed with {} error(s)", .errors.len())]
    InvalidProblem {
        /// All detected integrity errors.
        errors: Vec<ValidationError>,
    },

    /// Nothing to schedule: no active meetings, or no candidate slots in
    /// the week. Surfaced to callers as an empty report, not an error.
    #[error("nothing to schedule: no active meetings or candidate slots")]
    EmptyProblem,

    /// The hard constraints admit no schedule. Never silently relaxed.
    #[error("hard constraints are infeasible: {reason}")]
    InfeasibleHardConstraints {
        /// The most specific available description of the conflict.
        reason: String,
    },

    /// A decoded solution violated an invariant the encoding guarantees.
    /// Indicates an encoding defect; always fatal.
    #[error("internal invariant violated: {detail}")]
    InternalInvariantViolation {
        /// What check failed.
        detail: String,
    },
}
