//! Meeting scheduling over organization-approved time windows.
//!
//! Assigns a set of recurring meetings to concrete one-hour slots drawn from
//! candidate windows, subject to hard feasibility rules (one slot per meeting,
//! no double-use of a window, mandatory attendance) and soft, weighted
//! absence penalties. The optimizer is exact: it returns a schedule of
//! globally minimal total penalty or proves that the hard rules admit no
//! schedule at all.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Member`, `Meeting`, `Window`, `Slot`,
//!   `TimeRange`, `PenaltyConfig`, `SchedulingProblem`, `ScheduleReport`
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling references)
//! - **`slots`**: Window → slot expansion under a configurable `SlotPolicy`
//! - **`encoder`**: Domain model → weighted CNF (the constraint model builder)
//! - **`sat`**: WCNF formula types, the `MaxSatSolver` seam, and the bundled
//!   exact branch-and-bound backend
//! - **`scheduler`**: One-shot pipeline — validate, expand, encode, solve, decode
//! - **`error`**: The `ScheduleError` taxonomy
//!
//! # Architecture
//!
//! Data flows strictly downward: problem → slots → WCNF → solver → report.
//! Nothing is cached between runs; every invocation rebuilds the model from
//! scratch from an immutable [`models::SchedulingProblem`]. Calendar I/O,
//! authentication, and configuration file parsing are the caller's concern —
//! this crate consumes and produces in-process data only.
//!
//! # References
//!
//! - Biere, Heule, van Maaren, Walsh (2021), "Handbook of Satisfiability", 2nd ed.
//! - Li & Manyà (2021), "MaxSAT, Hard and Soft Constraints" (Handbook Ch. 23)

pub mod encoder;
pub mod error;
pub mod models;
pub mod sat;
pub mod scheduler;
pub mod slots;
pub mod validation;

mod decode;

pub use error::{Result, ScheduleError};
pub use scheduler::Scheduler;
