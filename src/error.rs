//! Engine error types.

use thiserror::Error;

use crate::solver::SolverFailure;

/// Errors surfaced by schedule generation.
///
/// Every failure aborts the whole `generate_schedule` call; the engine
/// never returns a partial schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Aggregate demand exceeds aggregate nurse capacity. Raised at
    /// generator construction, before any scheduling work.
    #[error("schedule is not possible: {needed} shifts needed, {available} shifts available")]
    InfeasibleDemand {
        /// Total nurses required across all slots.
        needed: u32,
        /// Total capacity: nurse count x weekly shift cap.
        available: u32,
    },

    /// Malformed requirement or preference records reached the engine.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The ILP solver failed or reported a non-optimal status.
    #[error("failed to generate optimal schedule: {0}")]
    Solver(#[from] SolverFailure),
}
