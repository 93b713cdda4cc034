//! Solver-agnostic integer linear programming layer.
//!
//! The ILP generator builds an [`IlpProblem`] (binary variables, linear
//! constraints, maximize) and hands it to an [`IlpSolver`]. The
//! formulation never depends on a concrete backend, so any
//! branch-and-cut MIP library can be substituted without touching the
//! model-building logic. The bundled backend is [`HighsSolver`].
//!
//! # Solve Bounds
//! MIP solving is NP-hard and a solve may run long. [`SolveOptions`]
//! carries a caller-supplied time limit and cancellation flag; both are
//! enforced by the backend around the (blocking) solver call.

mod highs;

pub use highs::HighsSolver;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Left-hand side equals the right-hand side.
    Eq,
    /// Left-hand side is at most the right-hand side.
    Le,
}

/// A linear constraint over problem variables.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// (variable index, coefficient) terms of the left-hand side.
    pub terms: Vec<(usize, f64)>,
    /// Constraint sense.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
}

/// A binary integer program with a maximization objective.
///
/// All variables are binary; each carries one objective coefficient.
#[derive(Debug, Clone, Default)]
pub struct IlpProblem {
    /// Objective coefficient per variable.
    pub objective: Vec<f64>,
    /// Linear constraints.
    pub constraints: Vec<LinearConstraint>,
}

impl IlpProblem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binary variable with the given objective coefficient and
    /// returns its index.
    pub fn add_binary(&mut self, objective_coefficient: f64) -> usize {
        self.objective.push(objective_coefficient);
        self.objective.len() - 1
    }

    /// Adds a linear constraint.
    pub fn add_constraint(&mut self, terms: Vec<(usize, f64)>, sense: Sense, rhs: f64) {
        self.constraints.push(LinearConstraint { terms, sense, rhs });
    }

    /// Number of variables.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }
}

/// Solver termination status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// An optimal integer solution was found.
    Optimal,
    /// No feasible integer solution exists.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// The solver terminated without a defined solution.
    Undefined,
}

/// A solved problem: status plus one value per variable.
///
/// `values` is empty for any non-[`Optimal`](SolverStatus::Optimal)
/// status.
#[derive(Debug, Clone)]
pub struct IlpSolution {
    /// Termination status.
    pub status: SolverStatus,
    /// Variable values, indexed like [`IlpProblem::objective`].
    pub values: Vec<f64>,
}

impl IlpSolution {
    /// Indices of variables rounded to 1.
    pub fn selected(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v >= 0.5)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Ways a solve can fail.
#[derive(Debug, Clone, Error)]
pub enum SolverFailure {
    /// The solver terminated with a non-optimal status.
    #[error("no optimal solution found (solver status: {0:?})")]
    Status(SolverStatus),
    /// The solver reported success but assigned no variables.
    #[error("solver reported an optimal solution with no assignments")]
    EmptySolution,
    /// The caller-supplied time limit elapsed before the solve finished.
    #[error("solve exceeded the time limit")]
    TimedOut,
    /// The caller's cancellation flag was set.
    #[error("solve was cancelled")]
    Cancelled,
    /// The backend itself failed (library error or panic).
    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Bounds on a single solve call.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Wall-clock limit for the solve. `None` = unbounded.
    pub time_limit: Option<Duration>,
    /// Cooperative cancellation flag. Checked before dispatch and while
    /// waiting; a running backend solve is not interrupted mid-iteration.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SolveOptions {
    /// Creates unbounded options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a wall-clock time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets a cancellation flag.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// A branch-and-cut MIP solver capability.
///
/// Implementations receive the full problem and return a status plus
/// variable values. Mechanical failures (timeout, cancellation, backend
/// errors) are `Err`; an infeasible or unbounded model is a successful
/// solve with the corresponding status.
pub trait IlpSolver {
    /// Solves the problem within the given bounds.
    fn solve(
        &self,
        problem: &IlpProblem,
        options: &SolveOptions,
    ) -> Result<IlpSolution, SolverFailure>;
}
