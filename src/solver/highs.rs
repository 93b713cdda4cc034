//! HiGHS backend via `good_lp`.
//!
//! Runs each solve on a dedicated worker thread so the caller can
//! enforce [`SolveOptions`](super::SolveOptions) bounds: the calling
//! thread polls the reply channel against the deadline and cancel flag.
//! HiGHS itself cannot be interrupted mid-solve; a timed-out or
//! cancelled worker finishes in the background and its result is
//! dropped.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use good_lp::{default_solver, variable, variables, Expression, ResolutionError, Solution, SolverModel};
use tracing::debug;

use super::{IlpProblem, IlpSolution, IlpSolver, Sense, SolveOptions, SolverFailure, SolverStatus};

/// How often the waiting thread re-checks the deadline and cancel flag.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// What the worker thread sends back: the solve result, or the payload
/// of a caught panic.
type SolveReply = Result<Result<IlpSolution, SolverFailure>, Box<dyn Any + Send>>;

/// Branch-and-cut solver backed by HiGHS (through `good_lp`).
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver;

impl HighsSolver {
    /// Creates a new solver handle.
    pub fn new() -> Self {
        Self
    }
}

impl IlpSolver for HighsSolver {
    fn solve(
        &self,
        problem: &IlpProblem,
        options: &SolveOptions,
    ) -> Result<IlpSolution, SolverFailure> {
        if is_cancelled(options) {
            return Err(SolverFailure::Cancelled);
        }

        debug!(
            vars = problem.num_vars(),
            constraints = problem.constraints.len(),
            "dispatching MIP solve to HiGHS worker"
        );

        let (tx, rx) = mpsc::channel();
        let job = problem.clone();
        thread::Builder::new()
            .name("highs-worker".into())
            .spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| run_model(&job)));
                let _ = tx.send(result);
            })
            .map_err(|e| SolverFailure::Backend(e.to_string()))?;

        await_reply(&rx, options)
    }
}

/// Waits for the worker's reply, enforcing the deadline and cancel flag.
fn await_reply(rx: &Receiver<SolveReply>, options: &SolveOptions) -> Result<IlpSolution, SolverFailure> {
    let deadline = options.time_limit.map(|limit| Instant::now() + limit);
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(result)) => return result,
            Ok(Err(_)) => {
                return Err(SolverFailure::Backend("solver thread panicked".into()));
            }
            Err(RecvTimeoutError::Timeout) => {
                if is_cancelled(options) {
                    return Err(SolverFailure::Cancelled);
                }
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    return Err(SolverFailure::TimedOut);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(SolverFailure::Backend(
                    "solver thread exited without a result".into(),
                ));
            }
        }
    }
}

fn is_cancelled(options: &SolveOptions) -> bool {
    options
        .cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Builds the `good_lp` model and solves it to integer optimality.
fn run_model(problem: &IlpProblem) -> Result<IlpSolution, SolverFailure> {
    let mut vars = variables!();
    let xs: Vec<_> = (0..problem.num_vars())
        .map(|i| vars.add(variable().binary().name(format!("x_{i}"))))
        .collect();

    let objective = problem
        .objective
        .iter()
        .zip(&xs)
        .fold(Expression::from(0.0), |acc, (&coef, &x)| acc + coef * x);

    let mut model = vars.maximise(objective).using(default_solver);

    for constraint in &problem.constraints {
        let lhs = constraint
            .terms
            .iter()
            .fold(Expression::from(0.0), |acc, &(i, coef)| acc + coef * xs[i]);
        match constraint.sense {
            Sense::Eq => model.add_constraint(lhs.eq(constraint.rhs)),
            Sense::Le => model.add_constraint(lhs.leq(constraint.rhs)),
        };
    }

    match model.solve() {
        Ok(solution) => Ok(IlpSolution {
            status: SolverStatus::Optimal,
            values: xs.iter().map(|&x| solution.value(x)).collect(),
        }),
        Err(ResolutionError::Infeasible) => Ok(IlpSolution {
            status: SolverStatus::Infeasible,
            values: Vec::new(),
        }),
        Err(ResolutionError::Unbounded) => Ok(IlpSolution {
            status: SolverStatus::Unbounded,
            values: Vec::new(),
        }),
        Err(other) => Err(SolverFailure::Backend(other.to_string())),
    }
}
