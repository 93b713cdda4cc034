//! Schedule generators.
//!
//! Two independent algorithms solve the same weekly rostering problem:
//!
//! - [`HeuristicScheduler`] — greedy, priority-ordered, per-slot nurse
//!   scoring and top-K selection. Fast, not optimal; may under-staff a
//!   slot (recorded as a violation) when too few nurses are eligible.
//! - [`IlpScheduler`] — binary integer program solved to global
//!   optimality by a branch-and-cut MIP backend. Hard constraints are
//!   never violated; an unsatisfiable model is an error.
//!
//! Both implement [`ScheduleGenerator`], share the feasibility gate and
//! the weekly shift cap, and resolve dates against the same injected
//! reference date, so their outputs are directly comparable.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering"

mod heuristic;
mod ilp;
mod kpi;

pub use heuristic::HeuristicScheduler;
pub use ilp::IlpScheduler;
pub use kpi::PreferenceStats;

use std::collections::HashSet;

use crate::error::ScheduleError;
use crate::models::{NursePreference, Schedule, SchedulingAlgorithm, ShiftRequirement};

/// Maximum shifts any nurse may work in one week.
pub const MAX_SHIFTS_PER_WEEK: u32 = 5;

/// A single-use weekly schedule generator.
///
/// Constructed with requirements and preferences (the feasibility gate
/// runs in the constructor), then `generate_schedule` is called once.
/// Generators hold no shared state; two of them may run concurrently.
pub trait ScheduleGenerator {
    /// The algorithm tag this generator stamps on its output.
    fn algorithm(&self) -> SchedulingAlgorithm;

    /// Generates the weekly schedule.
    fn generate_schedule(&self) -> Result<Schedule, ScheduleError>;
}

/// Aggregate admission-control gate, run at generator construction.
///
/// Fails iff total required shift-slots exceed `nurse count x`
/// [`MAX_SHIFTS_PER_WEEK`]. This is arithmetic only; it does not prove
/// feasibility under the per-day and per-shift distribution limits.
pub fn check_feasibility(
    requirements: &[ShiftRequirement],
    nurses: &[NursePreference],
) -> Result<(), ScheduleError> {
    let needed: u32 = requirements.iter().map(|r| r.nurses_required).sum();
    let available = nurses.len() as u32 * MAX_SHIFTS_PER_WEEK;
    if needed > available {
        return Err(ScheduleError::InfeasibleDemand { needed, available });
    }
    Ok(())
}

/// Rejects nurse lists the engine cannot represent.
///
/// Duplicate nurse IDs would alias per-nurse shift counts and inflate
/// the capacity gate; they fail construction with
/// [`ScheduleError::InvalidInput`]. Softer integrity issues are
/// reported by [`crate::validation::validate_input`] instead.
pub fn check_nurse_ids(nurses: &[NursePreference]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::new();
    for nurse in nurses {
        if !seen.insert(nurse.nurse_id) {
            return Err(ScheduleError::InvalidInput(format!(
                "duplicate nurse ID: {}",
                nurse.nurse_id
            )));
        }
    }
    Ok(())
}
