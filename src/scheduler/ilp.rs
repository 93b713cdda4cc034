//! ILP schedule generator.
//!
//! Formulates weekly rostering as a binary integer program and solves
//! it to global optimality through the [`IlpSolver`] capability.
//!
//! # Formulation
//!
//! One binary variable `x[n,d,s]` per (nurse, day, shift): nurse `n`
//! works shift `s` on day `d`.
//!
//! Objective (maximize): per variable,
//! `0.1 base + 1.0 if the nurse prefers this exact slot, else -0.2 if
//! the nurse has any preferences at all`. Net coefficients: preferred
//! slot 1.1, indifferent nurse 0.1, against preference -0.1.
//!
//! Constraints:
//! - per requirement (d, s): `sum_n x[n,d,s] == nurses_required` — exact
//!   staffing, no over- or under-staffing;
//! - per slot (d, s) with no requirement: `sum_n x[n,d,s] == 0` — the
//!   positive base weight would otherwise reward filling them;
//! - per nurse: `sum_{d,s} x[n,d,s] <= MAX_SHIFTS_PER_WEEK`;
//! - per (nurse, day): `sum_s x[n,d,s] <= 1`.
//!
//! Optimal when a feasible assignment exists; any other solver status
//! (and an optimal solution with zero assignments) is surfaced as a
//! [`ScheduleError::Solver`], never a partial schedule.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::{check_feasibility, check_nurse_ids, ScheduleGenerator, MAX_SHIFTS_PER_WEEK};
use crate::error::ScheduleError;
use crate::models::{
    DayOfWeek, NursePreference, Schedule, SchedulingAlgorithm, ShiftAssignment, ShiftRequirement,
    ShiftType,
};
use crate::solver::{
    HighsSolver, IlpProblem, IlpSolver, Sense, SolveOptions, SolverFailure, SolverStatus,
};

const BASE_ASSIGNMENT_WEIGHT: f64 = 0.1;
const PREFERENCE_WEIGHT: f64 = 1.0;
const ANTI_PREFERENCE_PENALTY: f64 = -0.2;

/// Variables per nurse: 7 days x 2 shifts.
const VARS_PER_NURSE: usize = DayOfWeek::WEEK.len() * ShiftType::ALL.len();

/// The (nurse, day, shift) a decision variable stands for.
#[derive(Debug, Clone, Copy)]
struct VarKey {
    nurse_id: i64,
    day: DayOfWeek,
    shift: ShiftType,
}

/// Optimal schedule generator backed by a branch-and-cut MIP solver.
///
/// Single-use: construct (the feasibility gate runs), then call
/// [`generate_schedule`](ScheduleGenerator::generate_schedule) once. The
/// solver backend is injected; [`IlpScheduler::new`] wires up
/// [`HighsSolver`].
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use nurse_roster::models::{DayOfWeek, NursePreference, ShiftRequirement, ShiftType};
/// use nurse_roster::scheduler::{IlpScheduler, ScheduleGenerator};
///
/// let requirements = vec![ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1)];
/// let nurses = vec![
///     NursePreference::new(1),
///     NursePreference::new(2).with_preference(DayOfWeek::Monday, ShiftType::Day),
/// ];
/// let reference = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
///
/// let generator = IlpScheduler::new(requirements, nurses, reference)?;
/// let schedule = generator.generate_schedule()?;
/// // Objective coefficient 1.1 vs 0.1: nurse 2 gets the slot.
/// assert_eq!(schedule.assignments[0].nurse_id, 2);
/// # Ok::<(), nurse_roster::error::ScheduleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IlpScheduler<S: IlpSolver = HighsSolver> {
    requirements: Vec<ShiftRequirement>,
    nurses: Vec<NursePreference>,
    reference_date: NaiveDate,
    solver: S,
    options: SolveOptions,
}

impl IlpScheduler {
    /// Creates a generator with the HiGHS backend and an explicit
    /// reference date.
    pub fn new(
        requirements: Vec<ShiftRequirement>,
        nurses: Vec<NursePreference>,
        reference_date: NaiveDate,
    ) -> Result<Self, ScheduleError> {
        Self::with_solver(requirements, nurses, reference_date, HighsSolver::new())
    }

    /// Creates a generator resolving dates against the local date.
    pub fn for_today(
        requirements: Vec<ShiftRequirement>,
        nurses: Vec<NursePreference>,
    ) -> Result<Self, ScheduleError> {
        Self::new(requirements, nurses, Local::now().date_naive())
    }
}

impl<S: IlpSolver> IlpScheduler<S> {
    /// Creates a generator with an injected solver backend.
    pub fn with_solver(
        requirements: Vec<ShiftRequirement>,
        nurses: Vec<NursePreference>,
        reference_date: NaiveDate,
        solver: S,
    ) -> Result<Self, ScheduleError> {
        check_nurse_ids(&nurses)?;
        check_feasibility(&requirements, &nurses)?;
        Ok(Self {
            requirements,
            nurses,
            reference_date,
            solver,
            options: SolveOptions::new(),
        })
    }

    /// Bounds the solve (time limit, cancellation flag).
    pub fn with_solve_options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Index of `x[n,d,s]` given the nurse's position in the input list.
    #[inline]
    fn var_index(nurse_pos: usize, day: DayOfWeek, shift: ShiftType) -> usize {
        nurse_pos * VARS_PER_NURSE + day.index() * ShiftType::ALL.len() + shift.index()
    }

    /// Builds the binary program and the variable decode table.
    fn build_problem(&self) -> (IlpProblem, Vec<VarKey>) {
        let mut problem = IlpProblem::new();
        let mut keys = Vec::with_capacity(self.nurses.len() * VARS_PER_NURSE);

        // Decision variables with preference-weighted objective.
        for nurse in &self.nurses {
            for day in DayOfWeek::WEEK {
                for shift in ShiftType::ALL {
                    let mut coefficient = BASE_ASSIGNMENT_WEIGHT;
                    if nurse.prefers(day, shift) {
                        coefficient += PREFERENCE_WEIGHT;
                    } else if !nurse.is_indifferent() {
                        coefficient += ANTI_PREFERENCE_PENALTY;
                    }
                    problem.add_binary(coefficient);
                    keys.push(VarKey {
                        nurse_id: nurse.nurse_id,
                        day,
                        shift,
                    });
                }
            }
        }

        // Exact staffing per required slot.
        let mut staffed: HashSet<(DayOfWeek, ShiftType)> = HashSet::new();
        for requirement in &self.requirements {
            let (day, shift) = requirement.slot();
            staffed.insert((day, shift));
            let terms = (0..self.nurses.len())
                .map(|n| (Self::var_index(n, day, shift), 1.0))
                .collect();
            problem.add_constraint(terms, Sense::Eq, f64::from(requirement.nurses_required));
        }

        // Slots nobody asked to staff stay empty.
        for day in DayOfWeek::WEEK {
            for shift in ShiftType::ALL {
                if staffed.contains(&(day, shift)) {
                    continue;
                }
                let terms = (0..self.nurses.len())
                    .map(|n| (Self::var_index(n, day, shift), 1.0))
                    .collect();
                problem.add_constraint(terms, Sense::Eq, 0.0);
            }
        }

        // Weekly cap per nurse.
        for n in 0..self.nurses.len() {
            let terms = DayOfWeek::WEEK
                .iter()
                .flat_map(|&day| {
                    ShiftType::ALL
                        .iter()
                        .map(move |&shift| (Self::var_index(n, day, shift), 1.0))
                })
                .collect();
            problem.add_constraint(terms, Sense::Le, f64::from(MAX_SHIFTS_PER_WEEK));
        }

        // At most one shift per day per nurse.
        for n in 0..self.nurses.len() {
            for day in DayOfWeek::WEEK {
                let terms = ShiftType::ALL
                    .iter()
                    .map(|&shift| (Self::var_index(n, day, shift), 1.0))
                    .collect();
                problem.add_constraint(terms, Sense::Le, 1.0);
            }
        }

        (problem, keys)
    }
}

impl<S: IlpSolver> ScheduleGenerator for IlpScheduler<S> {
    fn algorithm(&self) -> SchedulingAlgorithm {
        SchedulingAlgorithm::Ilp
    }

    fn generate_schedule(&self) -> Result<Schedule, ScheduleError> {
        let (problem, keys) = self.build_problem();
        debug!(
            vars = problem.num_vars(),
            constraints = problem.constraints.len(),
            "solving rostering ILP"
        );

        let solution = self.solver.solve(&problem, &self.options)?;
        if solution.status != SolverStatus::Optimal {
            return Err(SolverFailure::Status(solution.status).into());
        }

        let mut schedule = Schedule::new(SchedulingAlgorithm::Ilp);
        for index in solution.selected() {
            let key = keys[index];
            schedule.add_assignment(ShiftAssignment::new(
                key.nurse_id,
                key.day.next_date_from(self.reference_date),
                key.day,
                key.shift,
            ));
        }

        if schedule.assignments.is_empty() {
            return Err(SolverFailure::EmptySolution.into());
        }

        info!(
            assignments = schedule.assignment_count(),
            "ILP schedule generated"
        );
        Ok(schedule)
    }
}
