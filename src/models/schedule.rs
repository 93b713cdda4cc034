//! Schedule (solution) model.
//!
//! A schedule is a complete assignment of nurses to (day, shift) slots
//! for one week, tagged with the algorithm that produced it. The
//! heuristic may additionally record under-staffing violations when a
//! slot had fewer eligible nurses than required; the ILP never does.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DayOfWeek, ShiftType};

/// The algorithm that produced a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingAlgorithm {
    Heuristic,
    Ilp,
}

/// One nurse working one shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Assigned nurse.
    pub nurse_id: i64,
    /// Calendar date of the shift.
    pub date: NaiveDate,
    /// Day of the week the shift falls on.
    pub day_of_week: DayOfWeek,
    /// Shift type.
    pub shift: ShiftType,
}

impl ShiftAssignment {
    /// Creates a new shift assignment.
    pub fn new(nurse_id: i64, date: NaiveDate, day_of_week: DayOfWeek, shift: ShiftType) -> Self {
        Self {
            nurse_id,
            date,
            day_of_week,
            shift,
        }
    }
}

/// Classification of constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A slot received fewer nurses than its requirement asked for.
    Understaffed,
}

/// A recorded constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub kind: ViolationKind,
    /// Day of the affected slot.
    pub day_of_week: DayOfWeek,
    /// Shift of the affected slot.
    pub shift: ShiftType,
    /// Nurses actually assigned to the slot.
    pub assigned: u32,
    /// Nurses the requirement asked for.
    pub required: u32,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Creates an under-staffing violation.
    pub fn understaffed(
        day_of_week: DayOfWeek,
        shift: ShiftType,
        assigned: u32,
        required: u32,
    ) -> Self {
        Self {
            kind: ViolationKind::Understaffed,
            day_of_week,
            shift,
            assigned,
            required,
            message: format!(
                "slot {day_of_week} {shift} requires {required} nurses, only {assigned} eligible"
            ),
        }
    }
}

/// A complete weekly schedule.
///
/// Assignment order carries no meaning; query helpers exist for the
/// common lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Algorithm that produced this schedule.
    pub algorithm: SchedulingAlgorithm,
    /// Shift assignments (unordered).
    pub assignments: Vec<ShiftAssignment>,
    /// Constraint violations detected while generating.
    pub violations: Vec<Violation>,
}

impl Schedule {
    /// Creates an empty schedule for the given algorithm.
    pub fn new(algorithm: SchedulingAlgorithm) -> Self {
        Self {
            algorithm,
            assignments: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: ShiftAssignment) {
        self.assignments.push(assignment);
    }

    /// Adds a violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Number of assignments.
    #[inline]
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the schedule has no violations.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// All assignments for one nurse.
    pub fn assignments_for_nurse(&self, nurse_id: i64) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.nurse_id == nurse_id)
            .collect()
    }

    /// Number of shifts one nurse works this week.
    pub fn shift_count_for(&self, nurse_id: i64) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.nurse_id == nurse_id)
            .count()
    }

    /// Nurses assigned to one (day, shift) slot.
    pub fn nurses_on(&self, day_of_week: DayOfWeek, shift: ShiftType) -> Vec<i64> {
        self.assignments
            .iter()
            .filter(|a| a.day_of_week == day_of_week && a.shift == shift)
            .map(|a| a.nurse_id)
            .collect()
    }
}
