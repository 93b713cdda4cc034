//! Staffing requirement model.
//!
//! A requirement states how many nurses a (day, shift) slot needs.
//! One requirement per slot is expected, but duplicates are accepted:
//! the heuristic fills each duplicate in processing order, and the ILP
//! emits one equality constraint per duplicate (conflicting counts make
//! the model infeasible, surfaced as a solver error).

use serde::{Deserialize, Serialize};

use super::{DayOfWeek, ShiftType};

/// Number of nurses required for one (day, shift) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequirement {
    /// Day of the week the slot falls on.
    pub day_of_week: DayOfWeek,
    /// Shift type of the slot.
    pub shift: ShiftType,
    /// Nurses required; zero means the slot needs no staffing.
    pub nurses_required: u32,
}

impl ShiftRequirement {
    /// Creates a new staffing requirement.
    pub fn new(day_of_week: DayOfWeek, shift: ShiftType, nurses_required: u32) -> Self {
        Self {
            day_of_week,
            shift,
            nurses_required,
        }
    }

    /// The (day, shift) slot this requirement staffs.
    #[inline]
    pub fn slot(&self) -> (DayOfWeek, ShiftType) {
        (self.day_of_week, self.shift)
    }
}
