//! Nurse shift preference model.
//!
//! Each nurse carries an ordered list of (day, shift) slots they would
//! like to work. An empty list means the nurse is indifferent: both
//! generators score such a nurse neutrally, never with the
//! against-preference penalty.

use serde::{Deserialize, Serialize};

use super::{DayOfWeek, ShiftType};

/// A single preferred (day, shift) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPreference {
    /// Preferred day of the week.
    pub day_of_week: DayOfWeek,
    /// Preferred shift type.
    pub shift: ShiftType,
}

impl ShiftPreference {
    /// Creates a new preference.
    pub fn new(day_of_week: DayOfWeek, shift: ShiftType) -> Self {
        Self {
            day_of_week,
            shift,
        }
    }
}

/// A nurse and their shift preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NursePreference {
    /// Nurse identifier.
    pub nurse_id: i64,
    /// Preferred slots, in the order the nurse submitted them.
    /// Empty = indifferent.
    pub preferences: Vec<ShiftPreference>,
}

impl NursePreference {
    /// Creates a nurse with no preferences (indifferent).
    pub fn new(nurse_id: i64) -> Self {
        Self {
            nurse_id,
            preferences: Vec::new(),
        }
    }

    /// Adds a preferred slot.
    pub fn with_preference(mut self, day_of_week: DayOfWeek, shift: ShiftType) -> Self {
        self.preferences
            .push(ShiftPreference::new(day_of_week, shift));
        self
    }

    /// Whether the nurse prefers this exact (day, shift) slot.
    pub fn prefers(&self, day_of_week: DayOfWeek, shift: ShiftType) -> bool {
        self.preferences
            .iter()
            .any(|p| p.day_of_week == day_of_week && p.shift == shift)
    }

    /// Whether the nurse submitted no preferences at all.
    #[inline]
    pub fn is_indifferent(&self) -> bool {
        self.preferences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_exact_slot() {
        let nurse = NursePreference::new(7)
            .with_preference(DayOfWeek::Monday, ShiftType::Day)
            .with_preference(DayOfWeek::Friday, ShiftType::Night);

        assert!(nurse.prefers(DayOfWeek::Monday, ShiftType::Day));
        assert!(nurse.prefers(DayOfWeek::Friday, ShiftType::Night));
        // Same day, wrong shift is not a match
        assert!(!nurse.prefers(DayOfWeek::Monday, ShiftType::Night));
        assert!(!nurse.is_indifferent());
    }

    #[test]
    fn test_indifferent_nurse() {
        let nurse = NursePreference::new(1);
        assert!(nurse.is_indifferent());
        assert!(!nurse.prefers(DayOfWeek::Monday, ShiftType::Day));
    }

    #[test]
    fn test_preference_serde() {
        let nurse = NursePreference::new(3).with_preference(DayOfWeek::Tuesday, ShiftType::Night);
        let json = serde_json::to_string(&nurse).unwrap();
        let back: NursePreference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nurse);
    }
}
