//! Preference satisfaction metrics.
//!
//! Classifies each assignment of a completed schedule against the
//! nurses' stated preferences, for comparing the two algorithms'
//! output quality.
//!
//! | Bucket | Meaning |
//! |--------|---------|
//! | Matched | the nurse asked for this exact (day, shift) slot |
//! | Mismatched | the nurse has preferences, none for this slot |
//! | Neutral | the nurse submitted no preferences |

use std::collections::HashMap;

use crate::models::{NursePreference, Schedule};

/// Preference satisfaction counts for one schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceStats {
    /// Assignments on a slot the nurse asked for.
    pub matches: usize,
    /// Assignments against a non-empty preference list.
    pub mismatches: usize,
    /// Assignments of indifferent nurses.
    pub neutral: usize,
    /// Total classified assignments.
    pub total: usize,
}

impl PreferenceStats {
    /// Computes stats for a schedule.
    ///
    /// Assignments of nurses missing from `nurses` are counted as
    /// neutral, the same as an empty preference list.
    pub fn calculate(schedule: &Schedule, nurses: &[NursePreference]) -> Self {
        let by_id: HashMap<i64, &NursePreference> =
            nurses.iter().map(|n| (n.nurse_id, n)).collect();

        let mut stats = Self::default();
        for assignment in &schedule.assignments {
            stats.total += 1;
            match by_id.get(&assignment.nurse_id) {
                Some(nurse) if nurse.is_indifferent() => stats.neutral += 1,
                Some(nurse) if nurse.prefers(assignment.day_of_week, assignment.shift) => {
                    stats.matches += 1
                }
                Some(_) => stats.mismatches += 1,
                None => stats.neutral += 1,
            }
        }
        stats
    }

    /// Fraction of assignments matching a preference (0.0..1.0).
    ///
    /// An empty schedule counts as fully matched.
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.matches as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DayOfWeek, SchedulingAlgorithm, ShiftAssignment, ShiftType,
    };
    use chrono::NaiveDate;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn test_classification() {
        let mut schedule = Schedule::new(SchedulingAlgorithm::Heuristic);
        schedule.add_assignment(ShiftAssignment::new(
            1,
            monday(),
            DayOfWeek::Monday,
            ShiftType::Day,
        ));
        schedule.add_assignment(ShiftAssignment::new(
            2,
            monday(),
            DayOfWeek::Monday,
            ShiftType::Day,
        ));
        schedule.add_assignment(ShiftAssignment::new(
            3,
            monday(),
            DayOfWeek::Monday,
            ShiftType::Night,
        ));

        let nurses = vec![
            // Matched
            NursePreference::new(1).with_preference(DayOfWeek::Monday, ShiftType::Day),
            // Mismatched: prefers a different slot
            NursePreference::new(2).with_preference(DayOfWeek::Friday, ShiftType::Night),
            // Neutral: no preferences
            NursePreference::new(3),
        ];

        let stats = PreferenceStats::calculate(&schedule, &nurses);
        assert_eq!(
            stats,
            PreferenceStats {
                matches: 1,
                mismatches: 1,
                neutral: 1,
                total: 3,
            }
        );
        assert!((stats.match_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_nurse_counts_as_neutral() {
        let mut schedule = Schedule::new(SchedulingAlgorithm::Ilp);
        schedule.add_assignment(ShiftAssignment::new(
            99,
            monday(),
            DayOfWeek::Monday,
            ShiftType::Day,
        ));

        let stats = PreferenceStats::calculate(&schedule, &[]);
        assert_eq!(stats.neutral, 1);
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_empty_schedule_match_rate() {
        let schedule = Schedule::new(SchedulingAlgorithm::Heuristic);
        let stats = PreferenceStats::calculate(&schedule, &[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.match_rate(), 1.0);
    }
}
