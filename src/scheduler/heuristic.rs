//! Greedy heuristic schedule generator.
//!
//! # Algorithm
//!
//! 1. Sort requirements by `nurses_required` descending, so the most
//!    constrained slots are filled first.
//! 2. For each requirement, score every nurse for the slot; nurses that
//!    are unavailable (weekly cap reached, or already working that day)
//!    score negative infinity.
//! 3. Stable-sort candidates by score descending (ties keep input nurse
//!    order) and assign the top `nurses_required` eligible nurses. A slot
//!    with fewer eligible nurses than required is filled partially and an
//!    under-staffing violation is recorded.
//!
//! # Scoring
//!
//! | Component | Value |
//! |-----------|-------|
//! | Available for slot | +100 |
//! | Night shift after a night shift | -10 |
//! | Exact preference match | +15 |
//! | Has preferences, none for this slot | -2 |
//! | No preferences at all | 0 |
//! | Fairness | +1 per unused weekly shift (0..5) |
//!
//! Greedy selection is O(requirements x nurses log nurses) with no
//! backtracking; early assignments can block better ones later.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use super::{check_feasibility, check_nurse_ids, ScheduleGenerator, MAX_SHIFTS_PER_WEEK};
use crate::error::ScheduleError;
use crate::models::{
    DayOfWeek, NursePreference, Schedule, SchedulingAlgorithm, ShiftAssignment, ShiftRequirement,
    ShiftType, Violation,
};

const AVAILABLE_FOR_REQUIREMENT_SCORE: f64 = 100.0;
const CONSECUTIVE_NIGHT_PENALTY: f64 = -10.0;
const PREFERENCE_MATCH_SCORE: f64 = 15.0;
const NO_PREFERENCE_SCORE: f64 = 0.0;
const ANTI_PREFERENCE_PENALTY: f64 = -2.0;
const FAIR_DISTRIBUTION_WEIGHT: f64 = 1.0;

/// In-progress weekly assignment: per day, one nurse-id list per shift.
#[derive(Debug, Default)]
struct WeeklySchedule {
    slots: [[Vec<i64>; 2]; 7],
}

impl WeeklySchedule {
    fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, day: DayOfWeek, shift: ShiftType) -> &mut Vec<i64> {
        &mut self.slots[day.index()][shift.index()]
    }

    /// Whether the nurse already works any shift on this day.
    fn is_assigned_on(&self, nurse_id: i64, day: DayOfWeek) -> bool {
        self.slots[day.index()]
            .iter()
            .any(|nurses| nurses.contains(&nurse_id))
    }

    /// Whether the nurse works the night shift on this day.
    fn worked_night(&self, nurse_id: i64, day: DayOfWeek) -> bool {
        self.slots[day.index()][ShiftType::Night.index()].contains(&nurse_id)
    }
}

/// Greedy, priority-ordered schedule generator.
///
/// Deterministic given input order: requirement and candidate sorts are
/// stable, so score ties resolve to the earlier input position.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use nurse_roster::models::{DayOfWeek, NursePreference, ShiftRequirement, ShiftType};
/// use nurse_roster::scheduler::{HeuristicScheduler, ScheduleGenerator};
///
/// let requirements = vec![ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1)];
/// let nurses = vec![
///     NursePreference::new(1),
///     NursePreference::new(2).with_preference(DayOfWeek::Monday, ShiftType::Day),
/// ];
/// let reference = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
///
/// let generator = HeuristicScheduler::new(requirements, nurses, reference)?;
/// let schedule = generator.generate_schedule()?;
/// // Nurse 2 prefers the slot and outscores nurse 1 (120 vs 105).
/// assert_eq!(schedule.assignments[0].nurse_id, 2);
/// # Ok::<(), nurse_roster::error::ScheduleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicScheduler {
    requirements: Vec<ShiftRequirement>,
    nurses: Vec<NursePreference>,
    reference_date: NaiveDate,
}

impl HeuristicScheduler {
    /// Creates a generator with an explicit reference date.
    ///
    /// Rejects duplicate nurse IDs, then runs the aggregate feasibility
    /// gate; both fail before any scheduling work.
    pub fn new(
        requirements: Vec<ShiftRequirement>,
        nurses: Vec<NursePreference>,
        reference_date: NaiveDate,
    ) -> Result<Self, ScheduleError> {
        check_nurse_ids(&nurses)?;
        check_feasibility(&requirements, &nurses)?;
        Ok(Self {
            requirements,
            nurses,
            reference_date,
        })
    }

    /// Creates a generator resolving dates against the local date.
    pub fn for_today(
        requirements: Vec<ShiftRequirement>,
        nurses: Vec<NursePreference>,
    ) -> Result<Self, ScheduleError> {
        Self::new(requirements, nurses, Local::now().date_naive())
    }

    /// Scores one nurse for one (day, shift) slot.
    ///
    /// Returns negative infinity when the nurse is unavailable: weekly
    /// cap reached, or already assigned any shift that day.
    fn score_nurse(
        nurse: &NursePreference,
        day: DayOfWeek,
        shift: ShiftType,
        board: &WeeklySchedule,
        shift_count: u32,
    ) -> f64 {
        if shift_count >= MAX_SHIFTS_PER_WEEK || board.is_assigned_on(nurse.nurse_id, day) {
            return f64::NEG_INFINITY;
        }

        let mut score = AVAILABLE_FOR_REQUIREMENT_SCORE;

        // Fatigue: back-to-back night shifts. Monday has no predecessor.
        if shift == ShiftType::Night {
            if let Some(previous) = day.previous() {
                if board.worked_night(nurse.nurse_id, previous) {
                    score += CONSECUTIVE_NIGHT_PENALTY;
                }
            }
        }

        score += Self::preference_score(nurse, day, shift);

        // The fewer shifts a nurse has so far, the higher they score.
        score += FAIR_DISTRIBUTION_WEIGHT * f64::from(MAX_SHIFTS_PER_WEEK - shift_count);

        score
    }

    /// Preference component: +15 exact match, 0 when indifferent,
    /// -2 when the nurse has preferences but not for this slot.
    fn preference_score(nurse: &NursePreference, day: DayOfWeek, shift: ShiftType) -> f64 {
        if nurse.is_indifferent() {
            NO_PREFERENCE_SCORE
        } else if nurse.prefers(day, shift) {
            PREFERENCE_MATCH_SCORE
        } else {
            ANTI_PREFERENCE_PENALTY
        }
    }
}

impl ScheduleGenerator for HeuristicScheduler {
    fn algorithm(&self) -> SchedulingAlgorithm {
        SchedulingAlgorithm::Heuristic
    }

    fn generate_schedule(&self) -> Result<Schedule, ScheduleError> {
        let mut schedule = Schedule::new(SchedulingAlgorithm::Heuristic);
        let mut board = WeeklySchedule::new();
        let mut shift_counts: HashMap<i64, u32> =
            self.nurses.iter().map(|n| (n.nurse_id, 0)).collect();

        // Highest-demand slots first; stable, so equal demands keep input order.
        let mut slots_to_fill = self.requirements.clone();
        slots_to_fill.sort_by(|a, b| b.nurses_required.cmp(&a.nurses_required));

        for requirement in &slots_to_fill {
            let (day, shift) = requirement.slot();

            let mut candidates: Vec<(i64, f64)> = self
                .nurses
                .iter()
                .map(|nurse| {
                    let count = shift_counts.get(&nurse.nurse_id).copied().unwrap_or(0);
                    (
                        nurse.nurse_id,
                        Self::score_nurse(nurse, day, shift, &board, count),
                    )
                })
                .filter(|(_, score)| score.is_finite())
                .collect();
            candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

            let required = requirement.nurses_required as usize;
            let chosen = &candidates[..required.min(candidates.len())];
            if chosen.len() < required {
                warn!(
                    day = %day,
                    shift = %shift,
                    required,
                    eligible = chosen.len(),
                    "not enough eligible nurses, slot will be under-staffed"
                );
                schedule.add_violation(Violation::understaffed(
                    day,
                    shift,
                    chosen.len() as u32,
                    requirement.nurses_required,
                ));
            }

            let date = day.next_date_from(self.reference_date);
            for &(nurse_id, score) in chosen {
                debug!(nurse_id, day = %day, shift = %shift, score, "assigning nurse to slot");
                board.slot_mut(day, shift).push(nurse_id);
                if let Some(count) = shift_counts.get_mut(&nurse_id) {
                    *count += 1;
                }
                schedule.add_assignment(ShiftAssignment::new(nurse_id, date, day, shift));
            }
        }

        info!(
            assignments = schedule.assignment_count(),
            violations = schedule.violations.len(),
            "heuristic schedule generated"
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_monday() -> NaiveDate {
        // 2025-06-02 is a Monday
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn generate(
        requirements: Vec<ShiftRequirement>,
        nurses: Vec<NursePreference>,
    ) -> Schedule {
        HeuristicScheduler::new(requirements, nurses, reference_monday())
            .unwrap()
            .generate_schedule()
            .unwrap()
    }

    #[test]
    fn test_preferring_nurse_outscores_indifferent_nurse() {
        let board = WeeklySchedule::new();
        let indifferent = NursePreference::new(1);
        let preferring =
            NursePreference::new(2).with_preference(DayOfWeek::Monday, ShiftType::Day);

        let score_a = HeuristicScheduler::score_nurse(
            &indifferent,
            DayOfWeek::Monday,
            ShiftType::Day,
            &board,
            0,
        );
        let score_b = HeuristicScheduler::score_nurse(
            &preferring,
            DayOfWeek::Monday,
            ShiftType::Day,
            &board,
            0,
        );

        // 100 base + 0 preference + 5 fairness vs 100 + 15 + 5.
        assert_eq!(score_a, 105.0);
        assert_eq!(score_b, 120.0);
        assert!(score_b > score_a);
    }

    #[test]
    fn test_non_matching_preferences_are_penalized() {
        let board = WeeklySchedule::new();
        let nurse = NursePreference::new(1).with_preference(DayOfWeek::Sunday, ShiftType::Night);
        let score = HeuristicScheduler::score_nurse(
            &nurse,
            DayOfWeek::Monday,
            ShiftType::Day,
            &board,
            0,
        );
        // 100 base - 2 anti-preference + 5 fairness.
        assert_eq!(score, 103.0);
    }

    #[test]
    fn test_no_night_penalty_on_monday() {
        // A Sunday night shift never counts as "previous night" for Monday.
        let mut board = WeeklySchedule::new();
        board
            .slot_mut(DayOfWeek::Sunday, ShiftType::Night)
            .push(1);
        let nurse = NursePreference::new(1);
        let score = HeuristicScheduler::score_nurse(
            &nurse,
            DayOfWeek::Monday,
            ShiftType::Night,
            &board,
            1,
        );
        // 100 base + 4 fairness, no -10 penalty.
        assert_eq!(score, 104.0);
    }

    #[test]
    fn test_night_penalty_after_previous_night() {
        let mut board = WeeklySchedule::new();
        board
            .slot_mut(DayOfWeek::Monday, ShiftType::Night)
            .push(1);
        let nurse = NursePreference::new(1);
        let score = HeuristicScheduler::score_nurse(
            &nurse,
            DayOfWeek::Tuesday,
            ShiftType::Night,
            &board,
            1,
        );
        // 100 base - 10 night penalty + 4 fairness.
        assert_eq!(score, 94.0);
    }

    #[test]
    fn test_unavailable_nurse_scores_negative_infinity() {
        let mut board = WeeklySchedule::new();
        board.slot_mut(DayOfWeek::Monday, ShiftType::Day).push(1);
        let nurse = NursePreference::new(1);

        // Already working Monday: unavailable for Monday night.
        let same_day = HeuristicScheduler::score_nurse(
            &nurse,
            DayOfWeek::Monday,
            ShiftType::Night,
            &board,
            1,
        );
        assert_eq!(same_day, f64::NEG_INFINITY);

        // Weekly cap reached: unavailable anywhere.
        let capped = HeuristicScheduler::score_nurse(
            &nurse,
            DayOfWeek::Friday,
            ShiftType::Day,
            &WeeklySchedule::new(),
            MAX_SHIFTS_PER_WEEK,
        );
        assert_eq!(capped, f64::NEG_INFINITY);
    }

    #[test]
    fn test_preferring_nurse_wins_slot() {
        let requirements = vec![ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1)];
        let nurses = vec![
            NursePreference::new(1),
            NursePreference::new(2).with_preference(DayOfWeek::Monday, ShiftType::Day),
        ];

        let schedule = generate(requirements, nurses);
        assert_eq!(schedule.assignment_count(), 1);
        assert_eq!(schedule.assignments[0].nurse_id, 2);
        assert_eq!(schedule.assignments[0].date, reference_monday());
        assert!(schedule.is_clean());
    }

    #[test]
    fn test_no_double_booking_and_weekly_cap() {
        // One nurse, five single-nurse slots (exactly at capacity), two
        // of them on the same day.
        let requirements = vec![
            ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1),
            ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Night, 1),
            ShiftRequirement::new(DayOfWeek::Tuesday, ShiftType::Day, 1),
            ShiftRequirement::new(DayOfWeek::Wednesday, ShiftType::Day, 1),
            ShiftRequirement::new(DayOfWeek::Thursday, ShiftType::Day, 1),
        ];
        let nurses = vec![NursePreference::new(1)];

        let schedule = generate(requirements, nurses);

        // Monday day and Monday night cannot both go to nurse 1.
        assert_eq!(schedule.shift_count_for(1), 4);
        let monday_assignments: Vec<_> = schedule
            .assignments
            .iter()
            .filter(|a| a.day_of_week == DayOfWeek::Monday)
            .collect();
        assert_eq!(monday_assignments.len(), 1);

        // The unfillable Monday slot is reported, not silently staffed.
        assert_eq!(schedule.violations.len(), 1);
        assert_eq!(schedule.violations[0].assigned, 0);
        assert_eq!(schedule.violations[0].required, 1);
    }

    #[test]
    fn test_understaffed_slot_records_violation() {
        // Two nurses, three required on one slot.
        let requirements = vec![ShiftRequirement::new(DayOfWeek::Friday, ShiftType::Night, 3)];
        let nurses = vec![NursePreference::new(1), NursePreference::new(2)];

        let schedule = generate(requirements, nurses);
        assert_eq!(schedule.assignment_count(), 2);
        assert!(!schedule.is_clean());
        assert_eq!(schedule.violations[0].assigned, 2);
        assert_eq!(schedule.violations[0].required, 3);
    }

    #[test]
    fn test_high_demand_slots_filled_first() {
        // The 2-nurse slot is processed before the 1-nurse slots even
        // though it comes last in input order.
        let requirements = vec![
            ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1),
            ShiftRequirement::new(DayOfWeek::Tuesday, ShiftType::Day, 1),
            ShiftRequirement::new(DayOfWeek::Wednesday, ShiftType::Day, 2),
        ];
        let nurses = vec![NursePreference::new(1), NursePreference::new(2)];

        let schedule = generate(requirements, nurses);
        assert_eq!(schedule.assignment_count(), 4);
        assert_eq!(
            schedule.nurses_on(DayOfWeek::Wednesday, ShiftType::Day),
            vec![1, 2]
        );
        assert!(schedule.is_clean());
    }

    #[test]
    fn test_fairness_spreads_shifts() {
        // Two slots, two indifferent nurses: each should get one shift,
        // because the fairness term drops for the already-assigned nurse.
        let requirements = vec![
            ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1),
            ShiftRequirement::new(DayOfWeek::Tuesday, ShiftType::Day, 1),
        ];
        let nurses = vec![NursePreference::new(1), NursePreference::new(2)];

        let schedule = generate(requirements, nurses);
        assert_eq!(schedule.shift_count_for(1), 1);
        assert_eq!(schedule.shift_count_for(2), 1);
    }

    #[test]
    fn test_tie_breaks_by_input_order() {
        let requirements = vec![ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1)];
        let nurses = vec![NursePreference::new(9), NursePreference::new(4)];

        let schedule = generate(requirements, nurses);
        assert_eq!(schedule.assignments[0].nurse_id, 9);
    }

    #[test]
    fn test_infeasible_demand_fails_construction() {
        let requirements = vec![ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 6)];
        let nurses = vec![NursePreference::new(1)];
        let err =
            HeuristicScheduler::new(requirements, nurses, reference_monday()).unwrap_err();
        assert!(matches!(err, ScheduleError::InfeasibleDemand { .. }));
    }

    #[test]
    fn test_duplicate_nurse_ids_fail_construction() {
        let requirements = vec![ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1)];
        let nurses = vec![NursePreference::new(1), NursePreference::new(1)];
        let err =
            HeuristicScheduler::new(requirements, nurses, reference_monday()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }
}
