//! Weekly nurse rostering engine.
//!
//! Given per-slot staffing requirements and per-nurse shift preferences,
//! generates an assignment of nurses to (day, shift) slots for one week,
//! satisfying hard staffing constraints while maximizing preference
//! satisfaction and workload fairness. Two independent algorithms solve
//! the same problem and their results can be compared side by side.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `DayOfWeek`, `ShiftType`,
//!   `ShiftRequirement`, `NursePreference`, `Schedule`, `ShiftAssignment`
//! - **`scheduler`**: The two generators — `HeuristicScheduler` (greedy
//!   scorer) and `IlpScheduler` (integer program) — behind the
//!   `ScheduleGenerator` trait, plus `PreferenceStats`
//! - **`solver`**: Solver-agnostic binary ILP layer with a HiGHS backend
//! - **`validation`**: Input integrity checks (duplicate IDs and slots)
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use nurse_roster::models::{DayOfWeek, NursePreference, ShiftRequirement, ShiftType};
//! use nurse_roster::scheduler::{HeuristicScheduler, ScheduleGenerator};
//!
//! let requirements = vec![
//!     ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Day, 1),
//!     ShiftRequirement::new(DayOfWeek::Monday, ShiftType::Night, 1),
//! ];
//! let nurses = vec![
//!     NursePreference::new(1).with_preference(DayOfWeek::Monday, ShiftType::Night),
//!     NursePreference::new(2),
//! ];
//! let reference = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//!
//! let generator = HeuristicScheduler::new(requirements, nurses, reference)?;
//! let schedule = generator.generate_schedule()?;
//! assert_eq!(schedule.assignment_count(), 2);
//! assert!(schedule.nurses_on(DayOfWeek::Monday, ShiftType::Night).contains(&1));
//! # Ok::<(), nurse_roster::error::ScheduleError>(())
//! ```
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;
