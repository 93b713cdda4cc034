//! Rostering domain models.
//!
//! Core data types for weekly nurse scheduling: the week calendar,
//! staffing requirements, nurse preferences, and the resulting schedule.
//!
//! All models are plain serde-serializable values. Inputs
//! ([`ShiftRequirement`], [`NursePreference`]) are constructed fresh per
//! generation request and never mutated by the engine; [`Schedule`] is
//! the output.

mod calendar;
mod preference;
mod requirement;
mod schedule;

pub use calendar::{DayOfWeek, ShiftType};
pub use preference::{NursePreference, ShiftPreference};
pub use requirement::ShiftRequirement;
pub use schedule::{Schedule, SchedulingAlgorithm, ShiftAssignment, Violation, ViolationKind};
