//! Input integrity checks.
//!
//! Structural checks on requirements and preferences before a generator
//! is constructed. Detects:
//! - duplicate nurse IDs
//! - duplicate (day, shift) requirement slots
//! - duplicate entries within one nurse's preference list
//!
//! Shape and range validation of raw request payloads belongs upstream;
//! this module covers only what the engine can state about its own
//! inputs. Duplicate requirement slots are reported but still accepted
//! by the engine (the heuristic fills each one in processing order, the
//! ILP turns conflicting counts into an infeasible model).

use std::collections::HashSet;

use crate::models::{NursePreference, ShiftRequirement};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two nurses share the same ID.
    DuplicateNurseId,
    /// Two requirements target the same (day, shift) slot.
    DuplicateSlot,
    /// A nurse lists the same preferred slot twice.
    DuplicatePreference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates generator inputs, collecting all detected issues.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every issue found.
pub fn validate_input(
    requirements: &[ShiftRequirement],
    nurses: &[NursePreference],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut slots = HashSet::new();
    for requirement in requirements {
        if !slots.insert(requirement.slot()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!(
                    "Duplicate requirement for slot {} {}",
                    requirement.day_of_week, requirement.shift
                ),
            ));
        }
    }

    let mut nurse_ids = HashSet::new();
    for nurse in nurses {
        if !nurse_ids.insert(nurse.nurse_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateNurseId,
                format!("Duplicate nurse ID: {}", nurse.nurse_id),
            ));
        }

        let mut seen = HashSet::new();
        for preference in &nurse.preferences {
            if !seen.insert((preference.day_of_week, preference.shift)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePreference,
                    format!(
                        "Nurse {} lists slot {} {} more than once",
                        nurse.nurse_id, preference.day_of_week, preference.shift
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
