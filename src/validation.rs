//! Accumulating validation built on `stillwater::Validation`.
//!
//! Checks collect every [`Violation`] they find instead of stopping at the
//! first one. The result stays a `Validation` through the library and is
//! turned into [`Error::Validation`] only where a command needs a `Result`.

use crate::errors::{Error, Result, Violation};
use stillwater::{NonEmptyVec, Validation};

/// Validation result carrying every violation found.
pub type ViolationValidation<T> = Validation<T, NonEmptyVec<Violation>>;

/// Success when `violations` is empty, failure with all of them otherwise.
pub fn from_violations(violations: Vec<Violation>) -> ViolationValidation<()> {
    match NonEmptyVec::from_vec(violations) {
        Some(violations) => Validation::Failure(violations),
        None => Validation::Success(()),
    }
}

/// Failure with a single violation.
pub fn violation_failure<T>(violation: Violation) -> ViolationValidation<T> {
    Validation::Failure(NonEmptyVec::new(violation, Vec::new()))
}

/// Combine validations, keeping the violations of every failed one.
pub fn combine_validations(
    validations: impl IntoIterator<Item = ViolationValidation<()>>,
) -> ViolationValidation<()> {
    from_violations(validations.into_iter().flat_map(into_violations).collect())
}

/// Violations of a validation, empty on success.
pub fn into_violations<T>(validation: ViolationValidation<T>) -> Vec<Violation> {
    match validation {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(violations) => violations.into_iter().collect(),
    }
}

/// Convert at a command boundary: failure becomes [`Error::Validation`].
pub fn run_validation<T>(validation: ViolationValidation<T>) -> Result<T> {
    match validation {
        Validation::Success(value) => Ok(value),
        Validation::Failure(violations) => Err(Error::Validation(violations.into_iter().collect())),
    }
}
