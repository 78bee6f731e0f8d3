//! Shared error types for kpiboard.
//!
//! The two failure modes of the metric core (too little history, a zero
//! baseline) are not errors: they surface as absent deltas. Everything here
//! belongs to the edges, where snapshots and configuration are loaded and
//! reports are written.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single invariant violation found while validating a snapshot or config.
///
/// `field` is a dotted path into the validated value, e.g.
/// `cohorts[2].weekly_retention[5]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Main error type for kpiboard operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system errors with the offending path
    #[error("File system error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Snapshot or config invariants that do not hold
    #[error("Validation failed with {} violation(s): {}", .0.len(), summarize(.0))]
    Validation(Vec<Violation>),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Violations carried by a validation error, empty for every other variant.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(violations) => violations,
            _ => &[],
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    const SHOWN: usize = 3;
    let mut parts: Vec<String> = violations
        .iter()
        .take(SHOWN)
        .map(ToString::to_string)
        .collect();
    if violations.len() > SHOWN {
        parts.push(format!("and {} more", violations.len() - SHOWN));
    }
    parts.join("; ")
}

/// Result type alias for kpiboard operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_first_violations() {
        let err = Error::Validation(vec![
            Violation::new("a", "bad"),
            Violation::new("b", "worse"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed with 2 violation(s): a: bad; b: worse"
        );
    }

    #[test]
    fn validation_message_truncates_long_lists() {
        let violations = (0..5)
            .map(|i| Violation::new(format!("f{i}"), "x"))
            .collect();
        let err = Error::Validation(violations);
        assert!(err.to_string().ends_with("and 2 more"));
        assert_eq!(err.violations().len(), 5);
    }

    #[test]
    fn only_validation_errors_carry_violations() {
        assert!(Error::config("bad").violations().is_empty());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::file_system("/tmp/x", io);
        assert!(err.violations().is_empty());
        assert!(err.to_string().contains("/tmp/x"));
    }
}
