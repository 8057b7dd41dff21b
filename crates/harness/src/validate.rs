//! Result validation
//!
//! Benchmarks with a known-correct answer carry an [`Expectation`]; the
//! matrix-multiply checksum has none and always yields
//! [`Verdict::Unchecked`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed expected result for a benchmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// What was computed, as shown in diagnostics (e.g. `fib(35)`)
    pub label: String,
    pub expected: i64,
}

impl Expectation {
    pub fn new(label: impl Into<String>, expected: i64) -> Self {
        Expectation {
            label: label.into(),
            expected,
        }
    }

    pub fn check(&self, actual: i64) -> Verdict {
        if actual == self.expected {
            Verdict::Passed
        } else {
            Verdict::Failed(ValidationError {
                label: self.label.clone(),
                expected: self.expected,
                actual,
            })
        }
    }
}

/// A result that did not match its expectation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub label: String,
    pub expected: i64,
    pub actual: i64,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected {} = {}, got {}",
            self.label, self.expected, self.actual
        )
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of validating one result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    /// No expectation is defined for this benchmark
    Unchecked,
    Failed(ValidationError),
}

impl Verdict {
    /// Check against an optional expectation
    pub fn of(expectation: Option<&Expectation>, actual: i64) -> Verdict {
        match expectation {
            Some(e) => e.check(actual),
            None => Verdict::Unchecked,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Verdict::Failed(_))
    }

    /// Process exit status for this verdict
    pub fn exit_code(&self) -> u8 {
        if self.is_failure() { 1 } else { 0 }
    }
}
