//! Harness error handling
//!
//! Every condition here is fatal for the run that hit it. The harness makes
//! exactly one attempt, so nothing retries.
//!
//! A wrong benchmark result is deliberately *not* an error: it is a
//! [`Verdict::Failed`](crate::validate::Verdict::Failed) and is emitted after
//! the report, so the timing data survives a correctness regression.

use std::fmt;
use std::io;

/// Errors that abort a run (or a driver command) before a report is emitted
#[derive(Debug)]
pub enum HarnessError {
    /// The monotonic clock could not be read (carries the OS errno)
    ClockUnavailable(i32),

    /// A benchmark buffer could not be allocated
    Allocation {
        /// Which buffer failed
        what: &'static str,
        /// Requested element count
        elements: usize,
    },

    /// The startup sentinel check failed
    Warmup,

    /// A report was missing a field or carried a malformed value
    MalformedReport {
        /// Label of the offending field, e.g. `COMPUTE_TIME_US`
        field: &'static str,
    },

    /// A report field pattern failed to compile
    Pattern {
        field: &'static str,
        message: String,
    },

    /// Matrix operands (or the output buffer) differ in size
    DimensionMismatch {
        lhs: usize,
        rhs: usize,
        out: usize,
    },

    /// Configuration could not be read or parsed
    Config(String),

    /// Writing the report failed
    Io(io::Error),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::ClockUnavailable(errno) => {
                write!(f, "monotonic clock unavailable (errno {})", errno)
            }
            HarnessError::Allocation { what, elements } => {
                write!(f, "failed to allocate {} ({} elements)", what, elements)
            }
            HarnessError::Warmup => write!(f, "warmup failed"),
            HarnessError::MalformedReport { field } => {
                write!(f, "missing or invalid {} field", field)
            }
            HarnessError::Pattern { field, message } => {
                write!(f, "invalid {} pattern: {}", field, message)
            }
            HarnessError::DimensionMismatch { lhs, rhs, out } => write!(
                f,
                "matrix dimension mismatch: {}x{} * {}x{} into {}x{}",
                lhs, lhs, rhs, rhs, out, out
            ),
            HarnessError::Config(msg) => write!(f, "{}", msg),
            HarnessError::Io(e) => write!(f, "failed to write report: {}", e),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HarnessError {
    fn from(e: io::Error) -> Self {
        HarnessError::Io(e)
    }
}

/// Allocate a buffer holding `len` copies of `value`
///
/// Uses `try_reserve_exact` so that exhaustion surfaces as
/// [`HarnessError::Allocation`] instead of aborting the process.
pub fn try_filled<T: Clone>(
    what: &'static str,
    len: usize,
    value: T,
) -> Result<Vec<T>, HarnessError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| HarnessError::Allocation { what, elements: len })?;
    buf.resize(len, value);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            HarnessError::ClockUnavailable(22).to_string(),
            "monotonic clock unavailable (errno 22)"
        );
        assert_eq!(
            HarnessError::Allocation {
                what: "matrix A",
                elements: 16384
            }
            .to_string(),
            "failed to allocate matrix A (16384 elements)"
        );
        assert_eq!(
            HarnessError::MalformedReport { field: "RESULT" }.to_string(),
            "missing or invalid RESULT field"
        );
        assert_eq!(
            HarnessError::DimensionMismatch {
                lhs: 2,
                rhs: 1,
                out: 2
            }
            .to_string(),
            "matrix dimension mismatch: 2x2 * 1x1 into 2x2"
        );
        assert_eq!(
            HarnessError::Pattern {
                field: "RESULT",
                message: "unclosed group".to_string()
            }
            .to_string(),
            "invalid RESULT pattern: unclosed group"
        );
    }

    #[test]
    fn test_try_filled() {
        let buf = try_filled("markers", 5, true).unwrap();
        assert_eq!(buf, vec![true; 5]);
    }

    #[test]
    fn test_try_filled_overflow_is_allocation_error() {
        match try_filled("huge", usize::MAX, 0u64) {
            Err(HarnessError::Allocation { what, elements }) => {
                assert_eq!(what, "huge");
                assert_eq!(elements, usize::MAX);
            }
            other => panic!("Expected Allocation error, got {:?}", other),
        }
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error;
        let e = HarnessError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(e.source().is_some());
    }
}
