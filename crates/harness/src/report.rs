//! The three-line benchmark report
//!
//! Every benchmark program prints exactly this to stdout, nothing more:
//!
//! ```text
//! STARTUP_TIME_US: 8234
//! COMPUTE_TIME_US: 23891
//! RESULT: 9227465
//! ```
//!
//! Anything that consumes these programs parses those labels, so the
//! rendering here is byte-exact. [`Report::parse`] reads the same format
//! back out of arbitrary program output.

use crate::error::HarnessError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

pub const STARTUP_LABEL: &str = "STARTUP_TIME_US";
pub const COMPUTE_LABEL: &str = "COMPUTE_TIME_US";
pub const RESULT_LABEL: &str = "RESULT";

/// Timing and result of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Startup phase in whole microseconds
    pub startup_time_us: u64,

    /// Compute phase in whole microseconds
    pub compute_time_us: u64,

    /// Benchmark result (value, checksum or count)
    pub result: i64,
}

impl Report {
    pub fn new(startup_time_us: u64, compute_time_us: u64, result: i64) -> Self {
        Report {
            startup_time_us,
            compute_time_us,
            result,
        }
    }

    /// Startup plus compute, saturating
    pub fn total_time_us(&self) -> u64 {
        self.startup_time_us.saturating_add(self.compute_time_us)
    }

    pub fn startup_time_ms(&self) -> f64 {
        self.startup_time_us as f64 / 1000.0
    }

    pub fn compute_time_ms(&self) -> f64 {
        self.compute_time_us as f64 / 1000.0
    }

    /// Parse a report out of program output
    ///
    /// Each label may appear anywhere in `output` (after a log prefix, or
    /// all three on one line), with any whitespace after the colon. The
    /// first occurrence of each wins. All three are required.
    pub fn parse(output: &str) -> Result<Self, HarnessError> {
        let startup = capture(output, STARTUP_LABEL, STARTUP_PATTERN)?;
        let compute = capture(output, COMPUTE_LABEL, COMPUTE_PATTERN)?;
        let result = capture(output, RESULT_LABEL, RESULT_PATTERN)?;
        trace!(startup, compute, result, "parsed report fields");

        Ok(Report {
            startup_time_us: startup.parse().map_err(|_| malformed(STARTUP_LABEL))?,
            compute_time_us: compute.parse().map_err(|_| malformed(COMPUTE_LABEL))?,
            result: result.parse().map_err(|_| malformed(RESULT_LABEL))?,
        })
    }
}

// A value glued to a unit suffix (`200us`) does not end on a word boundary
const STARTUP_PATTERN: &str = r"STARTUP_TIME_US:\s*(\d+)\b";
const COMPUTE_PATTERN: &str = r"COMPUTE_TIME_US:\s*(\d+)\b";
const RESULT_PATTERN: &str = r"RESULT:\s*(-?\d+)\b";

/// First capture of `pattern` in `output`
fn capture<'a>(
    output: &'a str,
    field: &'static str,
    pattern: &str,
) -> Result<&'a str, HarnessError> {
    let re = Regex::new(pattern).map_err(|e| HarnessError::Pattern {
        field,
        message: e.to_string(),
    })?;
    re.captures(output)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| malformed(field))
}

fn malformed(field: &'static str) -> HarnessError {
    HarnessError::MalformedReport { field }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", STARTUP_LABEL, self.startup_time_us)?;
        writeln!(f, "{}: {}", COMPUTE_LABEL, self.compute_time_us)?;
        writeln!(f, "{}: {}", RESULT_LABEL, self.result)
    }
}

impl FromStr for Report {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Report::parse(s)
    }
}
