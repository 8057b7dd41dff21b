//! Monotonic timing for benchmark phases
//!
//! A [`Timestamp`] is seconds plus sub-second nanoseconds read from
//! `CLOCK_MONOTONIC`. It never goes backward within a process and is
//! unaffected by wall-clock adjustments. It has no meaning on its own: the
//! only thing to do with one is subtract it from another.
//!
//! # Example
//!
//! ```
//! use baseline_harness::clock::{elapsed_us, now};
//!
//! let start = now().expect("monotonic clock");
//! let end = now().expect("monotonic clock");
//! assert!(end >= start);
//! let _micros: u64 = elapsed_us(start, end);
//! ```

use crate::error::HarnessError;

const MICROS_PER_SEC: i64 = 1_000_000;
const NANOS_PER_MICRO: i64 = 1_000;

/// An opaque monotonic instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    secs: i64,
    nanos: i64,
}

impl Timestamp {
    /// Build a timestamp from raw parts. `nanos` must be below one second.
    pub const fn from_parts(secs: i64, nanos: i64) -> Self {
        Timestamp { secs, nanos }
    }

    pub fn secs(&self) -> i64 {
        self.secs
    }

    pub fn subsec_nanos(&self) -> i64 {
        self.nanos
    }
}

/// Read the monotonic clock
///
/// On Unix this is `clock_gettime(CLOCK_MONOTONIC)` directly. A failure is
/// an environment error; callers abort the run before printing anything.
#[cfg(unix)]
pub fn now() -> Result<Timestamp, HarnessError> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: ts is a valid pointer to a timespec struct
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    if rc != 0 {
        let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        return Err(HarnessError::ClockUnavailable(errno));
    }
    // Explicit i64 casts for portability (tv_sec/tv_nsec types vary by platform)
    #[allow(clippy::unnecessary_cast)]
    let secs = ts.tv_sec as i64;
    #[allow(clippy::unnecessary_cast)]
    let nanos = ts.tv_nsec as i64;
    Ok(Timestamp::from_parts(secs, nanos))
}

/// Fallback using `Instant` against a process-wide base.
#[cfg(not(unix))]
pub fn now() -> Result<Timestamp, HarnessError> {
    use std::sync::OnceLock;
    use std::time::Instant;

    static BASE: OnceLock<Instant> = OnceLock::new();
    let elapsed = BASE.get_or_init(Instant::now).elapsed();
    let secs = i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX);
    Ok(Timestamp::from_parts(secs, i64::from(elapsed.subsec_nanos())))
}

/// Whole microseconds from `start` to `end`
///
/// `(end.secs - start.secs) * 1_000_000 + (end.nanos - start.nanos) / 1000`,
/// truncating the sub-microsecond remainder. Reversed arguments give 0
/// rather than a negative interval.
pub fn elapsed_us(start: Timestamp, end: Timestamp) -> u64 {
    let secs = end.secs.saturating_sub(start.secs);
    let nanos = end.nanos - start.nanos;
    let micros = secs
        .saturating_mul(MICROS_PER_SEC)
        .saturating_add(nanos / NANOS_PER_MICRO);
    u64::try_from(micros).unwrap_or(0)
}
