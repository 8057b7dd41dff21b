//! Baseline harness: single-run compute benchmarks
//!
//! Each benchmark program initializes its inputs, times a startup phase and
//! a compute phase separately against the monotonic clock, prints a fixed
//! three-line report and validates its result.
//!
//! # Modules
//!
//! - `clock`: monotonic timestamps and microsecond deltas
//! - `report`: the `STARTUP_TIME_US` / `COMPUTE_TIME_US` / `RESULT` report
//! - `validate`: expected-value checks and verdicts
//! - `harness`: the `Benchmark` trait and the phase-ordered driver
//! - `payload`: recursive Fibonacci, naive matrix multiply, prime sieve
//! - `config`: TOML overrides for the `baseline` driver
//! - `logging`: stderr `tracing` subscriber

pub mod clock;
pub mod config;
pub mod error;
pub mod harness;
pub mod logging;
pub mod payload;
pub mod report;
pub mod validate;

pub use config::{BenchmarkKind, SuiteConfig};
pub use error::HarnessError;
pub use harness::{Benchmark, Outcome, run, run_program};
pub use report::Report;
pub use validate::{Expectation, ValidationError, Verdict};
