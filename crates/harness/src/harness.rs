//! Single-run benchmark driver
//!
//! Runs a [`Benchmark`] through the fixed phase sequence:
//!
//! ```text
//! t0 ─ startup ─ t1 ─ compute ─ t2 ─ derive result ─ report ─ validate
//! ```
//!
//! The second snapshot is the boundary between phases: nothing the startup
//! phase allocates or initializes is charged to compute. Result derivation
//! (e.g. a checksum over the output buffer) happens after `t2`.
//!
//! [`Outcome::emit`] writes the report before any diagnostic, so a
//! validation failure never loses the timing data.

use crate::clock::{self, elapsed_us};
use crate::error::HarnessError;
use crate::report::Report;
use crate::validate::{Expectation, Verdict};
use serde::Serialize;
use std::hint::black_box;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error, trace};

/// A self-contained workload the driver can time
///
/// Inputs are built by [`startup`](Benchmark::startup), consumed by
/// [`compute`](Benchmark::compute), and the output is reduced to a single
/// integer by [`result`](Benchmark::result). Everything is dropped before
/// [`run`] returns.
pub trait Benchmark {
    type Input;
    type Output;

    /// Program name, e.g. `fibonacci`
    fn name(&self) -> &'static str;

    /// Untimed-by-compute preparation (allocation, initialization)
    fn startup(&self) -> Result<Self::Input, HarnessError>;

    /// The algorithm under test
    fn compute(&self, input: Self::Input) -> Result<Self::Output, HarnessError>;

    /// Reduce the output to the reported value
    fn result(&self, output: &Self::Output) -> i64;

    /// Known-correct result, if this benchmark has one
    fn expectation(&self) -> Option<Expectation>;
}

/// Report plus verdict for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub benchmark: &'static str,
    #[serde(flatten)]
    pub report: Report,
    pub verdict: Verdict,
}

impl Outcome {
    /// Write the report to `out`, then any validation diagnostic to `err`
    ///
    /// Returns the process exit status: 0 unless validation failed.
    pub fn emit(&self, out: &mut impl Write, err: &mut impl Write) -> Result<u8, HarnessError> {
        write!(out, "{}", self.report)?;
        out.flush()?;

        if let Verdict::Failed(failure) = &self.verdict {
            writeln!(err, "ERROR: {}", failure)?;
            err.flush()?;
        }
        Ok(self.verdict.exit_code())
    }
}

/// Execute one timed run
pub fn run<B: Benchmark>(bench: &B) -> Result<Outcome, HarnessError> {
    let name = bench.name();

    let t0 = clock::now()?;
    trace!(benchmark = name, "startup phase");
    let input = bench.startup()?;

    let t1 = clock::now()?;
    trace!(benchmark = name, "compute phase");
    let output = black_box(bench.compute(black_box(input))?);

    let t2 = clock::now()?;
    let result = bench.result(&output);
    drop(output);

    let report = Report::new(elapsed_us(t0, t1), elapsed_us(t1, t2), result);
    debug!(
        benchmark = name,
        startup_time_us = report.startup_time_us,
        compute_time_us = report.compute_time_us,
        result,
        "run complete"
    );

    let verdict = Verdict::of(bench.expectation().as_ref(), result);
    debug!(benchmark = name, ?verdict, "validated");

    Ok(Outcome {
        benchmark: name,
        report,
        verdict,
    })
}

/// Run `bench` and print its report the way the standalone programs do
///
/// Report on stdout, diagnostics on stderr, exit status 1 on validation
/// failure or on any fatal [`HarnessError`] (in which case no report is
/// printed).
pub fn run_program<B: Benchmark>(bench: &B) -> ExitCode {
    let code = run(bench).and_then(|outcome| {
        outcome.emit(&mut std::io::stdout().lock(), &mut std::io::stderr().lock())
    });
    match code {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!(benchmark = bench.name(), "{}", e);
            eprintln!("ERROR: {}", e);
            ExitCode::from(1)
        }
    }
}
