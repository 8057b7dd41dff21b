//! Recursive Fibonacci
//!
//! Measures call and stack-frame overhead. The recursion is deliberately
//! naive: memoizing or iterating would make the number meaningless.

use crate::error::HarnessError;
use crate::harness::Benchmark;
use crate::validate::Expectation;
use serde::Deserialize;
use std::hint::black_box;

pub const DEFAULT_N: u64 = 35;
pub const DEFAULT_EXPECTED: i64 = 9_227_465;
pub const DEFAULT_WARMUP_ITERATIONS: u64 = 100_000;

/// Largest n whose Fibonacci number fits the reported `i64`
pub const MAX_N: u64 = 92;

/// fib(0) = 0, fib(1) = 1, fib(n) = fib(n-1) + fib(n-2)
pub fn fibonacci(n: u64) -> u64 {
    if n <= 1 {
        n
    } else {
        fibonacci(n - 1) + fibonacci(n - 2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fibonacci {
    pub n: u64,
    pub expected: i64,
    /// Length of the startup accumulation loop (at least 2)
    pub warmup_iterations: u64,
}

impl Default for Fibonacci {
    fn default() -> Self {
        Fibonacci {
            n: DEFAULT_N,
            expected: DEFAULT_EXPECTED,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
        }
    }
}

impl Benchmark for Fibonacci {
    type Input = u64;
    type Output = u64;

    fn name(&self) -> &'static str {
        "fibonacci"
    }

    /// Accumulate `0..warmup_iterations` and check it against the zero
    /// sentinel, so the optimizer has to keep the loop.
    fn startup(&self) -> Result<u64, HarnessError> {
        let mut warmup: u64 = 0;
        for i in 0..black_box(self.warmup_iterations) {
            warmup = warmup.wrapping_add(i);
        }
        if black_box(warmup) == 0 {
            return Err(HarnessError::Warmup);
        }
        Ok(self.n)
    }

    fn compute(&self, n: u64) -> Result<u64, HarnessError> {
        Ok(fibonacci(n))
    }

    fn result(&self, output: &u64) -> i64 {
        i64::try_from(*output).unwrap_or(i64::MAX)
    }

    fn expectation(&self) -> Option<Expectation> {
        Some(Expectation::new(format!("fib({})", self.n), self.expected))
    }
}
