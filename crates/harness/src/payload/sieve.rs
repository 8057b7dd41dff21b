//! Sieve of Eratosthenes
//!
//! Counts primes in `[0, n]` with a boolean marker array. The marker buffer
//! belongs to the algorithm, so it is allocated inside the compute phase;
//! startup only fixes `n`.

use crate::error::{HarnessError, try_filled};
use crate::harness::Benchmark;
use crate::validate::Expectation;
use serde::Deserialize;

pub const DEFAULT_LIMIT: usize = 100_000;
pub const DEFAULT_EXPECTED: i64 = 9_592;

/// Number of primes `<= n`
///
/// The outer loop steps by one through composites too. Their multiples are
/// already cleared by their smallest prime factor, so it only costs a
/// failed marker check.
pub fn sieve(n: usize) -> Result<usize, HarnessError> {
    if n < 2 {
        return Ok(0);
    }

    let len = n.checked_add(1).ok_or(HarnessError::Allocation {
        what: "prime markers",
        elements: usize::MAX,
    })?;
    let mut is_prime = try_filled("prime markers", len, true)?;
    is_prime[0] = false;
    is_prime[1] = false;

    let mut p = 2;
    while p * p <= n {
        if is_prime[p] {
            let mut i = p * p;
            while i <= n {
                is_prime[i] = false;
                i += p;
            }
        }
        p += 1;
    }

    Ok(is_prime.iter().filter(|&&prime| prime).count())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Primes {
    pub limit: usize,
    pub expected: i64,
}

impl Default for Primes {
    fn default() -> Self {
        Primes {
            limit: DEFAULT_LIMIT,
            expected: DEFAULT_EXPECTED,
        }
    }
}

impl Benchmark for Primes {
    type Input = usize;
    type Output = usize;

    fn name(&self) -> &'static str {
        "primes"
    }

    fn startup(&self) -> Result<usize, HarnessError> {
        Ok(self.limit)
    }

    fn compute(&self, limit: usize) -> Result<usize, HarnessError> {
        sieve(limit)
    }

    fn result(&self, output: &usize) -> i64 {
        i64::try_from(*output).unwrap_or(i64::MAX)
    }

    fn expectation(&self) -> Option<Expectation> {
        Some(Expectation::new(
            format!("primes({})", self.limit),
            self.expected,
        ))
    }
}
