// Prime sieve benchmark - Sieve of Eratosthenes up to 100,000
// Expected: 9592

use baseline_harness::payload::Primes;
use std::process::ExitCode;

fn main() -> ExitCode {
    baseline_harness::logging::init();
    baseline_harness::run_program(&Primes::default())
}
