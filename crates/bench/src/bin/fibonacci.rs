// Fibonacci benchmark - naive recursive fib(35)
// Expected: 9227465

use baseline_harness::payload::Fibonacci;
use std::process::ExitCode;

fn main() -> ExitCode {
    baseline_harness::logging::init();
    baseline_harness::run_program(&Fibonacci::default())
}
