// Matrix multiply benchmark - naive O(n^3) 128x128, checksum only

use baseline_harness::payload::MatrixMultiply;
use std::process::ExitCode;

fn main() -> ExitCode {
    baseline_harness::logging::init();
    baseline_harness::run_program(&MatrixMultiply::default())
}
