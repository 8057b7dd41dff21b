//! The three baseline workloads
//!
//! - `fibonacci`: recursive fib(35), call overhead
//! - `matmul`: naive 128×128 multiply, memory access pattern
//! - `sieve`: primes up to 100,000, array marking

pub mod fibonacci;
pub mod matmul;
pub mod sieve;

pub use fibonacci::{Fibonacci, fibonacci};
pub use matmul::{Matrix, MatrixMultiply};
pub use sieve::{Primes, sieve};
