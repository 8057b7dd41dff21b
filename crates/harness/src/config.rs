//! Suite configuration
//!
//! The standalone programs always run with the built-in inputs. The
//! `baseline` driver can override them from a TOML file; every key is
//! optional and falls back to the default:
//!
//! ```toml
//! [fibonacci]
//! n = 35
//! expected = 9227465
//! warmup_iterations = 100000
//!
//! [matrix-multiply]
//! size = 128
//!
//! [primes]
//! limit = 100000
//! expected = 9592
//! ```

use crate::error::HarnessError;
use crate::harness::{self, Benchmark, Outcome};
use crate::payload::fibonacci::MAX_N;
use crate::payload::{Fibonacci, MatrixMultiply, Primes};
use crate::validate::Expectation;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which workload to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BenchmarkKind {
    Fibonacci,
    MatrixMultiply,
    Primes,
}

impl BenchmarkKind {
    pub const ALL: [BenchmarkKind; 3] = [
        BenchmarkKind::Fibonacci,
        BenchmarkKind::MatrixMultiply,
        BenchmarkKind::Primes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BenchmarkKind::Fibonacci => "fibonacci",
            BenchmarkKind::MatrixMultiply => "matrix-multiply",
            BenchmarkKind::Primes => "primes",
        }
    }
}

impl fmt::Display for BenchmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BenchmarkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BenchmarkKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = BenchmarkKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown benchmark '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Inputs and expected values for every benchmark
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    pub fibonacci: Fibonacci,
    #[serde(rename = "matrix-multiply")]
    pub matrix_multiply: MatrixMultiply,
    pub primes: Primes,
}

impl SuiteConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, HarnessError> {
        let config: SuiteConfig = toml::from_str(toml_str)
            .map_err(|e| HarnessError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("Error reading config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), HarnessError> {
        // The warm-up sum over 0..k is zero for k < 2, which trips the sentinel
        if self.fibonacci.warmup_iterations < 2 {
            return Err(HarnessError::Config(format!(
                "fibonacci.warmup_iterations must be at least 2, got {}",
                self.fibonacci.warmup_iterations
            )));
        }
        if self.fibonacci.n > MAX_N {
            return Err(HarnessError::Config(format!(
                "fibonacci.n must be at most {}, got {}",
                MAX_N, self.fibonacci.n
            )));
        }
        Ok(())
    }

    /// Run one benchmark with this configuration
    pub fn run(&self, kind: BenchmarkKind) -> Result<Outcome, HarnessError> {
        match kind {
            BenchmarkKind::Fibonacci => harness::run(&self.fibonacci),
            BenchmarkKind::MatrixMultiply => harness::run(&self.matrix_multiply),
            BenchmarkKind::Primes => harness::run(&self.primes),
        }
    }

    pub fn expectation(&self, kind: BenchmarkKind) -> Option<Expectation> {
        match kind {
            BenchmarkKind::Fibonacci => self.fibonacci.expectation(),
            BenchmarkKind::MatrixMultiply => self.matrix_multiply.expectation(),
            BenchmarkKind::Primes => self.primes.expectation(),
        }
    }

    /// One-line summary of a benchmark's input, e.g. `n = 35`
    pub fn describe_input(&self, kind: BenchmarkKind) -> String {
        match kind {
            BenchmarkKind::Fibonacci => format!("n = {}", self.fibonacci.n),
            BenchmarkKind::MatrixMultiply => {
                let size = self.matrix_multiply.size;
                format!("{}x{}", size, size)
            }
            BenchmarkKind::Primes => format!("limit = {}", self.primes.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.fibonacci.n, 35);
        assert_eq!(config.fibonacci.expected, 9227465);
        assert_eq!(config.fibonacci.warmup_iterations, 100_000);
        assert_eq!(config.matrix_multiply.size, 128);
        assert_eq!(config.primes.limit, 100_000);
        assert_eq!(config.primes.expected, 9592);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(SuiteConfig::from_toml("").unwrap(), SuiteConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SuiteConfig::from_toml(
            r#"
            [fibonacci]
            n = 10
            expected = 55

            [matrix-multiply]
            size = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.fibonacci.n, 10);
        assert_eq!(config.fibonacci.expected, 55);
        assert_eq!(config.fibonacci.warmup_iterations, 100_000);
        assert_eq!(config.matrix_multiply.size, 4);
        assert_eq!(config.primes, Primes::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SuiteConfig::from_toml("[primes]\nbound = 10\n").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config"));
    }

    #[test]
    fn test_degenerate_warmup_rejected() {
        let err = SuiteConfig::from_toml("[fibonacci]\nwarmup_iterations = 1\n").unwrap_err();
        assert!(err.to_string().contains("warmup_iterations"));
    }

    #[test]
    fn test_fibonacci_n_bounded_by_result_width() {
        let err = SuiteConfig::from_toml("[fibonacci]\nn = 93\n").unwrap_err();
        assert_eq!(err.to_string(), "fibonacci.n must be at most 92, got 93");

        let config = SuiteConfig::from_toml("[fibonacci]\nn = 92\n").unwrap();
        assert_eq!(config.fibonacci.n, MAX_N);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[primes]\nlimit = 10\nexpected = 4").unwrap();
        let config = SuiteConfig::load(file.path()).unwrap();
        let outcome = config.run(BenchmarkKind::Primes).unwrap();
        assert_eq!(outcome.report.result, 4);
        assert!(!outcome.verdict.is_failure());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SuiteConfig::load(Path::new("/nonexistent/baseline.toml")).unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in BenchmarkKind::ALL {
            assert_eq!(kind.name().parse::<BenchmarkKind>().unwrap(), kind);
        }
        assert!("matmul".parse::<BenchmarkKind>().is_err());
    }

    #[test]
    fn test_expectations() {
        let config = SuiteConfig::default();
        let fib = config.expectation(BenchmarkKind::Fibonacci).unwrap();
        assert_eq!(fib.label, "fib(35)");
        assert_eq!(fib.expected, 9227465);
        assert!(config.expectation(BenchmarkKind::MatrixMultiply).is_none());
        assert_eq!(
            config.expectation(BenchmarkKind::Primes).unwrap().label,
            "primes(100000)"
        );
    }
}
