//! Baseline driver CLI
//!
//! Runs any of the bundled benchmarks by name and checks reports produced
//! by other implementations of the same output contract.

use baseline_harness::{BenchmarkKind, Report, SuiteConfig, Verdict};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

#[derive(Parser)]
#[command(name = "baseline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Single-run compute baselines: fibonacci, matrix-multiply, primes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bundled benchmarks with their inputs and expected results
    List {
        /// TOML file overriding inputs and expected values
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run one benchmark once and print its report
    Run {
        /// Benchmark name (fibonacci, matrix-multiply, primes)
        benchmark: BenchmarkKind,

        /// TOML file overriding inputs and expected values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Parse a report and optionally validate its result
    Check {
        /// Report file (reads stdin when omitted or `-`)
        path: Option<PathBuf>,

        /// Validate RESULT against this benchmark's expected value
        #[arg(short, long)]
        benchmark: Option<BenchmarkKind>,

        /// TOML file overriding inputs and expected values
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The three-line STARTUP_TIME_US / COMPUTE_TIME_US / RESULT report
    Text,
    /// The full outcome as JSON
    Json,
}

fn main() {
    baseline_harness::logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { config } => {
            let config = load_config(config.as_deref());
            run_list(&config);
        }
        Commands::Run {
            benchmark,
            config,
            format,
        } => {
            let config = load_config(config.as_deref());
            run_benchmark(&config, benchmark, format);
        }
        Commands::Check {
            path,
            benchmark,
            config,
        } => {
            let config = load_config(config.as_deref());
            run_check(&config, path.as_deref(), benchmark);
        }
    }
}

fn load_config(path: Option<&Path>) -> SuiteConfig {
    let Some(path) = path else {
        return SuiteConfig::default();
    };
    match SuiteConfig::load(path) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded config");
            config
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    }
}

fn run_list(config: &SuiteConfig) {
    for kind in BenchmarkKind::ALL {
        let expected = match config.expectation(kind) {
            Some(e) => format!("expected {} = {}", e.label, e.expected),
            None => "checksum".to_string(),
        };
        println!(
            "{:16} {:16} {}",
            kind.name(),
            config.describe_input(kind),
            expected
        );
    }
}

fn run_benchmark(config: &SuiteConfig, kind: BenchmarkKind, format: Format) {
    let outcome = match config.run(kind) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let code = match format {
        Format::Text => outcome.emit(&mut io::stdout().lock(), &mut io::stderr().lock()),
        Format::Json => match serde_json::to_string_pretty(&outcome) {
            Ok(json) => {
                println!("{}", json);
                if let Verdict::Failed(failure) = &outcome.verdict {
                    eprintln!("ERROR: {}", failure);
                }
                Ok(outcome.verdict.exit_code())
            }
            Err(e) => {
                eprintln!("ERROR: failed to serialize outcome: {}", e);
                process::exit(1);
            }
        },
    };

    match code {
        Ok(code) => process::exit(i32::from(code)),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    }
}

fn run_check(config: &SuiteConfig, path: Option<&Path>, kind: Option<BenchmarkKind>) {
    let input = match read_input(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: failed to read report: {}", e);
            process::exit(1);
        }
    };

    let report = match Report::parse(&input) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let verdict = Verdict::of(kind.and_then(|k| config.expectation(k)).as_ref(), report.result);
    println!(
        "startup {:.3} ms, compute {:.3} ms, total {} us, result {}",
        report.startup_time_ms(),
        report.compute_time_ms(),
        report.total_time_us(),
        report.result
    );

    if let Verdict::Failed(failure) = &verdict {
        eprintln!("ERROR: {}", failure);
    }
    process::exit(i32::from(verdict.exit_code()));
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
