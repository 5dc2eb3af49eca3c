use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the nearby services workspace",
    long_about = "A unified CLI for launching the map, running headless searches,\n\
                  benchmarks, and CI checks in the nearby services workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the map UI
    Ui,
    /// Run one headless nearby search and print the ranked list
    Search {
        /// Place type to search for
        #[arg(long = "type", default_value = "pharmacy")]
        place_type: String,
        /// Search radius in metres
        #[arg(long, default_value_t = 2000)]
        radius: u32,
        /// Output format: table, csv or json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build the examples with every provider feature enabled
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    match Command::new("cargo").args(args).status() {
        Ok(status) => status,
        Err(err) => {
            eprintln!("failed to execute cargo: {err}");
            exit(1);
        }
    }
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test nearby_core (default features)");
    run_cargo(&["test", "-p", "nearby_core"]);

    step("Test nearby_core (all features)");
    run_cargo(&["test", "-p", "nearby_core", "--all-features"]);

    step("Test nearby_ui");
    run_cargo(&["test", "-p", "nearby_ui"]);
}

fn ci_examples() {
    step("Build nearby_search example");
    run_cargo(&[
        "build",
        "-p",
        "nearby_core",
        "--example",
        "nearby_search",
        "--features",
        "google-places,ip-location",
    ]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "nearby_core", "--bench", "performance"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ui => {
            run_cargo(&["run", "-p", "nearby_ui"]);
        }
        Commands::Search {
            place_type,
            radius,
            format,
        } => {
            let radius = radius.to_string();
            run_cargo(&[
                "run",
                "-p",
                "nearby_core",
                "--example",
                "nearby_search",
                "--features",
                "google-places,ip-location",
                "--",
                "--type",
                &place_type,
                "--radius",
                &radius,
                "--format",
                &format,
            ]);
        }
        Commands::Bench => {
            run_cargo(&["bench", "--package", "nearby_core", "--bench", "performance"]);
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
