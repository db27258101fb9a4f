//! Binary Puzzle Solver
//!
//! Enumerates every valid binary puzzle grid of a given dimension: each row
//! and column holds as many zeros as ones, no three equal cells are adjacent
//! along a line, and no two rows or columns are the same.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use binary_puzzle::rules::is_solution_valid;
use binary_puzzle::{count_solutions, SearchConfig, Solution, SolutionSearch};

/// Enumerates and checks binary puzzle solutions.
#[derive(Parser)]
#[command(name = "binary-puzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print solutions, one per line in row-major order.
    Solve {
        #[command(flatten)]
        search: SearchArgs,
        /// Stop after this many solutions.
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print each solution as space-separated rows.
        #[arg(long)]
        rows: bool,
    },
    /// Count every solution and report how long it took.
    Count {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Check whether a grid satisfies every rule.
    Verify {
        /// Cells in row-major order; whitespace is ignored.
        grid: String,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Grid side length (even, 2 to 62).
    dimension: usize,
    /// Accept grids with repeated rows or columns.
    #[arg(long)]
    allow_duplicate_lines: bool,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig::new(self.dimension).unique_lines(!self.allow_duplicate_lines)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Command::Solve {
            search,
            limit,
            rows,
        } => run_solve(search.config(), limit, rows),
        Command::Count { search } => run_count(search.config()),
        Command::Verify { grid } => run_verify(&grid),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr subscriber so stdout carries only results.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "binary_puzzle=warn",
        1 => "binary_puzzle=debug",
        _ => "binary_puzzle=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Streams solutions to stdout as they are found.
fn run_solve(
    config: SearchConfig,
    limit: Option<usize>,
    rows: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let search = SolutionSearch::with_config(config)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for solution in search.take(limit.unwrap_or(usize::MAX)) {
        write!(out, "{}", render(&solution?, rows))?;
    }
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

/// Formats one solution the way `solve` prints it.
fn render(solution: &Solution, rows: bool) -> String {
    if rows {
        format!("{}\n", solution.format_rows())
    } else {
        format!("{}\n", solution)
    }
}

/// Exhausts the search and prints the count with the elapsed time.
fn run_count(config: SearchConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let count = count_solutions(config)?;
    println!("{} solutions", count);
    eprintln!(
        "dimension={}, all solutions: {:.3}s",
        config.dimension,
        started.elapsed().as_secs_f64()
    );
    Ok(ExitCode::SUCCESS)
}

/// Reports validity; exits with failure for an invalid grid.
fn run_verify(text: &str) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let solution = Solution::parse(text)?;
    if is_solution_valid(&solution) {
        println!("valid {0}x{0} grid", solution.dimension());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("invalid {0}x{0} grid", solution.dimension());
        Ok(ExitCode::FAILURE)
    }
}
