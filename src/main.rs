//! Crucible Route Solver
//!
//! Reads a grid of single-digit cell costs and finds the cheapest route from
//! the top-left to the bottom-right corner under straight-run limits.

use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::info;

use crucible::{logging, parse_grid, Grid, Outcome, ParseError, PathEngine, RunLimits, SearchError};

/// Finds the cheapest route across a cost grid with straight-run limits.
#[derive(Parser)]
#[command(name = "crucible")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the minimal route cost.
    Solve(SearchArgs),
    /// Print the minimal route cost and draw the route over the grid.
    Route(SearchArgs),
    /// Print the minimal cost for every max run in a range.
    Sweep(SweepArgs),
}

/// Preset run limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// 1 to 3 steps per straight run.
    Standard,
    /// 4 to 10 steps per straight run.
    Ultra,
}

impl Mode {
    fn limits(self) -> RunLimits {
        match self {
            Mode::Standard => RunLimits::STANDARD,
            Mode::Ultra => RunLimits::ULTRA,
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    /// Grid file: one row per line, digits for costs, '#' for holes.
    input: PathBuf,

    /// Preset run limits.
    #[arg(long, value_enum, default_value_t = Mode::Standard)]
    mode: Mode,

    /// Override the preset's minimum straight run.
    #[arg(long)]
    min_run: Option<u32>,

    /// Override the preset's maximum straight run.
    #[arg(long)]
    max_run: Option<u32>,

    /// Give up after this many state expansions.
    #[arg(long)]
    budget: Option<usize>,
}

impl SearchArgs {
    /// Applies explicit overrides on top of the preset.
    fn limits(&self) -> Result<RunLimits, SearchError> {
        let preset = self.mode.limits();
        RunLimits::new(
            self.min_run.unwrap_or(preset.min_run()),
            self.max_run.unwrap_or(preset.max_run()),
        )
    }
}

#[derive(Args)]
struct SweepArgs {
    /// Grid file: one row per line, digits for costs, '#' for holes.
    input: PathBuf,

    /// Minimum straight run used for every search.
    #[arg(long, default_value_t = 1)]
    min_run: u32,

    /// First maximum straight run to try.
    #[arg(long)]
    from: u32,

    /// Last maximum straight run to try.
    #[arg(long)]
    to: u32,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error(transparent)]
    Search(#[from] SearchError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match cli.command {
        Command::Solve(args) => run_solve(&args, false),
        Command::Route(args) => run_solve(&args, true),
        Command::Sweep(args) => run_sweep(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Reads and parses the grid file at `path`.
fn load_grid(path: &Path) -> Result<Grid, CliError> {
    let input = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_grid(&input).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(rows = grid.rows(), cols = grid.cols(), "loaded grid");
    Ok(grid)
}

/// Solves one configuration and prints the cost, plus the route if asked.
fn run_solve(args: &SearchArgs, draw_route: bool) -> Result<(), CliError> {
    let limits = args.limits()?;
    let grid = load_grid(&args.input)?;

    let mut engine = PathEngine::new(&grid, limits);
    if let Some(budget) = args.budget {
        engine = engine.with_budget(budget);
    }
    let outcome = engine.run()?;

    println!("{}", format_cost(&outcome));
    if draw_route {
        if let Some(route) = outcome.route() {
            println!("{}", grid.format_route(route));
        }
    }
    Ok(())
}

/// Prints the cost for each max run in the requested range.
fn run_sweep(args: &SweepArgs) -> Result<(), CliError> {
    let grid = load_grid(&args.input)?;
    let results = sweep(&grid, args.min_run, args.from..=args.to)?;
    println!("{}", format_sweep(&results));
    Ok(())
}

/// Searches once per max run; an invalid pairing stops the sweep.
fn sweep(
    grid: &Grid,
    min_run: u32,
    max_runs: RangeInclusive<u32>,
) -> Result<Vec<(u32, Outcome)>, SearchError> {
    max_runs
        .map(|max_run| {
            let limits = RunLimits::new(min_run, max_run)?;
            Ok((max_run, PathEngine::new(grid, limits).run()?))
        })
        .collect()
}

fn format_cost(outcome: &Outcome) -> String {
    match outcome.cost() {
        Some(cost) => cost.to_string(),
        None => "unreachable".to_string(),
    }
}

fn format_sweep(results: &[(u32, Outcome)]) -> String {
    results
        .iter()
        .map(|(max_run, outcome)| format!("max_run {}: {}", max_run, format_cost(outcome)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_args(extra: &[&str]) -> SearchArgs {
        let mut argv = vec!["crucible", "solve", "grid.txt"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Solve(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_mode_presets() {
        assert_eq!(search_args(&[]).limits(), Ok(RunLimits::STANDARD));
        assert_eq!(search_args(&["--mode", "ultra"]).limits(), Ok(RunLimits::ULTRA));
    }

    #[test]
    fn test_explicit_runs_override_preset() {
        let args = search_args(&["--mode", "ultra", "--max-run", "6"]);
        assert_eq!(args.limits(), RunLimits::new(4, 6));

        let args = search_args(&["--min-run", "5", "--max-run", "3"]);
        assert!(matches!(
            args.limits(),
            Err(SearchError::InvalidConfiguration {
                min_run: 5,
                max_run: 3
            })
        ));
    }

    #[test]
    fn test_verbosity_is_global() {
        let cli = Cli::try_parse_from(["crucible", "route", "grid.txt", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_sweep_reports_unreachable_as_data() {
        let grid = parse_grid("111").unwrap();
        let results = sweep(&grid, 1, 1..=3).unwrap();

        insta::assert_snapshot!(format_sweep(&results), @r"
        max_run 1: unreachable
        max_run 2: 2
        max_run 3: 2
        ");
    }

    #[test]
    fn test_sweep_rejects_max_below_min() {
        let grid = parse_grid("111").unwrap();
        assert!(matches!(
            sweep(&grid, 3, 1..=4),
            Err(SearchError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_example_costs() {
        let grid = parse_grid(include_str!("../tests/fixtures/example.txt")).unwrap();
        let standard = PathEngine::new(&grid, RunLimits::STANDARD).run().unwrap();
        let ultra = PathEngine::new(&grid, RunLimits::ULTRA).run().unwrap();
        assert_eq!(format_cost(&standard), "102");
        assert_eq!(format_cost(&ultra), "94");
    }
}
