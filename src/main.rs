//! 20-Ball Pyramid Puzzle Solver
//!
//! Solves the tetrahedral pyramid puzzle where six flat pieces must be
//! arranged to form a four-layer stack of twenty balls. The solver finds all
//! solutions that are distinct under rotation and reflection, prints them as
//! layer diagrams and provides an interactive 3D viewer.

mod visualization;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use pyramid::grid::{count_distinct, Solution};
use pyramid::persistence::{self, format_report};
use pyramid::solver::{self, SearchOptions, Symmetry};

/// Solves the 20-ball pyramid puzzle and visualizes the solutions.
#[derive(Parser)]
#[command(name = "pyramid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding solutions.txt and solutions.bin.
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the puzzle, print the solutions and save them to disk.
    Solve(SolveArgs),
    /// Display saved solutions in an interactive 3D viewer.
    Display,
    /// Show the number of saved solutions.
    Count,
}

#[derive(clap::Args, Default)]
struct SolveArgs {
    /// Stop after this many solutions.
    #[arg(long)]
    limit: Option<usize>,

    /// How the asymmetric L piece is restricted.
    #[arg(long, value_enum, default_value_t = SymmetryArg::Fixed)]
    symmetry: SymmetryArg,

    /// Only print the summary, not every diagram.
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum SymmetryArg {
    /// One orientation in the first view: one copy of each solution.
    #[default]
    Fixed,
    /// The L piece may use all three views.
    AllViews,
    /// The L piece may use every orientation in every view.
    Unrestricted,
}

impl From<SymmetryArg> for Symmetry {
    fn from(arg: SymmetryArg) -> Self {
        match arg {
            SymmetryArg::Fixed => Symmetry::Fixed,
            SymmetryArg::AllViews => Symmetry::AllViews,
            SymmetryArg::Unrestricted => Symmetry::Unrestricted,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve(args)) => {
            run_solver(&cli.dir, &args)?;
        }
        Some(Command::Display) => run_display(&cli.dir)?,
        Some(Command::Count) => run_count(&cli.dir)?,
        None => {
            // default: solve and display
            let solutions = run_solver(&cli.dir, &SolveArgs::default())?;
            if !solutions.is_empty() {
                println!("Controls: Left/Right navigate, Up/Down explode, R reset");
                visualization::display(solutions);
            }
        }
    }

    Ok(())
}

/// Solves the puzzle, prints and saves the solutions, and returns them.
fn run_solver(dir: &Path, args: &SolveArgs) -> Result<Vec<Solution>> {
    let options = SearchOptions {
        symmetry: args.symmetry.into(),
        limit: args.limit,
    };
    info!("solving with {options:?}");
    let solutions = solver::solve(options);

    if args.quiet {
        println!("{} solutions found.", solutions.len());
    } else {
        print!("{}", format_report(&solutions));
    }
    println!(
        "{} distinct up to rotation and reflection",
        count_distinct(&solutions)
    );

    persistence::save(dir, &solutions)
        .with_context(|| format!("failed to save solutions to {}", dir.display()))?;
    println!(
        "Wrote {} and {}",
        persistence::SOLUTIONS_TXT,
        persistence::SOLUTIONS_BIN
    );

    Ok(solutions)
}

/// Loads and displays saved solutions.
fn run_display(dir: &Path) -> Result<()> {
    match persistence::load_all(dir)? {
        Some(solutions) => {
            println!("Loaded {} solutions", solutions.len());
            println!("Controls: Left/Right navigate, Up/Down explode, R reset");
            visualization::display(solutions);
        }
        None => eprintln!("No solutions.bin found. Run 'pyramid solve' first."),
    }
    Ok(())
}

/// Prints the count of saved solutions.
fn run_count(dir: &Path) -> Result<()> {
    match persistence::count(dir)? {
        Some(count) => println!("{} solutions", count),
        None => eprintln!("No solutions.bin found. Run 'pyramid solve' first."),
    }
    Ok(())
}
