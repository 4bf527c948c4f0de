use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use tracing::info;
use tracing_subscriber::prelude::*;

use slider_puzzle::{Board, Solver};

#[derive(Parser)]
#[command(name = "slider-puzzle")]
#[command(version, about = "Find a shortest solution to a sliding tile puzzle", long_about = None)]
struct Cli {
    /// Puzzle file: the dimension n, then n rows of n tiles (0 is the blank)
    input: PathBuf,

    /// Also print the direction the blank moves between boards
    #[arg(long)]
    moves: bool,

    /// Highlight the blank tile
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn init_logging(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

/// Same layout as `Board`'s `Display`, with the blank optionally highlighted.
fn write_board(out: &mut impl Write, board: &Board, color: bool) -> io::Result<()> {
    let size = board.dimension();
    let width = board.tile_width();
    writeln!(out, "{}", size)?;
    for row in 0..size {
        for col in 0..size {
            let cell = format!("{:>width$}", board.tile(row, col), width = width);
            if color && board.tile(row, col) == 0 {
                write!(out, " {}", cell.reverse())?;
            } else {
                write!(out, " {}", cell)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let initial: Board = text
        .parse()
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    let solver = Solver::new(&initial)?;
    info!(stats = ?solver.stats(), "search finished");

    let color = match cli.color {
        ColorChoice::Auto => io::stdout().is_tty(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match solver.solution() {
        None => writeln!(out, "No solution possible")?,
        Some(path) => {
            writeln!(out, "Minimum number of moves = {}", solver.moves())?;
            let moves = solver.solution_moves().unwrap_or_default();
            for (i, board) in path.iter().enumerate() {
                if cli.moves && i > 0 {
                    if let Some(movement) = moves.get(i - 1) {
                        writeln!(out, "{}", movement)?;
                    }
                }
                write_board(&mut out, board, color)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
