//! Puzzle solver CLI.
//!
//! Reads puzzle text from `<inputs_dir>/dayNN/input.txt` (or `--input`),
//! prints the answer on stdout, and exits with a code from
//! [`advent::exit_codes`] on failure.

use std::io;
use std::path::PathBuf;

use advent::core::almanac::SeedMode;
use advent::core::category::Category;
use advent::exit_codes;
use advent::io::config::{AdventConfig, load_config, write_config};
use advent::io::input::{Puzzle, load_input};
use advent::io::report::{Answer, emit};
use advent::logging;
use advent::solve::{self, MazeQuestion, WalkStrategy};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "advent",
    version,
    about = "Seed almanac, pipe maze, and wasteland network solvers"
)]
struct Cli {
    /// Config file; a missing file means defaults.
    #[arg(long, global = true, default_value = "advent.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Read this file instead of `<inputs_dir>/dayNN/input.txt` (`-` for stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print one JSON object instead of the bare number.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Lowest location for the listed seeds, or convert one value along the chain.
    Almanac {
        #[command(flatten)]
        input: InputArgs,

        /// Read the seed list as (start, length) pairs.
        #[arg(long, conflicts_with = "value")]
        ranges: bool,

        /// Convert this value instead of searching for the lowest location.
        #[arg(long)]
        value: Option<i64>,

        /// Category `--value` starts in.
        #[arg(long, default_value = "seed")]
        from: Category,

        /// Category `--value` is converted to.
        #[arg(long, default_value = "location")]
        to: Category,
    },
    /// Farthest distance along the loop through `S`, or the area it encloses.
    Maze {
        #[command(flatten)]
        input: InputArgs,

        /// Report the number of enclosed cells instead.
        #[arg(long)]
        area: bool,
    },
    /// Steps needed to walk the network.
    Wasteland {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = WalkStrategy::Single)]
        strategy: WalkStrategy,
    },
    /// Print the effective config as TOML.
    Config {
        /// Write it to the `--config` path instead.
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::for_error(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    match cli.command {
        Command::Almanac {
            input,
            ranges,
            value,
            from,
            to,
        } => {
            let text = read(&config, Puzzle::Almanac, &input)?;
            let answer = match value {
                Some(value) => solve::convert_value(&text, value, from, to)?,
                None => {
                    let mode = if ranges {
                        SeedMode::Ranges
                    } else {
                        SeedMode::Points
                    };
                    solve::solve_almanac(&text, mode)?
                }
            };
            print(&answer, &input)
        }
        Command::Maze { input, area } => {
            let text = read(&config, Puzzle::Maze, &input)?;
            let question = if area {
                MazeQuestion::Area
            } else {
                MazeQuestion::Distance
            };
            let answer = solve::solve_maze(&text, question, &config.maze)?;
            print(&answer, &input)
        }
        Command::Wasteland { input, strategy } => {
            let text = read(&config, Puzzle::Wasteland, &input)?;
            let answer = solve::solve_wasteland(&text, strategy, &config.wasteland)?;
            print(&answer, &input)
        }
        Command::Config { write } => {
            if write {
                write_config(&cli.config, &config)?;
                info!(path = %cli.config.display(), "config written");
                return Ok(());
            }
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn read(config: &AdventConfig, puzzle: Puzzle, input: &InputArgs) -> Result<String> {
    load_input(&config.inputs_dir, puzzle, input.input.as_deref())
}

fn print(answer: &Answer, input: &InputArgs) -> Result<()> {
    emit(&mut io::stdout().lock(), answer, input.json)
}
