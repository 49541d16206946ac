//! Solve orchestration for the `advent` subcommands.
//!
//! Each function parses puzzle text with a pure [`crate::core`] component,
//! applies the configured limits, and hands back an [`Answer`] for
//! [`crate::io::report`]. Core errors keep their type under the added context
//! so [`crate::exit_codes::for_error`] can classify them.

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::{info, instrument};

use crate::core::almanac::{Almanac, SeedMode};
use crate::core::category::Category;
use crate::core::maze::Grid;
use crate::core::wasteland::Network;
use crate::io::config::{MazeConfig, WastelandConfig};
use crate::io::input::Puzzle;
use crate::io::report::Answer;

/// How `advent wasteland` walks the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WalkStrategy {
    /// One walker from `start_node` to `end_node`.
    Single,
    /// Every node ending in `start_suffix` at once, one thread per walker.
    Parallel,
    /// Each walker's first arrival, combined by least common multiple.
    Lcm,
}

/// What `advent maze` reports about the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeQuestion {
    Distance,
    Area,
}

#[instrument(skip_all, fields(mode = ?mode))]
pub fn solve_almanac(text: &str, mode: SeedMode) -> Result<Answer> {
    let almanac = Almanac::parse(text).context("parse almanac")?;
    let lowest = almanac
        .lowest_location(mode)
        .context("find lowest location")?;
    info!(seeds = almanac.seeds().len(), lowest, "almanac solved");
    let question = match mode {
        SeedMode::Points => "lowest-location",
        SeedMode::Ranges => "lowest-location-ranges",
    };
    Ok(Answer {
        puzzle: Puzzle::Almanac,
        question,
        answer: lowest,
    })
}

/// Convert one value along the almanac chain from `from` to `to`.
#[instrument(skip(text))]
pub fn convert_value(text: &str, value: i64, from: Category, to: Category) -> Result<Answer> {
    let almanac = Almanac::parse(text).context("parse almanac")?;
    let converted = almanac
        .convert_to(value, from, to)
        .with_context(|| format!("convert {value} from {from} to {to}"))?;
    info!(converted, "almanac value converted");
    Ok(Answer {
        puzzle: Puzzle::Almanac,
        question: "conversion",
        answer: converted,
    })
}

#[instrument(skip(text, config))]
pub fn solve_maze(text: &str, question: MazeQuestion, config: &MazeConfig) -> Result<Answer> {
    let grid = Grid::parse(text).context("parse maze")?;
    let traced = match config.step_limit {
        0 => grid.trace_loop(),
        limit => grid.trace_loop_within(limit),
    }
    .context("trace maze loop")?;
    let (question, count) = match question {
        MazeQuestion::Distance => ("farthest-distance", traced.distance()),
        MazeQuestion::Area => ("enclosed-area", traced.enclosed_area()),
    };
    info!(
        width = grid.width(),
        height = grid.height(),
        loop_len = traced.len(),
        count,
        "maze solved"
    );
    Answer::from_count(Puzzle::Maze, question, count)
}

#[instrument(skip(text, config))]
pub fn solve_wasteland(
    text: &str,
    strategy: WalkStrategy,
    config: &WastelandConfig,
) -> Result<Answer> {
    let network = Network::parse(text).context("parse wasteland network")?;
    let (question, steps) = match strategy {
        WalkStrategy::Single => {
            let steps = network
                .traverse_single(&config.start_node, &config.end_node, config.max_steps)
                .with_context(|| format!("walk {} to {}", config.start_node, config.end_node))?;
            ("single-steps", steps)
        }
        WalkStrategy::Parallel => {
            let steps = network
                .traverse_parallel(&config.start_suffix, &config.end_suffix, config.max_steps)
                .with_context(|| {
                    format!(
                        "walk every *{} node to *{} in parallel",
                        config.start_suffix, config.end_suffix
                    )
                })?;
            ("parallel-steps", steps)
        }
        WalkStrategy::Lcm => {
            let steps = network
                .cycle_steps(&config.start_suffix, &config.end_suffix, config.max_steps)
                .with_context(|| {
                    format!(
                        "combine *{} walker cycles to *{}",
                        config.start_suffix, config.end_suffix
                    )
                })?;
            ("cycle-steps", steps)
        }
    };
    info!(nodes = network.len(), steps, "wasteland solved");
    Answer::from_count(Puzzle::Wasteland, question, steps)
}
