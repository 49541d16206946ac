//! Typed failures for the puzzle components.
//!
//! Core modules return these instead of `anyhow::Error` so the CLI can tell
//! structural parse errors, lookup errors, and traversal errors apart when it
//! picks an exit code (see [`crate::exit_codes::for_error`]).

use thiserror::Error;

use crate::core::category::Category;
use crate::core::direction::Coord;

/// Failures while parsing or querying an almanac.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlmanacError {
    #[error("line {line}: expected `seeds:` declaration, got {text:?}")]
    MissingSeeds { line: usize, text: String },

    #[error("line {line}: invalid number {token:?} in {text:?}")]
    InvalidNumber {
        line: usize,
        token: String,
        text: String,
    },

    #[error("line {line}: invalid map header {text:?}")]
    InvalidHeader { line: usize, text: String },

    #[error("line {line}: unknown category {name:?}")]
    UnknownCategory { line: usize, name: String },

    #[error("line {line}: mapping must be three integers `dest src len`, got {text:?}")]
    InvalidMapping { line: usize, text: String },

    /// Negative length, or bounds that do not fit in `i64`.
    #[error("line {line}: range out of bounds in {text:?}")]
    InvalidRange { line: usize, text: String },

    #[error("seed ranges must come in (start, length) pairs, got {count} values")]
    UnpairedSeedRanges { count: usize },

    #[error("seed range starting at {start} has invalid length {length}")]
    InvalidSeedRange { start: i64, length: i64 },

    #[error("converter not found for {:?}", .0.name())]
    ConverterNotFound(Category),

    #[error("conversion chain from {from} never reaches {to}")]
    ConversionCycle { from: Category, to: Category },

    #[error("almanac declares no seeds")]
    NoSeeds,
}

/// Failures while parsing or tracing a pipe maze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("row {row}, column {column}: unknown pipe symbol {symbol:?}")]
    UnknownSymbol {
        row: usize,
        column: usize,
        symbol: char,
    },

    #[error("row {row}: empty row inside the grid")]
    EmptyRow { row: usize },

    #[error("row {row}: expected {expected} cells, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("start \"S\" not found")]
    StartNotFound,

    #[error("second start found at {second} (first at {first})")]
    MultipleStarts { first: Coord, second: Coord },

    #[error("no pipe connects to the start at {start}")]
    NoExit { start: Coord },

    #[error("broken loop at {at} after {steps} steps")]
    BrokenLoop { at: Coord, steps: usize },
}

/// Failures while parsing or walking a wasteland network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WastelandError {
    #[error("missing left/right instruction line")]
    MissingInstructions,

    #[error("column {column}: invalid instruction {symbol:?} (expected L or R)")]
    InvalidInstruction { column: usize, symbol: char },

    #[error("line {line}: invalid node {text:?}")]
    InvalidNode { line: usize, text: String },

    #[error("node not found: {name:?}")]
    NodeNotFound { name: String },

    #[error("no start nodes end with {suffix:?}")]
    NoWalkers { suffix: String },

    #[error("gave up after {limit} steps")]
    StepLimit { limit: usize },

    #[error("cycle lengths overflow when combined")]
    CycleOverflow,
}
