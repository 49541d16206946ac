//! Stable exit codes for `advent` commands.
//!
//! `2` is left to clap, which uses it for usage errors.

use anyhow::Error;

use crate::error::{AlmanacError, MazeError, WastelandError};

/// Command succeeded.
pub const OK: i32 = 0;
/// I/O, configuration, or any other failure outside the puzzle data.
pub const INVALID: i32 = 1;
/// Puzzle input is structurally wrong or references something it never defines.
pub const MALFORMED: i32 = 3;
/// Puzzle input parsed, but the traversal could not finish.
pub const BROKEN: i32 = 4;

/// Exit code for the first puzzle error found in the chain.
pub fn for_error(err: &Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<AlmanacError>() {
            return MALFORMED;
        }
        if let Some(err) = cause.downcast_ref::<MazeError>() {
            return match err {
                MazeError::UnknownSymbol { .. }
                | MazeError::EmptyRow { .. }
                | MazeError::RaggedRow { .. } => MALFORMED,
                MazeError::StartNotFound
                | MazeError::MultipleStarts { .. }
                | MazeError::NoExit { .. }
                | MazeError::BrokenLoop { .. } => BROKEN,
            };
        }
        if let Some(err) = cause.downcast_ref::<WastelandError>() {
            return match err {
                WastelandError::MissingInstructions
                | WastelandError::InvalidInstruction { .. }
                | WastelandError::InvalidNode { .. }
                | WastelandError::NodeNotFound { .. } => MALFORMED,
                WastelandError::NoWalkers { .. }
                | WastelandError::StepLimit { .. }
                | WastelandError::CycleOverflow => BROKEN,
            };
        }
    }
    INVALID
}
