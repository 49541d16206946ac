//! Side effects for `advent` commands: config, puzzle inputs, answer output.

pub mod config;
pub mod input;
pub mod report;
