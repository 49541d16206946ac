//! Solvers for three grid-and-graph puzzles: the seed almanac, the pipe maze,
//! and the wasteland network.
//!
//! The crate keeps a strict split:
//!
//! - **[`core`]**: Pure, deterministic parsing and traversal. Typed errors from
//!   [`error`], no I/O, tested in isolation.
//! - **[`io`]**: Side effects (config files, puzzle inputs, answer output).
//!
//! [`solve`] joins the two for each CLI command, and [`exit_codes`] maps
//! failures to stable process codes.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod solve;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
