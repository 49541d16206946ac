//! Puzzle input loading.
//!
//! Inputs live at `<inputs_dir>/dayNN/input.txt`. An explicit path overrides
//! the lookup, and `-` reads standard input. The whole input is read into
//! memory so it can be parsed any number of times.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

/// Puzzles this crate solves, tagged with their day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Puzzle {
    Almanac,
    Wasteland,
    Maze,
}

impl Puzzle {
    pub fn day(self) -> u8 {
        match self {
            Puzzle::Almanac => 5,
            Puzzle::Wasteland => 8,
            Puzzle::Maze => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Puzzle::Almanac => "almanac",
            Puzzle::Wasteland => "wasteland",
            Puzzle::Maze => "maze",
        }
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default location of a puzzle's input under `inputs_dir`.
pub fn input_path(inputs_dir: &Path, puzzle: Puzzle) -> PathBuf {
    inputs_dir
        .join(format!("day{:02}", puzzle.day()))
        .join("input.txt")
}

/// Read the input for `puzzle`, preferring `explicit` when given.
pub fn load_input(inputs_dir: &Path, puzzle: Puzzle, explicit: Option<&Path>) -> Result<String> {
    let path = match explicit {
        Some(path) if path == Path::new("-") => return read_stdin(puzzle),
        Some(path) => path.to_path_buf(),
        None => input_path(inputs_dir, puzzle),
    };
    debug!(%puzzle, path = %path.display(), "loading input");
    fs::read_to_string(&path).with_context(|| format!("read {} input {}", puzzle, path.display()))
}

fn read_stdin(puzzle: Puzzle) -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .with_context(|| format!("read {} input from stdin", puzzle))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ALMANAC_SAMPLE, Workspace};

    #[test]
    fn input_path_uses_zero_padded_day() {
        let path = input_path(Path::new("inputs"), Puzzle::Almanac);
        assert_eq!(path, PathBuf::from("inputs/day05/input.txt"));
        let path = input_path(Path::new("inputs"), Puzzle::Maze);
        assert_eq!(path, PathBuf::from("inputs/day10/input.txt"));
    }

    #[test]
    fn loads_default_location() {
        let workspace = Workspace::new().expect("workspace");
        workspace
            .write_input(Puzzle::Almanac, ALMANAC_SAMPLE)
            .expect("write input");
        let text = load_input(&workspace.inputs_dir(), Puzzle::Almanac, None).expect("load");
        assert_eq!(text, ALMANAC_SAMPLE);
    }

    #[test]
    fn explicit_path_overrides_default() {
        let workspace = Workspace::new().expect("workspace");
        let path = workspace.path().join("custom.txt");
        fs::write(&path, "S\n").expect("write custom");
        let text = load_input(&workspace.inputs_dir(), Puzzle::Maze, Some(&path)).expect("load");
        assert_eq!(text, "S\n");
    }

    #[test]
    fn missing_input_names_the_path() {
        let workspace = Workspace::new().expect("workspace");
        let err = load_input(&workspace.inputs_dir(), Puzzle::Wasteland, None)
            .expect_err("missing input");
        let message = format!("{:#}", err);
        assert!(message.contains("wasteland input"), "{message}");
        assert!(message.contains("day08"), "{message}");
    }
}
