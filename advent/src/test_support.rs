//! Test-only sample inputs and a scratch inputs directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::input::{Puzzle, input_path};

/// The published seven-stage almanac sample.
pub const ALMANAC_SAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

/// Square loop, farthest distance 4.
pub const MAZE_SQUARE: &str = "\
.....
.S-7.
.|.|.
.L-J.
.....
";

/// [`MAZE_SQUARE`] surrounded by unconnected pipes.
pub const MAZE_NOISY_SQUARE: &str = "\
-L|F7
7S-7|
L|7||
-L-J|
L|-JF
";

/// Winding loop, farthest distance 8.
pub const MAZE_WINDING: &str = "\
..F7.
.FJ|.
SJ.L7
|F--J
LJ...
";

/// [`MAZE_WINDING`] surrounded by unconnected pipes.
pub const MAZE_NOISY_WINDING: &str = "\
7-F7-
.FJ|7
SJLL7
|F--J
LJ.LJ
";

/// Loop enclosing four cells.
pub const MAZE_ENCLOSED: &str = "\
...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";

/// Loop enclosing four cells, with a pipe pair squeezed between two regions.
pub const MAZE_SQUEEZED: &str = "\
..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........
";

/// Larger loop with scattered ground, enclosing eight cells.
pub const MAZE_SCATTERED: &str = "\
.F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...
";

/// Loop packed among unconnected pipes, enclosing ten cells.
pub const MAZE_CLUTTERED: &str = "\
FF7FSF7F7F7F7F7F---7
L|LJ||||||||||||F--J
FL-7LJLJ||||||LJL-77
F--JF--7||LJLJ7F7FJ-
L---JF-JLJ.||-FJLJJ7
|F|F-JF---7F7-L7L|7|
|FFJF7L7F-JF7|JL---7
7-L-JL7||F7|L7F-7F7|
L.L7LFJ|||||FJL7||LJ
L7JLJL-JLJLJL--JLJ.L
";

/// `AAA` reaches `ZZZ` in 2 steps.
pub const WASTELAND_RL: &str = "\
RL

AAA = (BBB, CCC)
BBB = (DDD, EEE)
CCC = (ZZZ, GGG)
DDD = (DDD, DDD)
EEE = (EEE, EEE)
GGG = (GGG, GGG)
ZZZ = (ZZZ, ZZZ)
";

/// `AAA` reaches `ZZZ` in 6 steps, repeating the instructions.
pub const WASTELAND_LLR: &str = "\
LLR

AAA = (BBB, BBB)
BBB = (AAA, ZZZ)
ZZZ = (ZZZ, ZZZ)
";

/// Two walkers (`11A`, `22A`) align on `..Z` nodes after 6 steps.
pub const WASTELAND_GHOSTS: &str = "\
LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)
";

/// A temporary working directory with an `inputs/` tree laid out per puzzle.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp workspace")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn inputs_dir(&self) -> PathBuf {
        self.dir.path().join("inputs")
    }

    /// Write `contents` where the loader looks for `puzzle` by default.
    pub fn write_input(&self, puzzle: Puzzle, contents: &str) -> Result<PathBuf> {
        let path = input_path(&self.inputs_dir(), puzzle);
        let parent = path
            .parent()
            .with_context(|| format!("input path missing parent {}", path.display()))?;
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
