//! Pipe maze loop tracing.
//!
//! A maze is a grid of pipe connectors. Exactly one cell holds the start `S`,
//! whose real shape is unknown; it sits on a single closed loop of pipes that
//! agree pairwise on how they connect.

use std::fmt;
use std::iter;

use tracing::debug;

use crate::core::direction::{Coord, Direction};
use crate::error::MazeError;

/// A grid cell symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    /// `|`
    Vertical,
    /// `-`
    Horizontal,
    /// `L`
    NorthEast,
    /// `J`
    NorthWest,
    /// `7`
    SouthWest,
    /// `F`
    SouthEast,
    /// `S`, may connect any way.
    Start,
    /// `.`
    Ground,
}

impl Connector {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let connector = match symbol {
            '|' => Connector::Vertical,
            '-' => Connector::Horizontal,
            'L' => Connector::NorthEast,
            'J' => Connector::NorthWest,
            '7' => Connector::SouthWest,
            'F' => Connector::SouthEast,
            'S' => Connector::Start,
            '.' => Connector::Ground,
            _ => return None,
        };
        Some(connector)
    }

    pub fn symbol(self) -> char {
        match self {
            Connector::Vertical => '|',
            Connector::Horizontal => '-',
            Connector::NorthEast => 'L',
            Connector::NorthWest => 'J',
            Connector::SouthWest => '7',
            Connector::SouthEast => 'F',
            Connector::Start => 'S',
            Connector::Ground => '.',
        }
    }

    /// Directions this connector opens towards, in probing order.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Connector::Vertical => &[Direction::North, Direction::South],
            Connector::Horizontal => &[Direction::East, Direction::West],
            Connector::NorthEast => &[Direction::North, Direction::East],
            Connector::NorthWest => &[Direction::North, Direction::West],
            Connector::SouthWest => &[Direction::South, Direction::West],
            Connector::SouthEast => &[Direction::South, Direction::East],
            Connector::Start => &Direction::ALL,
            Connector::Ground => &[],
        }
    }

    pub fn connects(self, direction: Direction) -> bool {
        self.directions().contains(&direction)
    }
}

/// Parsed maze rows. Immutable after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Connector>>,
    width: usize,
}

impl Grid {
    /// Parse rows of pipe symbols. Every row must be non-empty and of the same width.
    pub fn parse(input: &str) -> Result<Self, MazeError> {
        let mut rows: Vec<Vec<Connector>> = Vec::new();
        for (row, line) in input.trim_end_matches(['\r', '\n']).lines().enumerate() {
            let cells = line
                .chars()
                .enumerate()
                .map(|(column, symbol)| {
                    Connector::from_symbol(symbol).ok_or(MazeError::UnknownSymbol {
                        row,
                        column,
                        symbol,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if cells.is_empty() {
                return Err(MazeError::EmptyRow { row });
            }
            if let Some(first) = rows.first()
                && first.len() != cells.len()
            {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: first.len(),
                    found: cells.len(),
                });
            }
            rows.push(cells);
        }
        let width = rows.first().map_or(0, Vec::len);
        debug!(width, height = rows.len(), "parsed maze");
        Ok(Self { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, at: Coord) -> Option<Connector> {
        self.rows.get(at.y)?.get(at.x).copied()
    }

    /// First start cell scanning rows top to bottom, left to right.
    pub fn find_start(&self) -> Result<Coord, MazeError> {
        let mut starts = self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, connector)| **connector == Connector::Start)
                .map(move |(x, _)| Coord::new(x, y))
        });
        let first = starts.next().ok_or(MazeError::StartNotFound)?;
        if let Some(second) = starts.next() {
            return Err(MazeError::MultipleStarts { first, second });
        }
        Ok(first)
    }

    /// Walk the loop through the start, bounded by the number of cells in the grid.
    pub fn trace_loop(&self) -> Result<Loop, MazeError> {
        self.trace_loop_within(self.width * self.height())
    }

    /// Walk the loop through the start, visiting at most `step_limit` non-start cells.
    ///
    /// The first step takes the first direction in [`Direction::ALL`] whose
    /// neighbour connects back to the start. Every later step leaves by the
    /// connector's other opening.
    pub fn trace_loop_within(&self, step_limit: usize) -> Result<Loop, MazeError> {
        let start = self.find_start()?;
        let (mut at, mut connector, mut came_from) = Direction::ALL
            .into_iter()
            .find_map(|direction| {
                self.connecting_neighbor(start, direction)
                    .map(|(next, connector)| (next, connector, direction.opposite()))
            })
            .ok_or(MazeError::NoExit { start })?;

        let mut cells = Vec::new();
        while at != start {
            if cells.len() >= step_limit {
                return Err(MazeError::BrokenLoop {
                    at,
                    steps: cells.len(),
                });
            }
            cells.push(at);
            let next = connector
                .directions()
                .iter()
                .copied()
                .filter(|direction| *direction != came_from)
                .find_map(|direction| {
                    self.connecting_neighbor(at, direction)
                        .map(|(next, connector)| (next, connector, direction.opposite()))
                });
            let Some(next) = next else {
                return Err(MazeError::BrokenLoop {
                    at,
                    steps: cells.len(),
                });
            };
            (at, connector, came_from) = next;
        }

        debug!(%start, length = cells.len(), "traced loop");
        Ok(Loop { start, cells })
    }

    /// The neighbour towards `direction`, if it exists and opens back towards `from`.
    fn connecting_neighbor(&self, from: Coord, direction: Direction) -> Option<(Coord, Connector)> {
        let next = from.step(direction)?;
        let connector = self.get(next)?;
        connector
            .connects(direction.opposite())
            .then_some((next, connector))
    }
}

/// Writes the rows back in their input format.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(|connector| connector.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// The closed loop through the start, in walking order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    start: Coord,
    cells: Vec<Coord>,
}

impl Loop {
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Visited cells, excluding the start.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Steps from the start to the farthest loop cell.
    ///
    /// The loop has `len + 1` edges counting the one closing back to the
    /// start, so the farthest point is half of that, rounded up.
    pub fn distance(&self) -> usize {
        if self.cells.is_empty() {
            return 0;
        }
        (self.cells.len() + 1).div_ceil(2)
    }

    /// Number of grid cells strictly inside the loop.
    ///
    /// Shoelace formula for the polygon area, then Pick's theorem
    /// `A = i + b/2 - 1` solved for the interior count `i`.
    pub fn enclosed_area(&self) -> usize {
        if self.cells.is_empty() {
            return 0;
        }
        let vertices = iter::once(self.start).chain(self.cells.iter().copied());
        let successors = vertices.clone().skip(1).chain(iter::once(self.start));
        let twice_area = vertices
            .zip(successors)
            .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
            .sum::<i64>()
            .abs();
        let boundary = self.cells.len() as i64 + 1;
        let interior = (twice_area - boundary) / 2 + 1;
        interior.max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        MAZE_CLUTTERED, MAZE_ENCLOSED, MAZE_NOISY_SQUARE, MAZE_NOISY_WINDING, MAZE_SCATTERED,
        MAZE_SQUARE, MAZE_SQUEEZED, MAZE_WINDING,
    };

    fn grid(input: &str) -> Grid {
        Grid::parse(input).expect("parse grid")
    }

    #[test]
    fn finds_start_in_samples() {
        assert_eq!(grid(MAZE_SQUARE).find_start(), Ok(Coord::new(1, 1)));
        assert_eq!(grid(MAZE_NOISY_SQUARE).find_start(), Ok(Coord::new(1, 1)));
        assert_eq!(grid(MAZE_NOISY_WINDING).find_start(), Ok(Coord::new(0, 2)));
    }

    #[test]
    fn farthest_distance_on_samples() {
        for (input, expected) in [
            (MAZE_SQUARE, 4),
            (MAZE_NOISY_SQUARE, 4),
            (MAZE_WINDING, 8),
            (MAZE_NOISY_WINDING, 8),
        ] {
            let traced = grid(input).trace_loop().expect("trace");
            assert_eq!(traced.distance(), expected, "{input}");
        }
    }

    #[test]
    fn square_loop_visits_cells_in_walking_order() {
        let traced = grid(MAZE_SQUARE).trace_loop().expect("trace");
        assert_eq!(traced.start(), Coord::new(1, 1));
        assert_eq!(
            traced.cells(),
            &[
                Coord::new(1, 2),
                Coord::new(1, 3),
                Coord::new(2, 3),
                Coord::new(3, 3),
                Coord::new(3, 2),
                Coord::new(3, 1),
                Coord::new(2, 1),
            ]
        );
    }

    #[test]
    fn tracing_twice_returns_same_sequence() {
        let maze = grid(MAZE_WINDING);
        let first = maze.trace_loop().expect("first");
        let second = maze.trace_loop().expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn enclosed_area_on_samples() {
        for (input, expected) in [
            (MAZE_SQUARE, 1),
            (MAZE_WINDING, 1),
            (MAZE_ENCLOSED, 4),
            (MAZE_SQUEEZED, 4),
            (MAZE_SCATTERED, 8),
            (MAZE_CLUTTERED, 10),
        ] {
            let traced = grid(input).trace_loop().expect("trace");
            assert_eq!(traced.enclosed_area(), expected, "{input}");
        }
    }

    #[test]
    fn missing_start_is_reported() {
        assert_eq!(grid("..\n..\n").find_start(), Err(MazeError::StartNotFound));
        assert_eq!(Grid::default().trace_loop(), Err(MazeError::StartNotFound));
    }

    #[test]
    fn second_start_is_reported() {
        assert_eq!(
            grid("S.\n.S\n").find_start(),
            Err(MazeError::MultipleStarts {
                first: Coord::new(0, 0),
                second: Coord::new(1, 1),
            })
        );
    }

    #[test]
    fn start_without_connecting_neighbour_has_no_exit() {
        assert_eq!(
            grid("S|\n-.\n").trace_loop(),
            Err(MazeError::NoExit {
                start: Coord::new(0, 0)
            })
        );
    }

    #[test]
    fn dead_end_is_a_broken_loop() {
        assert_eq!(
            grid("S-7\n|.|\nL-.\n").trace_loop(),
            Err(MazeError::BrokenLoop {
                at: Coord::new(1, 2),
                steps: 3,
            })
        );
    }

    #[test]
    fn step_limit_bounds_the_walk() {
        assert_eq!(
            grid(MAZE_SQUARE).trace_loop_within(3),
            Err(MazeError::BrokenLoop {
                at: Coord::new(3, 3),
                steps: 3,
            })
        );
    }

    #[test]
    fn rejects_unknown_symbols_and_ragged_rows() {
        assert_eq!(
            Grid::parse("S-X\n"),
            Err(MazeError::UnknownSymbol {
                row: 0,
                column: 2,
                symbol: 'X',
            })
        );
        assert_eq!(
            Grid::parse("S-7\n|\n"),
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 1,
            })
        );
    }

    #[test]
    fn blank_rows_are_reported_where_they_occur() {
        assert_eq!(Grid::parse("\n.S-7.\n"), Err(MazeError::EmptyRow { row: 0 }));
        assert_eq!(Grid::parse("S7\n\nLJ\n"), Err(MazeError::EmptyRow { row: 1 }));
        assert_eq!(grid("S7\nLJ\n\n\n").height(), 2);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let maze = grid(MAZE_NOISY_WINDING);
        assert_eq!(maze.to_string(), MAZE_NOISY_WINDING);
        assert_eq!(grid(&maze.to_string()), maze);
    }

    #[test]
    fn empty_input_is_an_empty_grid() {
        let maze = grid("");
        assert_eq!((maze.width(), maze.height()), (0, 0));
    }
}
