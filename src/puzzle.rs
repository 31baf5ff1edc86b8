use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use thiserror::Error;

/// Largest supported board side. Tiles are stored as `u8`, so a 16x16 board
/// (values 0..=255) is the ceiling.
pub const MAX_SIZE: usize = 16;

/// A single tile slide, named after the direction the moving tile travels.
/// `Left` means the tile to the right of the hole slides left into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

/// Successor generation order. Fixed so that traversal order (and therefore
/// BFS/DFS tie-breaking) is reproducible across runs.
pub const MOVE_ORDER: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

impl Move {
    /// Position of the tile that slides, as a (row, column) offset from the
    /// hole. `Up` slides the tile below the hole, so the offset is (1, 0).
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A malformed grid rejected at construction time. Searches and heuristics
/// are total over states that passed construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("unsupported puzzle size {0}, expected 2..={MAX_SIZE}")]
    UnsupportedSize(usize),
    #[error("a {size}x{size} puzzle needs {expected} cells, got {actual}")]
    WrongCellCount {
        size: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cell value {value} out of range, expected 0..{limit}")]
    ValueOutOfRange { value: u8, limit: usize },
    #[error("cell value {0} appears more than once")]
    DuplicateValue(u8),
    #[error("no empty cell (0) in the grid")]
    MissingHole,
}

/// An immutable N x N puzzle configuration. Values are 0..N^2-1, each exactly
/// once, stored flattened in row-major order; 0 is the hole. Equality and
/// hashing are by value, so states key the search bookkeeping maps directly.
///
/// States are never mutated: every transition produces a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    size: u8,
    tiles: Box<[u8]>,
    hole: u8,
}

impl PuzzleState {
    /// The canonical goal configuration: 0, 1, .., N^2-1 in row-major order,
    /// hole in the top-left corner.
    pub fn solved(size: usize) -> Self {
        assert!((2..=MAX_SIZE).contains(&size), "puzzle size out of range");
        let tiles: Box<[u8]> = (0..(size * size) as u16).map(|v| v as u8).collect();
        Self {
            size: size as u8,
            tiles,
            hole: 0,
        }
    }

    /// Builds a state from a flattened row-major tile list, rejecting
    /// anything that is not a permutation of 0..size^2.
    pub fn from_tiles(size: usize, tiles: Vec<u8>) -> Result<Self, InvalidState> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(InvalidState::UnsupportedSize(size));
        }
        let expected = size * size;
        if tiles.len() != expected {
            return Err(InvalidState::WrongCellCount {
                size,
                expected,
                actual: tiles.len(),
            });
        }
        let mut seen = vec![false; expected];
        for &value in &tiles {
            if value as usize >= expected {
                return Err(InvalidState::ValueOutOfRange {
                    value,
                    limit: expected,
                });
            }
            if seen[value as usize] {
                return Err(InvalidState::DuplicateValue(value));
            }
            seen[value as usize] = true;
        }
        let hole = tiles
            .iter()
            .position(|&v| v == 0)
            .ok_or(InvalidState::MissingHole)?;
        Ok(Self {
            size: size as u8,
            tiles: tiles.into_boxed_slice(),
            hole: hole as u8,
        })
    }

    /// Builds a state from grid rows, rejecting non-square input.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, InvalidState> {
        let size = rows.len();
        let actual: usize = rows.iter().map(Vec::len).sum();
        if rows.iter().any(|row| row.len() != size) {
            return Err(InvalidState::WrongCellCount {
                size,
                expected: size * size,
                actual,
            });
        }
        Self::from_tiles(size, rows.concat())
    }

    /// A uniformly random solvable configuration. Shuffles until the parity
    /// test passes, which discards half of all permutations on average.
    pub fn scrambled<R: Rng>(size: usize, rng: &mut R) -> Self {
        let mut state = Self::solved(size);
        loop {
            let mut tiles = state.tiles.to_vec();
            tiles.shuffle(rng);
            let hole = tiles.iter().position(|&v| v == 0).unwrap_or(0);
            state.tiles = tiles.into_boxed_slice();
            state.hole = hole as u8;
            if state.is_solvable() {
                return state;
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// (row, column) of the hole.
    pub fn hole_position(&self) -> (usize, usize) {
        let n = self.size();
        (self.hole as usize / n, self.hole as usize % n)
    }

    /// True iff the grid reads 0, 1, .., N^2-1 in row-major order.
    pub fn is_goal(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(index, &value)| value as usize == index)
    }

    /// The state after sliding one tile into the hole, or `None` when the
    /// tile that would move lies outside the grid.
    pub fn apply(&self, mv: Move) -> Option<Self> {
        let n = self.size() as isize;
        let (row, col) = self.hole_position();
        let (dr, dc) = mv.offset();
        let tile_row = row as isize + dr;
        let tile_col = col as isize + dc;
        if tile_row < 0 || tile_row >= n || tile_col < 0 || tile_col >= n {
            return None;
        }
        let tile_index = (tile_row * n + tile_col) as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.hole as usize, tile_index);
        Some(Self {
            size: self.size,
            tiles,
            hole: tile_index as u8,
        })
    }

    /// All states one slide away, paired with the move that produces them.
    /// Emission order is Left, Right, Up, Down; between 2 and 4 entries
    /// depending on where the hole sits.
    pub fn successors(&self) -> Vec<(Move, PuzzleState)> {
        MOVE_ORDER
            .iter()
            .filter_map(|&mv| self.apply(mv).map(|state| (mv, state)))
            .collect()
    }

    /// Parity test for reachability of the goal. With the hole-first goal,
    /// odd boards are solvable iff the inversion count is even, and even
    /// boards iff inversions plus the hole's row index is even.
    pub fn is_solvable(&self) -> bool {
        let inversions = self.count_inversions();
        if self.size() % 2 == 1 {
            inversions % 2 == 0
        } else {
            let (hole_row, _) = self.hole_position();
            (inversions + hole_row) % 2 == 0
        }
    }

    fn count_inversions(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(i, &value)| {
                self.tiles[i + 1..]
                    .iter()
                    .filter(|&&later| later != 0 && later < value)
                    .count()
            })
            .sum()
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.size()) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
