use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::error::{Error, Result};

/// Direction the blank travels when a tile slides into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Neighbor generation order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
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
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An immutable n×n puzzle configuration. Tile `0` is the blank.
///
/// Tiles are stored row-major. Equality, ordering and hashing only look at
/// the layout, so two boards built different ways compare equal when their
/// tiles match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    /// Builds a board from rows of tiles.
    ///
    /// Fails with [`Error::InvalidBoard`] unless the grid is square and holds
    /// every value in `0..n*n` exactly once.
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(Error::invalid_board("empty grid"));
        }
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(Error::invalid_board(format!(
                    "row {} has {} tiles, expected {}",
                    r,
                    row.len(),
                    size
                )));
            }
        }
        Self::from_flat(size, rows.into_iter().flatten().collect())
    }

    /// Number of cells on a board of side `size`, or `None` when the grid
    /// is empty or its tiles would not fit in a `u32`.
    pub fn cell_count(size: usize) -> Option<usize> {
        let cells = size.checked_mul(size)?;
        (cells > 0 && u32::try_from(cells).is_ok()).then_some(cells)
    }

    fn checked_cells(size: usize) -> Result<usize> {
        match Self::cell_count(size) {
            Some(cells) => Ok(cells),
            None if size == 0 => Err(Error::invalid_board("empty grid")),
            None => Err(Error::invalid_board(format!(
                "a {}x{} grid is too large",
                size, size
            ))),
        }
    }

    /// Builds a board from `size * size` tiles in row-major order.
    pub fn from_flat(size: usize, tiles: Vec<u32>) -> Result<Self> {
        let cells = Self::checked_cells(size)?;
        if tiles.len() != cells {
            return Err(Error::invalid_board(format!(
                "expected {} tiles for a {}x{} grid, got {}",
                cells,
                size,
                size,
                tiles.len()
            )));
        }

        let mut seen = vec![false; cells];
        for &value in &tiles {
            let slot = seen
                .get_mut(value as usize)
                .ok_or_else(|| Error::invalid_board(format!("tile {} out of range", value)))?;
            if *slot {
                return Err(Error::invalid_board(format!("duplicate tile {}", value)));
            }
            *slot = true;
        }

        let blank = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or_else(|| Error::invalid_board("no blank tile"))?;

        Ok(Self { size, tiles, blank })
    }

    /// The solved board of the given side length.
    pub fn goal(size: usize) -> Result<Self> {
        let cells = Self::checked_cells(size)?;
        let last = u32::try_from(cells)
            .map_err(|_| Error::invalid_board(format!("a {}x{} grid is too large", size, size)))?;
        let tiles = (1..=last)
            .map(|value| if value == last { 0 } else { value })
            .collect();
        Self::from_flat(size, tiles)
    }

    /// A uniformly shuffled board. About half of these cannot be solved.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        let mut tiles = Self::goal(size)?.tiles;
        tiles.shuffle(rng);
        Self::from_flat(size, tiles)
    }

    /// A shuffled board that passes the parity test.
    pub fn random_solvable<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        loop {
            let board = Self::random(size, rng)?;
            if board.is_solvable_by_parity() {
                return Ok(board);
            }
        }
    }

    pub fn dimension(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.size + col]
    }

    /// Row and column of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// Number of non-blank tiles out of place.
    pub fn hamming(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, &value)| value != 0 && value as usize != i + 1)
            .count()
    }

    /// Sum of row and column distances from each non-blank tile to its goal
    /// cell. Never overestimates the number of moves left.
    pub fn manhattan(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(i, &value)| {
                let (row, col) = (i / self.size, i % self.size);
                let target = value as usize - 1;
                let (goal_row, goal_col) = (target / self.size, target % self.size);
                row.abs_diff(goal_row) + col.abs_diff(goal_col)
            })
            .sum()
    }

    pub fn is_goal(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &value)| value == 0 || value as usize == i + 1)
    }

    /// The board reached by moving the blank one step, if it stays on the grid.
    pub fn slide(&self, movement: Move) -> Option<Self> {
        let (row, col) = self.blank();
        let (dr, dc) = movement.as_offset();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let size = self.size as isize;

        if new_row >= 0 && new_row < size && new_col >= 0 && new_col < size {
            let target = new_row as usize * self.size + new_col as usize;
            let mut tiles = self.tiles.clone();
            tiles.swap(self.blank, target);
            Some(Self {
                size: self.size,
                tiles,
                blank: target,
            })
        } else {
            None
        }
    }

    /// All boards one slide away, in [`Move::ALL`] order.
    pub fn neighbors(&self) -> Vec<Self> {
        Move::ALL
            .iter()
            .filter_map(|&movement| self.slide(movement))
            .collect()
    }

    /// The move that turns `self` into `other`, if they are neighbors.
    pub fn move_to(&self, other: &Board) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&movement| self.slide(movement).as_ref() == Some(other))
    }

    /// Swaps the first two non-blank tiles in row-major order.
    ///
    /// Exactly one of a board and its twin can reach the goal. A 1×1 board
    /// has no pair to swap and yields [`Error::PreconditionViolation`].
    pub fn twin(&self) -> Result<Self> {
        let mut occupied = self
            .tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(i, _)| i);

        match (occupied.next(), occupied.next()) {
            (Some(first), Some(second)) => {
                let mut tiles = self.tiles.clone();
                tiles.swap(first, second);
                Ok(Self {
                    size: self.size,
                    tiles,
                    blank: self.blank,
                })
            }
            _ => Err(Error::PreconditionViolation(format!(
                "a {}x{} board has no pair of tiles to swap",
                self.size, self.size
            ))),
        }
    }

    /// Classical inversion parity test for reachability of the goal.
    ///
    /// Horizontal slides never change the order of the tiles read row-major.
    /// A vertical slide jumps one tile over `size - 1` others, which flips
    /// the inversion parity only when `size` is even, and moves the blank
    /// one row. So on even boards the blank's distance from the bottom row
    /// joins the invariant.
    pub fn is_solvable_by_parity(&self) -> bool {
        let inversions = self
            .tiles
            .iter()
            .filter(|&&value| value != 0)
            .tuple_combinations()
            .filter(|(earlier, later)| earlier > later)
            .count();

        let rows_below_blank = self.size - 1 - self.blank / self.size;
        if self.size % 2 == 0 {
            (inversions + rows_below_blank) % 2 == 0
        } else {
            inversions % 2 == 0
        }
    }

    /// Column width that fits every tile on this board.
    pub fn tile_width(&self) -> usize {
        (self.size * self.size - 1).to_string().len()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.tile_width();
        writeln!(f, "{}", self.size)?;
        for row in self.tiles.chunks(self.size) {
            for &val in row {
                write!(f, " {:>width$}", val, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
