//! Board module - manages the context window grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Pieces may hang above the grid (y < 0); those cells are never checked for occupancy.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// A set of row indices, at most one entry per board row.
pub type RowSet = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// Result of writing a piece into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    Locked,
    /// Part of the piece was still above the ceiling; nothing was written.
    AboveCeiling,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a single cell blocks a mino: outside the walls, below the floor,
    /// or an occupied in-bounds cell. Rows above the grid never block.
    #[inline(always)]
    fn blocks(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Check whether `shape` anchored at `(x, y)` collides with walls, floor or
    /// locked cells.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .minos()
            .any(|(dx, dy)| self.blocks(x + dx, y + dy))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// One row of cells, left to right.
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Full rows scanned bottom to top, skipping rows listed in `exclude`.
    pub fn full_rows(&self, exclude: &[u8]) -> RowSet {
        let mut rows = RowSet::new();
        for y in (0..BOARD_HEIGHT).rev() {
            if !exclude.contains(&y) && self.is_row_full(y as usize) {
                rows.push(y);
            }
        }
        rows
    }

    /// Remove the given rows and shift everything above them down.
    ///
    /// Each removed row makes room for one empty row at the top. Rows below the
    /// lowest removed row keep their order and position. Returns the number of
    /// rows removed.
    pub fn remove_rows(&mut self, rows: &[u8]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut removed = 0;

        // Two-pointer compaction from the bottom up.
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&(read_y as u8)) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        removed
    }

    /// Write a piece into the grid.
    ///
    /// If any occupied shape cell lies above the ceiling the piece cannot be
    /// committed and the grid is left untouched.
    pub fn lock(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> LockOutcome {
        if shape.minos().any(|(_, dy)| y + dy < 0) {
            return LockOutcome::AboveCeiling;
        }

        for (dx, dy) in shape.minos() {
            self.set(x + dx, y + dy, Some(kind));
        }

        LockOutcome::Locked
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a row with `kind`, leaving the listed columns empty.
    pub fn fill_row_except(&mut self, y: i8, holes: &[i8], kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            let cell = if holes.contains(&x) { None } else { Some(kind) };
            self.set(x, y, cell);
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
