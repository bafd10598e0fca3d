//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Negative y is the space above the visible grid: it is never occupied, but
//! x bounds still apply there.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Grid layout handed to renderers: `[row][column]`.
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

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
    /// Returns None if outside the visible grid
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if outside the visible grid
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is a legal piece position: inside the side walls and
    /// above the floor. Rows above the grid (y < 0) count as inside.
    pub fn is_inside(&self, x: i8, y: i8) -> bool {
        x >= 0 && x < BOARD_WIDTH as i8 && y < BOARD_HEIGHT as i8
    }

    /// Whether (x, y) holds a locked mino. Always false above the grid.
    pub fn occupied_at(&self, x: i8, y: i8) -> bool {
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// A mino may sit at (x, y)
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        self.is_inside(x, y) && !self.occupied_at(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`, shifting every row above it down by one and inserting
    /// an empty row at the top.
    pub fn clear_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(None);
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top. After a collapse the same row index is
    /// examined again, since the row above has just moved into it.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Lock minos of `kind` at the given absolute cells.
    ///
    /// Cells above the grid are dropped.
    pub fn lock_cells(&mut self, kind: PieceKind, cells: &[(i8, i8)]) {
        for &(x, y) in cells {
            if y >= 0 {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into a row-major grid
    pub fn write_grid(&self, out: &mut BoardGrid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Count of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Build a board whose bottom rows are `rows`, listed top to bottom.
    ///
    /// At most `BOARD_HEIGHT` rows are used; the rows above them start empty.
    pub fn from_rows(rows: &[[Cell; BOARD_WIDTH as usize]]) -> Self {
        let mut board = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            let start = (offset + i) * BOARD_WIDTH as usize;
            board.cells[start..start + BOARD_WIDTH as usize].copy_from_slice(row);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn test_is_inside_allows_rows_above_grid() {
        let board = Board::new();
        assert!(board.is_inside(0, -1));
        assert!(board.is_inside(9, -3));
        assert!(!board.is_inside(-1, -1));
        assert!(!board.is_inside(10, 0));
        assert!(!board.is_inside(0, 20));
    }

    #[test]
    fn test_occupied_at_is_false_above_grid() {
        let mut board = Board::new();
        board.set(4, 0, Some(PieceKind::T));
        assert!(board.occupied_at(4, 0));
        assert!(!board.occupied_at(4, -1));
        assert!(!board.occupied_at(5, 0));
    }

    #[test]
    fn test_lock_cells_drops_cells_above_grid() {
        let mut board = Board::new();
        board.lock_cells(PieceKind::L, &[(0, -1), (0, 0), (1, 0), (2, 0)]);
        assert_eq!(board.filled_count(), 3);
        assert_eq!(board.get(0, 0), Some(Some(PieceKind::L)));
    }

    #[test]
    fn test_clear_full_lines_rechecks_same_index() {
        let mut board = Board::new();
        // Two adjacent full rows with a marker above them.
        fill_row(&mut board, 19, PieceKind::I);
        fill_row(&mut board, 18, PieceKind::O);
        board.set(3, 17, Some(PieceKind::T));

        assert_eq!(board.clear_full_lines(), 2);
        assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_full_lines_not_capped_at_four() {
        let mut board = Board::new();
        for y in 14..20 {
            fill_row(&mut board, y, PieceKind::Z);
        }
        assert_eq!(board.clear_full_lines(), 6);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_write_grid_matches_cells() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(9, 19, Some(PieceKind::L));

        let mut grid: BoardGrid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_grid(&mut grid);
        assert_eq!(grid[0][0], Some(PieceKind::I));
        assert_eq!(grid[19][9], Some(PieceKind::L));
        assert_eq!(grid[10][5], None);
    }

    #[test]
    fn test_from_rows_bottom_aligned() {
        let mut row = [Some(PieceKind::J); BOARD_WIDTH as usize];
        row[3] = None;
        let board = Board::from_rows(&[row]);
        assert!(!board.is_row_full(19));
        assert_eq!(board.get(3, 19), Some(None));
        assert_eq!(board.get(4, 19), Some(Some(PieceKind::J)));
        assert_eq!(board.filled_count(), 9);
    }
}
