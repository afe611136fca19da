use super::grid::{Cell, Grid, Position};
use super::player::Player;
use crate::error::GridError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Four winning cells in the order the scan visited them.
pub type WinLine = [Position; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid column")]
    InvalidColumn,
    #[error("column is full")]
    ColumnFull,
}

/// The live game: grid plus whose turn it is.
///
/// `drop_piece` never changes the turn; whoever drives the game calls
/// `switch_player` once a move has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    current_player: Player,
}

impl Board {
    /// Create a new empty 6x7 board
    pub fn new() -> Self {
        Self::with_size(ROWS, COLS)
    }

    /// Create an empty board of the given size. Panics on a zero dimension.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Board {
            grid: Grid::empty(rows, cols),
            current_player: Player::One,
        }
    }

    /// Build a board from marker rows (0 empty, 1 player one, 2 player two),
    /// bottom row first. Cells are written as given, with no gravity check.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut board = Board::with_size(rows.len(), cols);
        for (row, markers) in rows.iter().enumerate() {
            let markers = markers.as_ref();
            if markers.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found: markers.len(),
                });
            }
            for (col, &marker) in markers.iter().enumerate() {
                let cell = Cell::from_marker(marker)
                    .ok_or(GridError::UnknownMarker { row, col, marker })?;
                board.grid.set(row, col, cell);
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.grid.get(row, col)
    }

    /// Overwrite a cell directly, bypassing gravity. Intended for fixtures.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.grid.set(row, col, cell);
    }

    /// Borrow the grid without copying it.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Immutable copy of the grid, safe to hand to agents and trajectories.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn legal_columns(&self) -> Vec<usize> {
        self.grid.legal_columns()
    }

    pub fn is_full(&self) -> bool {
        self.grid.is_full()
    }

    /// Drop the current player's piece into `col`, returning where it landed.
    pub fn drop_piece(&mut self, col: usize) -> Result<Position, MoveError> {
        if col >= self.cols() {
            return Err(MoveError::InvalidColumn);
        }

        if self.grid.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        // Lowest empty row wins; the top cell is known to be empty
        let row = (0..self.rows())
            .find(|&row| self.grid.get(row, col) == Cell::Empty)
            .ok_or(MoveError::ColumnFull)?;
        self.grid.set(row, col, self.current_player.to_cell());
        Ok((row, col))
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Find the first four-in-a-row for `player`.
    ///
    /// Scans horizontal lines, then vertical, then `/` diagonals, then `\`
    /// diagonals, each by ascending row and then ascending column. The
    /// returned cells run left to right (bottom to top for vertical lines;
    /// `\` lines start at their upper-left cell).
    pub fn check_win(&self, player: Player) -> Option<WinLine> {
        let cell = player.to_cell();
        let rows = self.rows();
        let cols = self.cols();
        let row_span = rows.saturating_sub(3);
        let col_span = cols.saturating_sub(3);

        let horizontal = (0..rows).flat_map(move |r| {
            (0..col_span).map(move |c| [(r, c), (r, c + 1), (r, c + 2), (r, c + 3)])
        });
        let vertical = (0..row_span).flat_map(move |r| {
            (0..cols).map(move |c| [(r, c), (r + 1, c), (r + 2, c), (r + 3, c)])
        });
        let diagonal_up = (0..row_span).flat_map(move |r| {
            (0..col_span).map(move |c| [(r, c), (r + 1, c + 1), (r + 2, c + 2), (r + 3, c + 3)])
        });
        let diagonal_down = (3..rows).flat_map(move |r| {
            (0..col_span).map(move |c| [(r, c), (r - 1, c + 1), (r - 2, c + 2), (r - 3, c + 3)])
        });

        horizontal
            .chain(vertical)
            .chain(diagonal_up)
            .chain(diagonal_down)
            .find(|line| line.iter().all(|&(r, c)| self.grid.get(r, c) == cell))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
