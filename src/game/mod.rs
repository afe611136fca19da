//! Core Connect Four game logic: the grid, player types, and the board state
//! machine with gravity placement and four-direction win detection.

mod board;
mod grid;
mod player;

pub use board::{Board, MoveError, WinLine, COLS, ROWS};
pub use grid::{Cell, Grid, Position};
pub use player::Player;
