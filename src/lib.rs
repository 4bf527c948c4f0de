//! Sliding-tile puzzle solver.
//!
//! A [`Board`] is an immutable n×n arrangement of tiles with one blank.
//! The [`Solver`] runs A* on the board and on its [twin](Board::twin) at the
//! same time; whichever search reaches the goal first decides solvability.

pub mod board;
pub mod error;
pub mod parse;
pub mod solver;

pub use board::{Board, Move};
pub use error::{Error, Result};
pub use solver::{SolveStats, Solver};
