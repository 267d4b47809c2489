//! This crate solves N×N sliding-tile puzzles with A*, IDA* and weighted A* searches.
//!
//! The goal board holds the blank in the top-left corner followed by the tiles in
//! row-major order. Boards are checked for solvability before any search runs.
pub mod action;
pub mod board;
pub mod codec;
pub mod error;
pub mod solver;

pub use crate::board::Configuration;
pub use crate::error::{PuzzleError, Result};
pub use crate::solver::{
    Algorithm, SolveResult, Solver, SolverOptions, Weighting, is_solvable, solve,
};
