use crate::codec::StateKey;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The tiles do not form a permutation of `0..N²` on a square board.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A key or board text could not be parsed.
    #[error("Malformed input: {0}")]
    Format(String),
    #[error("Invalid solver options: {0}")]
    InvalidOptions(String),
    /// The frontier ran dry on a board that passed the solvability check.
    #[error("Search exhausted after {iterations} iterations on a solvable board")]
    SearchExhausted { iterations: u64 },
    #[error("No parent recorded for state {0}")]
    MissingParent(StateKey),
}
