//! Canonical keys for board states.
//!
//! A [`StateKey`] holds only the tile labels of a configuration, so two keys are equal
//! exactly when the boards are. Keys hash and order by their labels, and their text form is
//! the colon-joined decimal labels (`"1:2:3:0:4:5:6:8:7"`).

use crate::board::{self, Configuration};
use crate::error::{PuzzleError, Result};

use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(SmallVec<[u8; 16]>);

impl StateKey {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn encode(config: &Configuration) -> StateKey {
    StateKey(config.tiles().iter().copied().collect())
}

pub fn decode(key: &StateKey) -> Result<Configuration> {
    let n = dimension(key)?;
    Configuration::with_dimension(n, &key.0)
}

/// Board size recovered from the number of labels in the key.
pub fn dimension(key: &StateKey) -> Result<usize> {
    match board::square_root(key.len()) {
        Some(n) if n >= board::MIN_DIMENSION => Ok(n),
        _ => Err(PuzzleError::Format(format!(
            "Key with {} labels does not describe a square board",
            key.len()
        ))),
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{label}")?;
        }
        Ok(())
    }
}

impl FromStr for StateKey {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .split(':')
            .map(|part| {
                part.parse::<u8>()
                    .map_err(|_| PuzzleError::Format(format!("Invalid label '{part}' in key '{s}'")))
            })
            .collect::<Result<SmallVec<[u8; 16]>>>()
            .map(StateKey)
    }
}
