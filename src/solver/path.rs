use crate::codec::StateKey;
use crate::error::{PuzzleError, Result};

use rustc_hash::FxHashMap;

/// Predecessor of every reached state; the start maps to `None`.
pub type ParentMap = FxHashMap<StateKey, Option<StateKey>>;

/// Walks parent links back from `goal` and returns the keys in start-to-goal order.
pub fn reconstruct(parents: &ParentMap, goal: &StateKey) -> Result<Vec<StateKey>> {
    let mut path = vec![];
    let mut current = goal.clone();
    loop {
        let parent = parents
            .get(&current)
            .ok_or_else(|| PuzzleError::MissingParent(current.clone()))?;
        if path.len() >= parents.len() {
            // a cycle in the links would otherwise never end
            return Err(PuzzleError::MissingParent(current));
        }
        path.push(current);
        match parent {
            Some(parent) => current = parent.clone(),
            None => break,
        }
    }
    path.reverse();
    Ok(path)
}
