use crate::action::ALL_ACTIONS;
use crate::board::Configuration;

use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

/// Every slide costs the same.
pub const STEP_COST: u32 = 1;

pub type Neighbors = SmallVec<[(Configuration, u32); 4]>;

/// Configurations one slide away from `config`, each paired with its step cost.
///
/// The slide directions are tried in an order shuffled by `rng`, so equal-cost ties are
/// broken differently from one call to the next unless the source is seeded.
pub fn neighbors<R: Rng + ?Sized>(config: &Configuration, rng: &mut R) -> Neighbors {
    let mut actions = ALL_ACTIONS;
    actions.shuffle(rng);
    actions
        .into_iter()
        .filter_map(|action| config.apply(action))
        .map(|next| (next, STEP_COST))
        .collect()
}
