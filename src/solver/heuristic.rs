use crate::board::{BLANK, Configuration};

/// Manhattan distance of every tile to its goal cell, blank excluded.
///
/// Tile `v` belongs at row `v / n`, column `v % n`. Leaving the blank out keeps the estimate
/// admissible and changes it by exactly one per slide.
pub fn manhattan_distance(tiles: &[u8], n: usize) -> u32 {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(idx, &tile)| {
            let tile = tile as usize;
            ((idx / n).abs_diff(tile / n) + (idx % n).abs_diff(tile % n)) as u32
        })
        .sum()
}

pub fn estimate(config: &Configuration) -> u32 {
    manhattan_distance(config.tiles(), config.dimension())
}
