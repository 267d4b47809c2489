use crate::board::Configuration;

/// Parity of the permutation `index -> label`: 0 when even, 1 when odd.
///
/// `tiles` must hold every label `0..tiles.len()` once. Counted via cycle decomposition: a
/// permutation of `n` elements with `c` cycles is the product of `n - c` transpositions.
pub fn permutation_parity(tiles: &[u8]) -> u8 {
    let mut visited = vec![false; tiles.len()];
    let mut cycles = 0;
    for start in 0..tiles.len() {
        if visited[start] {
            continue;
        }
        cycles += 1;
        let mut idx = start;
        while !visited[idx] {
            visited[idx] = true;
            idx = tiles[idx] as usize;
        }
    }
    ((tiles.len() - cycles) % 2) as u8
}

/// Whether the goal (blank top-left, labels row-major) is reachable from `config`.
///
/// Every slide is a transposition with the blank and moves the blank one cell, so
/// `parity + blank_row + blank_col` keeps its parity. The goal has it even.
pub fn is_solvable(config: &Configuration) -> bool {
    let (row, col) = config.blank_position();
    (permutation_parity(config.tiles()) as usize + row + col) % 2 == 0
}
