use crate::action::{ALL_ACTIONS, Action};
use crate::codec::{self, StateKey};
use crate::error::{PuzzleError, Result};

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use smallvec::SmallVec;
use std::fmt;

pub const BLANK: u8 = 0;
pub const MIN_DIMENSION: usize = 2;
/// Largest board whose labels still fit in a `u8`.
pub const MAX_DIMENSION: usize = 15;

pub type Tiles = SmallVec<[u8; 16]>;

/// An N×N arrangement of the labels `0..N²`, stored row-major. Label `0` is the blank.
///
/// A `Configuration` is always valid: every constructor checks that the tiles form a
/// permutation of `0..N²`. Moves never mutate a configuration in place, they return a
/// new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Configuration {
    dimension: usize,
    tiles: Tiles,
    blank: usize,
}

impl Configuration {
    /// Builds a configuration from flat row-major tiles; the dimension is the square root
    /// of the tile count.
    pub fn new(tiles: &[u8]) -> Result<Self> {
        let dimension = square_root(tiles.len()).ok_or_else(|| {
            PuzzleError::InvalidConfiguration(format!(
                "{} tiles cannot form a square board",
                tiles.len()
            ))
        })?;
        Self::with_dimension(dimension, tiles)
    }

    pub fn with_dimension(dimension: usize, tiles: &[u8]) -> Result<Self> {
        check_dimension(dimension)?;
        let expected = dimension * dimension;
        if tiles.len() != expected {
            return Err(PuzzleError::InvalidConfiguration(format!(
                "Expected {expected} tiles for a {dimension}x{dimension} board, found {}",
                tiles.len()
            )));
        }

        let mut seen = [false; MAX_DIMENSION * MAX_DIMENSION];
        for &tile in tiles {
            let label = tile as usize;
            if label >= expected {
                return Err(PuzzleError::InvalidConfiguration(format!(
                    "Tile {tile} is out of range for a {dimension}x{dimension} board"
                )));
            }
            if seen[label] {
                return Err(PuzzleError::InvalidConfiguration(format!(
                    "Tile {tile} appears more than once"
                )));
            }
            seen[label] = true;
        }

        // A permutation of 0..N² always holds exactly one blank.
        let blank = tiles.iter().position(|&t| t == BLANK).unwrap_or_default();

        Ok(Self {
            dimension,
            tiles: tiles.iter().copied().collect(),
            blank,
        })
    }

    /// Builds a configuration from a fixed-size grid, e.g. `[[1, 2, 3], [0, 4, 5], [6, 8, 7]]`.
    pub fn from_grid<const N: usize>(grid: [[u8; N]; N]) -> Result<Self> {
        let tiles: Tiles = grid.iter().flatten().copied().collect();
        Self::with_dimension(N, &tiles)
    }

    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let dimension = rows.len();
        let mut tiles = Tiles::with_capacity(dimension * dimension);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != dimension {
                return Err(PuzzleError::InvalidConfiguration(format!(
                    "Row {} has {} tiles, expected {dimension}",
                    r + 1,
                    row.len()
                )));
            }
            tiles.extend_from_slice(row);
        }
        Self::with_dimension(dimension, &tiles)
    }

    /// The solved board: labels in row-major order with the blank in the top-left corner.
    pub fn goal(dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        let count = dimension * dimension;
        Ok(Self {
            dimension,
            tiles: (0..count).map(|v| v as u8).collect(),
            blank: 0,
        })
    }

    /// A uniformly shuffled board. About half of these are unsolvable.
    pub fn random<R: Rng + ?Sized>(dimension: usize, rng: &mut R) -> Result<Self> {
        let mut board = Self::goal(dimension)?;
        board.tiles.shuffle(rng);
        board.blank = board.locate_blank();
        Ok(board)
    }

    /// A solvable board reached by walking the blank `moves` random steps away from the
    /// goal, never undoing the previous step.
    pub fn scrambled<R: Rng + ?Sized>(dimension: usize, moves: usize, rng: &mut R) -> Result<Self> {
        let mut board = Self::goal(dimension)?;
        let mut last: Option<Action> = None;
        for _ in 0..moves {
            let candidates: SmallVec<[Action; 4]> = ALL_ACTIONS
                .iter()
                .copied()
                .filter(|&a| Some(a.opposite()) != last && board.target_of(a).is_some())
                .collect();
            let Some(&action) = candidates.choose(rng) else {
                break;
            };
            if let Some(next) = board.apply(action) {
                board = next;
                last = Some(action);
            }
        }
        Ok(board)
    }

    /// Parses one board from text. Rows are separated by newlines or brackets and labels by
    /// whitespace or commas, so both `1 2 3` lines and `[[1, 2, 3], ...]` work. Lines starting
    /// with `#` are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let mut rows: Vec<Vec<u8>> = vec![];
        for line in content.lines().map(str::trim) {
            if line.starts_with('#') {
                continue;
            }
            let normalized = line.replace('[', " ").replace(']', "\n").replace(',', " ");
            for row_str in normalized.lines().map(str::trim).filter(|l| !l.is_empty()) {
                let row = row_str
                    .split_whitespace()
                    .map(|token| {
                        token.parse::<u8>().map_err(|_| {
                            PuzzleError::Format(format!(
                                "Invalid tile label '{token}' in row {}",
                                rows.len() + 1
                            ))
                        })
                    })
                    .collect::<Result<Vec<u8>>>()?;
                rows.push(row);
            }
        }
        if rows.is_empty() {
            return Err(PuzzleError::Format("No board rows found".into()));
        }
        Self::from_rows(&rows)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * self.dimension + col]
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.dimension, self.blank % self.dimension)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.tiles.chunks(self.dimension)
    }

    pub fn is_goal(&self) -> bool {
        self.tiles.iter().enumerate().all(|(i, &t)| t as usize == i)
    }

    pub fn key(&self) -> StateKey {
        codec::encode(self)
    }

    /// Index the blank would move to under `action`, if it stays on the board.
    pub fn target_of(&self, action: Action) -> Option<usize> {
        let (row, col) = self.blank_position();
        let (dr, dc) = action.offset();
        let row = row.checked_add_signed(dr).filter(|&r| r < self.dimension)?;
        let col = col.checked_add_signed(dc).filter(|&c| c < self.dimension)?;
        Some(row * self.dimension + col)
    }

    /// Slides the blank in the direction of `action`, or `None` at the board edge.
    pub fn apply(&self, action: Action) -> Option<Self> {
        self.target_of(action).map(|target| self.swap_blank(target))
    }

    pub(crate) fn swap_blank(&self, target: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Self {
            dimension: self.dimension,
            tiles,
            blank: target,
        }
    }

    fn locate_blank(&self) -> usize {
        self.tiles
            .iter()
            .position(|&t| t == BLANK)
            .unwrap_or_default()
    }

    pub fn pretty_print(&self) -> String {
        let width = (self.tiles.len() - 1).to_string().len();
        let border = |left: char, mid: char, right: char| {
            let mut line = String::new();
            line.push(left);
            for col in 0..self.dimension {
                line.push_str(&"─".repeat(width + 2));
                line.push(if col + 1 < self.dimension { mid } else { right });
            }
            line
        };

        let mut output = border('┌', '┬', '┐');
        output.push('\n');
        for (r, row) in self.rows().enumerate() {
            output.push('│');
            for &tile in row {
                if tile == BLANK {
                    output.push_str(&format!(" {:>width$} │", ""));
                } else {
                    output.push_str(&format!(" {tile:>width$} │"));
                }
            }
            output.push('\n');
            if r + 1 < self.dimension {
                output.push_str(&border('├', '┼', '┤'));
                output.push('\n');
            }
        }
        output.push_str(&border('└', '┴', '┘'));
        output
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (c, tile) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{tile}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

pub(crate) fn square_root(len: usize) -> Option<usize> {
    let root = (len as f64).sqrt().round() as usize;
    (root * root == len).then_some(root)
}

fn check_dimension(dimension: usize) -> Result<()> {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
        return Err(PuzzleError::InvalidConfiguration(format!(
            "Board size {dimension} is outside the supported range {MIN_DIMENSION}..={MAX_DIMENSION}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_goal_board() {
        let goal = Configuration::goal(3).unwrap();
        assert_eq!(goal.tiles(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(goal.blank_position(), (0, 0));
        assert!(goal.is_goal());
        assert!(Configuration::goal(1).is_err());
    }

    #[test]
    fn test_from_grid() {
        let board = Configuration::from_grid([[1, 2, 3], [0, 4, 5], [6, 8, 7]]).unwrap();
        assert_eq!(board.dimension(), 3);
        assert_eq!(board.blank_position(), (1, 0));
        assert_eq!(board.tile(2, 1), 8);
        assert!(!board.is_goal());
    }

    #[test]
    fn test_rejects_malformed_boards() {
        let duplicate = Configuration::new(&[0, 1, 1, 3]).unwrap_err();
        assert!(duplicate.to_string().contains("more than once"));

        let out_of_range = Configuration::new(&[0, 1, 2, 4]).unwrap_err();
        assert!(out_of_range.to_string().contains("out of range"));

        let no_blank = Configuration::new(&[1, 2, 3, 4]).unwrap_err();
        assert!(matches!(no_blank, PuzzleError::InvalidConfiguration(_)));

        assert!(Configuration::new(&[0, 1, 2]).is_err());
        assert!(Configuration::from_rows(&[vec![0, 1], vec![2]]).is_err());
        assert!(Configuration::with_dimension(3, &[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_parse_board() {
        let plain = "# scenario\n2 3 5\n1 4 0\n7 8 6\n";
        let bracket = "[[2, 3, 5], [1, 4, 0], [7, 8, 6]]";
        let multiline = "[[2, 3, 5],\n [1, 4, 0],\n [7, 8, 6]]\n";

        let expected = Configuration::new(&[2, 3, 5, 1, 4, 0, 7, 8, 6]).unwrap();
        assert_eq!(Configuration::parse(plain).unwrap(), expected);
        assert_eq!(Configuration::parse(bracket).unwrap(), expected);
        assert_eq!(Configuration::parse(multiline).unwrap(), expected);
        assert_eq!(Configuration::parse(&expected.to_string()).unwrap(), expected);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Configuration::parse("1 2\n0 x"),
            Err(PuzzleError::Format(_))
        ));
        assert!(matches!(
            Configuration::parse("# nothing here\n"),
            Err(PuzzleError::Format(_))
        ));
        assert!(matches!(
            Configuration::parse("1 2 3\n0 4 5"),
            Err(PuzzleError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_apply_action() {
        let goal = Configuration::goal(3).unwrap();
        assert!(goal.apply(Action::Up).is_none());
        assert!(goal.apply(Action::Left).is_none());

        let moved = goal.apply(Action::Right).unwrap();
        assert_eq!(moved.tiles(), &[1, 0, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(moved.blank_index(), 1);
        // the original is untouched
        assert!(goal.is_goal());

        let down = moved.apply(Action::Down).unwrap();
        assert_eq!(down.blank_position(), (1, 1));
        assert_eq!(down.tile(0, 1), 4);
    }

    #[test]
    fn test_random_boards_are_valid() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let board = Configuration::random(4, &mut rng).unwrap();
            let mut sorted = board.tiles().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..16).collect::<Vec<u8>>());
            assert_eq!(board.tiles()[board.blank_index()], BLANK);
        }
    }

    #[test]
    fn test_scrambled_is_seeded() {
        let a = Configuration::scrambled(3, 30, &mut SmallRng::seed_from_u64(7)).unwrap();
        let b = Configuration::scrambled(3, 30, &mut SmallRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            Configuration::scrambled(3, 0, &mut SmallRng::seed_from_u64(7)).unwrap(),
            Configuration::goal(3).unwrap()
        );
    }

    #[test]
    fn test_pretty_print() {
        let board = Configuration::from_grid([[1, 0], [2, 3]]).unwrap();
        let expected = "┌───┬───┐\n│ 1 │   │\n├───┼───┤\n│ 2 │ 3 │\n└───┴───┘";
        assert_eq!(board.pretty_print(), expected);
        assert_eq!(board.to_string(), "[[1, 0], [2, 3]]");
    }
}
