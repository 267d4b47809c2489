//! Informed search from a scrambled board to the goal.
//!
//! All algorithms share one best-first loop ([`engine::run_pass`]) and differ only in how
//! frontier entries are scored and which neighbors are admitted:
//!
//! * [`Algorithm::BestFirst`] scores `g + h` and returns a shortest path.
//! * [`Algorithm::IterativeDeepening`] repeats bounded passes with a rising threshold on
//!   `g + h`, also returning a shortest path while keeping each pass small.
//! * [`Algorithm::Weighted`] inflates `h`, which finds a path faster but not necessarily a
//!   shortest one.

pub mod engine;
pub mod heuristic;
pub mod neighbors;
pub mod path;
pub mod solvability;

pub use self::solvability::is_solvable;

use self::engine::{Admission, Outcome, Priority, run_pass};

use crate::action::{Action, actions_from_path};
use crate::board::{Configuration, MAX_DIMENSION, MIN_DIMENSION};
use crate::codec::{self, StateKey};
use crate::error::{PuzzleError, Result};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::fmt;
use std::time::{Duration, Instant};

/// Heuristic weight `W` used when none is given; weighted search scales `h` by `1 + W`.
pub const DEFAULT_WEIGHT: f64 = 4.0;

/// Depth at which dynamic weighting has decayed to plain search.
///
/// These are calibration values, not bounds on the solution length.
pub fn default_max_depth(dimension: usize) -> u32 {
    match dimension {
        2 => 6,
        3 => 31,
        4 => 80,
        n => 2 * (n * n * n) as u32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weighting {
    /// The heuristic is scaled by `1 + W` everywhere.
    Static,
    /// The scale starts at `1 + W` and shrinks linearly with depth.
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Algorithm {
    BestFirst,
    IterativeDeepening,
    Weighted { weight: f64, mode: Weighting },
}

impl Algorithm {
    pub fn weighted(mode: Weighting) -> Self {
        Algorithm::Weighted {
            weight: DEFAULT_WEIGHT,
            mode,
        }
    }

    /// Whether the returned path is guaranteed to be a shortest one.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, Algorithm::Weighted { .. })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::BestFirst => write!(f, "A*"),
            Algorithm::IterativeDeepening => write!(f, "IDA*"),
            Algorithm::Weighted {
                mode: Weighting::Static,
                ..
            } => write!(f, "Static WA*"),
            Algorithm::Weighted {
                mode: Weighting::Dynamic,
                ..
            } => write!(f, "Dynamic WA*"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub dimension: usize,
    pub algorithm: Algorithm,
    /// Seed for the neighbor shuffling; a random one is drawn when unset.
    pub seed: Option<u64>,
    /// Overrides [`default_max_depth`] for dynamic weighting.
    pub max_depth: Option<u32>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            dimension: 3,
            algorithm: Algorithm::BestFirst,
            seed: None,
            max_depth: None,
        }
    }
}

impl SolverOptions {
    pub fn new(dimension: usize, algorithm: Algorithm) -> Self {
        Self {
            dimension,
            algorithm,
            ..Default::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    fn validate(&self) -> Result<()> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&self.dimension) {
            return Err(PuzzleError::InvalidOptions(format!(
                "Board size {} is outside the supported range {MIN_DIMENSION}..={MAX_DIMENSION}",
                self.dimension
            )));
        }
        if let Algorithm::Weighted { weight, .. } = self.algorithm
            && !(weight.is_finite() && weight >= 0.0)
        {
            return Err(PuzzleError::InvalidOptions(format!(
                "Weight must be a non-negative number, got {weight}"
            )));
        }
        if self.max_depth == Some(0) {
            return Err(PuzzleError::InvalidOptions(
                "Max depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// A solver for boards of one size, running one algorithm.
///
/// The solver owns its random source; separate solvers share no state and can run on
/// separate threads.
#[derive(Debug, Clone)]
pub struct Solver {
    options: SolverOptions,
    goal_key: StateKey,
    rng: SmallRng,
}

impl Solver {
    pub fn new(options: SolverOptions) -> Result<Self> {
        options.validate()?;
        let goal_key = Configuration::goal(options.dimension)?.key();
        let rng = SmallRng::seed_from_u64(options.seed.unwrap_or(rand::random()));
        Ok(Self {
            options,
            goal_key,
            rng,
        })
    }

    /// Searches for a path from `start` to the goal.
    ///
    /// An unsolvable board is not an error: it yields `success = false` without any search.
    /// A board of the wrong size is rejected before anything else.
    pub fn solve(&mut self, start: &Configuration) -> Result<SolveResult> {
        if start.dimension() != self.options.dimension {
            return Err(PuzzleError::InvalidConfiguration(format!(
                "Board is {n}x{n} but the solver expects {m}x{m}",
                n = start.dimension(),
                m = self.options.dimension
            )));
        }

        let timer = Instant::now();
        if !is_solvable(start) {
            log::warn!("Board {start} is not solvable");
            return Ok(SolveResult {
                success: false,
                iterations: 0,
                path: None,
                elapsed: timer.elapsed(),
            });
        }

        let (iterations, keys) = match self.options.algorithm {
            Algorithm::IterativeDeepening => self.deepen(start)?,
            Algorithm::BestFirst => self.single_pass(start, Priority::Plain)?,
            Algorithm::Weighted { weight, mode } => {
                let factor = 1.0 + weight;
                let priority = match mode {
                    Weighting::Static => Priority::Static { factor },
                    Weighting::Dynamic => Priority::Dynamic {
                        factor,
                        max_depth: self
                            .options
                            .max_depth
                            .unwrap_or_else(|| default_max_depth(self.options.dimension)),
                    },
                };
                self.single_pass(start, priority)?
            }
        };
        let path = keys
            .iter()
            .map(codec::decode)
            .collect::<Result<Vec<Configuration>>>()?;

        let result = SolveResult {
            success: true,
            iterations,
            path: Some(path),
            elapsed: timer.elapsed(),
        };
        log::info!(
            "{} solved the board in {} moves, {} iterations, {:?}",
            self.options.algorithm,
            result.moves(),
            iterations,
            result.elapsed
        );
        Ok(result)
    }

    fn single_pass(
        &mut self,
        start: &Configuration,
        priority: Priority,
    ) -> Result<(u64, Vec<StateKey>)> {
        let pass = run_pass(
            start,
            &self.goal_key,
            priority,
            Admission::Always,
            &mut self.rng,
        )?;
        match pass.outcome {
            Outcome::Found(keys) => Ok((pass.iterations, keys)),
            Outcome::Exhausted { .. } => Err(exhausted(pass.iterations)),
        }
    }

    fn deepen(&mut self, start: &Configuration) -> Result<(u64, Vec<StateKey>)> {
        let mut threshold = 0.0;
        let mut iterations = 0;
        loop {
            let pass = run_pass(
                start,
                &self.goal_key,
                Priority::Plain,
                Admission::Threshold(threshold),
                &mut self.rng,
            )?;
            iterations += pass.iterations;
            log::debug!(
                "Pass with threshold {threshold} expanded {} states",
                pass.iterations
            );
            match pass.outcome {
                Outcome::Found(keys) => return Ok((iterations, keys)),
                Outcome::Exhausted {
                    next_threshold: Some(next),
                } => threshold = next,
                Outcome::Exhausted {
                    next_threshold: None,
                } => return Err(exhausted(iterations)),
            }
        }
    }
}

fn exhausted(iterations: u64) -> PuzzleError {
    if cfg!(debug_assertions) {
        panic!("search exhausted after {iterations} iterations on a solvable board");
    }
    PuzzleError::SearchExhausted { iterations }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub success: bool,
    /// States expanded, summed over every pass.
    pub iterations: u64,
    /// Every configuration from the start to the goal, both included.
    pub path: Option<Vec<Configuration>>,
    pub elapsed: Duration,
}

impl SolveResult {
    /// Number of slides along the path.
    pub fn moves(&self) -> usize {
        self.path
            .as_ref()
            .map_or(0, |path| path.len().saturating_sub(1))
    }

    /// Directions the blank travels along the path.
    pub fn actions(&self) -> Vec<Action> {
        self.path
            .as_deref()
            .and_then(actions_from_path)
            .unwrap_or_default()
    }
}

/// Solves `start` once with a freshly seeded solver sized to the board.
pub fn solve(start: &Configuration, algorithm: Algorithm) -> Result<SolveResult> {
    let mut solver = Solver::new(SolverOptions::new(start.dimension(), algorithm))?;
    solver.solve(start)
}
