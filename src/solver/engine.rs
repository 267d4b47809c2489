use super::heuristic::estimate;
use super::neighbors::neighbors;
use super::path::{ParentMap, reconstruct};

use crate::board::Configuration;
use crate::codec::{self, StateKey};
use crate::error::Result;

use ordered_float::OrderedFloat;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// How a frontier entry is scored from its cost so far `g`, its estimate `h` and its depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Priority {
    /// `g + h`
    Plain,
    /// `g + factor · h`
    Static { factor: f64 },
    /// `g + max(factor - depth / max_depth, 1) · h`
    ///
    /// The bare weight `factor - depth / max_depth` drops below 1 once depth passes
    /// `(factor - 1) · max_depth`. It is clamped at 1 there so deep nodes are scored like
    /// plain search instead of discounting `h`.
    Dynamic { factor: f64, max_depth: u32 },
}

impl Priority {
    pub fn evaluate(&self, g: u32, h: u32, depth: u32) -> f64 {
        let (g, h) = (g as f64, h as f64);
        match *self {
            Priority::Plain => g + h,
            Priority::Static { factor } => g + factor * h,
            Priority::Dynamic { factor, max_depth } => {
                let weight = (factor - depth as f64 / max_depth as f64).max(1.0);
                g + weight * h
            }
        }
    }
}

/// Which relaxed neighbors make it onto the frontier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    Always,
    /// Only neighbors whose priority does not exceed the bound.
    Threshold(f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FrontierEntry {
    priority: OrderedFloat<f64>,
    g: u32,
    key: StateKey,
}

// Reversed so that `BinaryHeap` pops the lowest priority first.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Keys from the start to the goal.
    Found(Vec<StateKey>),
    /// The frontier ran dry. `next_threshold` is the lowest priority that was held back
    /// by the admission rule, if any was.
    Exhausted { next_threshold: Option<f64> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    /// States popped and expanded. Stale entries and the goal itself are not counted.
    pub iterations: u64,
    pub outcome: Outcome,
}

/// One best-first exploration from `start` towards `goal`.
///
/// A neighbor is relaxed when it improves on its recorded cost, and only a relaxed
/// neighbor is offered to the frontier. Entries whose cost has been superseded since they
/// were pushed are dropped when popped. The start is always pushed regardless of
/// `admission`.
pub fn run_pass<R: Rng + ?Sized>(
    start: &Configuration,
    goal: &StateKey,
    priority: Priority,
    admission: Admission,
    rng: &mut R,
) -> Result<Pass> {
    let mut open = BinaryHeap::new();
    let mut g_costs: FxHashMap<StateKey, u32> = FxHashMap::default();
    let mut parents = ParentMap::default();
    let mut depths: FxHashMap<StateKey, u32> = FxHashMap::default();

    let start_key = start.key();
    g_costs.insert(start_key.clone(), 0);
    parents.insert(start_key.clone(), None);
    depths.insert(start_key.clone(), 0);
    open.push(FrontierEntry {
        priority: OrderedFloat(priority.evaluate(0, estimate(start), 0)),
        g: 0,
        key: start_key,
    });

    let mut iterations = 0;
    let mut next_threshold: Option<f64> = None;

    while let Some(FrontierEntry { g, key, .. }) = open.pop() {
        if g_costs.get(&key).is_some_and(|&best| g > best) {
            continue;
        }
        if &key == goal {
            log::trace!(
                "Goal reached after {iterations} iterations, {} states recorded",
                g_costs.len()
            );
            return Ok(Pass {
                iterations,
                outcome: Outcome::Found(reconstruct(&parents, goal)?),
            });
        }
        iterations += 1;

        let current = codec::decode(&key)?;
        let depth = depths.get(&key).copied().unwrap_or_default();
        for (next, cost) in neighbors(&current, rng) {
            let next_key = next.key();
            let tentative = g + cost;
            if g_costs.get(&next_key).is_some_and(|&known| known <= tentative) {
                continue;
            }
            g_costs.insert(next_key.clone(), tentative);
            parents.insert(next_key.clone(), Some(key.clone()));
            depths.insert(next_key.clone(), depth + 1);

            let score = priority.evaluate(tentative, estimate(&next), depth + 1);
            match admission {
                Admission::Threshold(bound) if score > bound => {
                    next_threshold = Some(next_threshold.map_or(score, |t| t.min(score)));
                }
                _ => open.push(FrontierEntry {
                    priority: OrderedFloat(score),
                    g: tentative,
                    key: next_key,
                }),
            }
        }
    }

    log::trace!(
        "Frontier empty after {iterations} iterations, {} states recorded",
        g_costs.len()
    );
    Ok(Pass {
        iterations,
        outcome: Outcome::Exhausted { next_threshold },
    })
}
