//! Injectable random source for goal selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks indices for random goal selection.
pub trait GoalRng {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl GoalRng for StdRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices, wrapping around.
///
/// Values are reduced modulo `len`, so one sequence works for any graph size.
#[derive(Clone, Debug, Default)]
pub struct SequenceRng {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of picks made so far.
    pub fn picks(&self) -> usize {
        self.cursor
    }
}

impl GoalRng for SequenceRng {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.values.is_empty() || len == 0 {
            self.cursor += 1;
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % len
    }
}

/// Production random source, seeded when `seed` is given.
pub fn goal_rng(seed: Option<u64>) -> Box<dyn GoalRng> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}
