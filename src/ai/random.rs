use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal actions.
///
/// The random source is injected, so tests and reproducible runs can pass a
/// seeded generator instead of relying on OS entropy.
pub struct RandomAgent<R = StdRng> {
    rng: R,
}

impl RandomAgent<StdRng> {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomAgent { rng }
    }

    fn explore(&mut self, legal_columns: &[usize]) -> usize {
        assert!(!legal_columns.is_empty(), "No legal actions available");
        let idx = self.rng.random_range(0..legal_columns.len());
        legal_columns[idx]
    }

    fn exploit(&mut self, legal_columns: &[usize]) -> usize {
        // No value estimate yet, so exploiting is another uniform pick
        self.explore(legal_columns)
    }
}

impl Default for RandomAgent<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn choose_action(&mut self, legal_columns: &[usize], exploration_rate: f64) -> usize {
        if self.rng.random::<f64>() < exploration_rate {
            self.explore(legal_columns)
        } else {
            self.exploit(legal_columns)
        }
    }

    fn name(&self) -> &str {
        "Random"
    }
}
