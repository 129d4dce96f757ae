use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::word::Word;

/// Source of every random decision the engine takes.
pub trait RandomSource: Send {
    /// Uniformly permutes `words` in place.
    fn shuffle(&mut self, words: &mut [Word]);

    /// Uniform index in `0..upper`. `upper` is never zero.
    fn pick(&mut self, upper: usize) -> usize;
}

pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn shuffle(&mut self, words: &mut [Word]) {
        words.shuffle(&mut self.rng);
    }

    fn pick(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}
