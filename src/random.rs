//! Shared random source for galaxy generation.
//!
//! One `SmallRng` behind a mutex. Every draw takes the lock for exactly one
//! generator call, so concurrent shuffles never interleave generator state.
//! The handle is passed explicitly to every generation call.

use std::sync::{Mutex, PoisonError};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable, thread-safe random sequence.
#[derive(Debug)]
pub struct RandomSequence {
    rng: Mutex<SmallRng>,
}

impl RandomSequence {
    /// A sequence seeded from OS entropy.
    pub fn from_entropy() -> Self {
        RandomSequence {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// A reproducible sequence.
    pub fn from_seed(seed: u64) -> Self {
        RandomSequence {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Seeds from `seed`, or from entropy when `seed == 0`.
    pub fn from_config_seed(seed: u64) -> Self {
        if seed != 0 {
            Self::from_seed(seed)
        } else {
            Self::from_entropy()
        }
    }

    /// Uniform index in `0..bound`. `bound` must be positive.
    pub fn next_index(&self, bound: usize) -> usize {
        // A panic mid-draw cannot leave SmallRng in a torn state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..bound)
    }

    /// Shuffles `items` in place (Fisher-Yates).
    pub fn shuffle<T>(&self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

impl Default for RandomSequence {
    fn default() -> Self {
        Self::from_entropy()
    }
}
