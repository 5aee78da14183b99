//! Injectable randomness for the homepage shuffle, simulated latency and failure injection.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send + Sync {
    /// Uniform float in `[0, 1)`.
    fn next_unit(&self) -> f64;

    /// Uniform integer in `[low, high]`. Returns `low` when the range is empty.
    fn next_in_range(&self, low: u64, high: u64) -> u64;

    /// A permutation of `0..len`.
    fn permutation(&self, len: usize) -> Vec<usize>;
}

/// Thread-local OS-seeded randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn next_in_range(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }

    fn permutation(&self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut rand::thread_rng());
        order
    }
}

/// Reproducible randomness from a fixed seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        self.with_rng(|rng| rng.gen::<f64>())
    }

    fn next_in_range(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.with_rng(|rng| rng.gen_range(low..=high))
    }

    fn permutation(&self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        self.with_rng(|rng| order.shuffle(rng));
        order
    }
}

/// No randomness at all: identity order, lower bounds, a constant unit value.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    unit: f64,
}

impl FixedRandom {
    pub fn new(unit: f64) -> Self {
        Self { unit: unit.clamp(0.0, 0.999_999) }
    }
}

impl Default for FixedRandom {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.unit
    }

    fn next_in_range(&self, low: u64, _high: u64) -> u64 {
        low
    }

    fn permutation(&self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }
}
