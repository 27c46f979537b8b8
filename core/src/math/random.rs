use crate::prelude::RandomSource;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Seeded [`RandomSource`] backed by `StdRng`.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform_float(&mut self, min: f64, max: f64) -> f64 {
        if !(max > min) {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

/// Replays a fixed list of unit samples, cycling when exhausted.
///
/// Each sample `u` in `[0, 1)` maps to `min + u * (max - min)`, so a test can
/// state exactly where a reposition lands.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// Always returns the midpoint of the requested interval.
    pub fn midpoint() -> Self {
        Self::new(vec![0.5])
    }

    /// Number of samples handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_float(&mut self, min: f64, max: f64) -> f64 {
        if !(max > min) || self.samples.is_empty() {
            return min;
        }
        let unit = self.samples[self.cursor % self.samples.len()].clamp(0.0, 1.0);
        self.cursor += 1;
        min + unit * (max - min)
    }
}
