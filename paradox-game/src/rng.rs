//! Random sources consumed by die rolls, encounter rolls, and key selection.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

/// Uniform random source the core draws from.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn uniform_float(&mut self) -> f64;

    /// Uniform integer in `[min, max]`, both inclusive.
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn uniform_float(&mut self) -> f64 {
        (**self).uniform_float()
    }

    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        (**self).uniform_int(min, max)
    }
}

/// Seeded ChaCha stream that counts draws for instrumentation.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: ChaCha20Rng,
    seed: u64,
    draws: u64,
}

impl SeededRng {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for SeededRng {
    fn uniform_float(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.r#gen::<f64>()
    }

    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        self.draws = self.draws.saturating_add(1);
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Replays a recorded trace of draws.
///
/// Floats and integers are queued separately. Once a queue runs dry the
/// source falls back to `0.99` for floats (no encounter fires) and to the
/// lower bound for integers. Integers outside the requested range are clamped.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    floats: VecDeque<f64>,
    ints: VecDeque<i32>,
}

impl ScriptedRng {
    const EXHAUSTED_FLOAT: f64 = 0.99;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_floats(mut self, floats: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(floats);
        self
    }

    #[must_use]
    pub fn with_ints(mut self, ints: impl IntoIterator<Item = i32>) -> Self {
        self.ints.extend(ints);
        self
    }

    #[must_use]
    pub fn remaining(&self) -> (usize, usize) {
        (self.floats.len(), self.ints.len())
    }
}

impl RandomSource for ScriptedRng {
    fn uniform_float(&mut self) -> f64 {
        self.floats
            .pop_front()
            .unwrap_or(Self::EXHAUSTED_FLOAT)
            .clamp(0.0, Self::EXHAUSTED_FLOAT)
    }

    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        self.ints
            .pop_front()
            .map_or(min, |value| value.clamp(min, max.max(min)))
    }
}
