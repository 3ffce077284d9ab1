//! Randomness used by the confidence synthesizer.
//!
//! Every stochastic step goes through [`RandomSource`], so callers can swap
//! the thread-seeded generator for a seeded or constant one.

use crate::types::DIGIT_COUNT;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform digit in `0..DIGIT_COUNT`.
    fn next_digit(&mut self) -> usize {
        ((self.next_unit() * DIGIT_COUNT as f64) as usize).min(DIGIT_COUNT - 1)
    }

    /// Uniform sample in `[-amplitude, amplitude)`.
    fn next_noise(&mut self, amplitude: f64) -> f64 {
        (self.next_unit() * 2.0 - 1.0) * amplitude
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_digit(&mut self) -> usize {
        (**self).next_digit()
    }

    fn next_noise(&mut self, amplitude: f64) -> f64 {
        (**self).next_noise(amplitude)
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Seeded when a seed is given, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn next_digit(&mut self) -> usize {
        self.0.gen_range(0..DIGIT_COUNT)
    }
}

/// Always returns the same unit sample. `0.5` yields zero noise and digit 5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource(f64);

impl FixedSource {
    pub fn new(unit: f64) -> Self {
        Self(unit.clamp(0.0, 1.0 - f64::EPSILON))
    }

    pub fn centered() -> Self {
        Self(0.5)
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}
