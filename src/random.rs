//! Random delay source
//!
//! Fireflies only need one thing from randomness: a uniform integer from a
//! half-open range. [`RandomSource`] captures exactly that so tests can plug in
//! fixed sequences, while [`RngSource`] lets any `rand` generator drive a real
//! strip.

use rand::{Rng, RngCore};

/// Uniform integer generator
pub trait RandomSource {
    /// Returns a value in `[low, high)`.
    fn random_range(&mut self, low: u32, high: u32) -> u32;
}

/// Adapter from a `rand` generator to [`RandomSource`]
///
/// ```ignore
/// let rng = RngSource::new(SmallRng::seed_from_u64(seed));
/// ```
#[derive(Debug, Clone)]
pub struct RngSource<R: RngCore>(R);

impl<R: RngCore> RngSource<R> {
    pub const fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn random_range(&mut self, low: u32, high: u32) -> u32 {
        self.0.gen_range(low..high)
    }
}

/// Half-open `[min, max)` range a delay is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: u32,
    max: u32,
}

impl DelayRange {
    /// Create a new delay range
    ///
    /// Panics if the range is empty. Ranges are build-time constants, so this
    /// fails at compile time when used in a `const`.
    pub const fn new(min: u32, max: u32) -> Self {
        assert!(min < max, "delay range must not be empty");
        Self { min, max }
    }

    /// Inclusive lower bound
    pub const fn min(self) -> u32 {
        self.min
    }

    /// Exclusive upper bound
    pub const fn max(self) -> u32 {
        self.max
    }

    pub const fn contains(self, value: u32) -> bool {
        value >= self.min && value < self.max
    }

    /// Draw a value from the range
    pub fn sample<R: RandomSource + ?Sized>(self, rng: &mut R) -> u32 {
        rng.random_range(self.min, self.max)
    }
}
