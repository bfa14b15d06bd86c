//! Seeded standard normal sequences with a fixed draw budget.
//!
//! This module provides [`GaussianSequence`], a lazily evaluated sequence of
//! `k` independent standard normal draws obtained by transforming uniforms
//! from a seeded `StdRng`.

use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use shortrate_core::math::inverse_norm_cdf;
use shortrate_core::types::ConfigurationError;

use crate::mc::SimulationError;

/// Uniform-to-Gaussian transform.
///
/// - `InverseCdf`: one uniform on (0, 1) per draw, mapped through the
///   inverse normal CDF
/// - `Ziggurat`: `rand_distr::StandardNormal` (ZIGNOR), which may consume a
///   variable number of uniforms per draw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaussianTransform {
    /// Inverse CDF (Acklam) applied to `Open01` uniforms.
    #[default]
    InverseCdf,
    /// Ziggurat sampling.
    Ziggurat,
}

impl std::str::FromStr for GaussianTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "inverse_cdf" | "inversecdf" | "icdf" => Ok(GaussianTransform::InverseCdf),
            "ziggurat" => Ok(GaussianTransform::Ziggurat),
            _ => Err(format!("Unknown Gaussian transform: {}", s)),
        }
    }
}

impl std::fmt::Display for GaussianTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GaussianTransform::InverseCdf => write!(f, "inverse_cdf"),
            GaussianTransform::Ziggurat => write!(f, "ziggurat"),
        }
    }
}

/// Deterministic-given-seed sequence of at most `capacity` standard normals.
///
/// # Examples
///
/// ```rust
/// use shortrate_mc::rng::{GaussianSequence, GaussianTransform};
///
/// let mut a = GaussianSequence::new(42, 3, GaussianTransform::InverseCdf).unwrap();
/// let mut b = GaussianSequence::new(42, 3, GaussianTransform::InverseCdf).unwrap();
///
/// // Same seed produces identical draws
/// assert_eq!(a.next_draw().unwrap(), b.next_draw().unwrap());
///
/// // Budget of three draws
/// assert_eq!(a.remaining(), 2);
/// assert!(a.next_draw().is_ok());
/// assert!(a.next_draw().is_ok());
/// assert!(a.next_draw().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct GaussianSequence {
    inner: StdRng,
    seed: u64,
    transform: GaussianTransform,
    capacity: usize,
    drawn: usize,
}

impl GaussianSequence {
    /// Creates a sequence of `capacity` draws from `seed`.
    ///
    /// # Errors
    ///
    /// `SimulationError::Configuration` if `capacity == 0`.
    pub fn new(
        seed: u64,
        capacity: usize,
        transform: GaussianTransform,
    ) -> Result<Self, SimulationError> {
        if capacity == 0 {
            return Err(ConfigurationError::invalid(
                "draw_count",
                "a Gaussian sequence needs at least one draw",
            )
            .into());
        }

        Ok(Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
            transform,
            capacity,
            drawn: 0,
        })
    }

    /// Seed the sequence was created from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Transform in use.
    #[inline]
    pub fn transform(&self) -> GaussianTransform {
        self.transform
    }

    /// Total draw budget.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Draws still available.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.drawn
    }

    /// Next standard normal draw.
    ///
    /// # Errors
    ///
    /// `SimulationError::RandomSourceExhausted` once `capacity` draws have
    /// been taken.
    #[inline]
    pub fn next_draw(&mut self) -> Result<f64, SimulationError> {
        if self.drawn == self.capacity {
            return Err(SimulationError::RandomSourceExhausted {
                capacity: self.capacity,
            });
        }
        self.drawn += 1;
        Ok(self.sample())
    }

    /// Fills `buffer` with the next `buffer.len()` draws.
    ///
    /// Nothing is drawn when the remaining budget is too small.
    pub fn fill(&mut self, buffer: &mut [f64]) -> Result<(), SimulationError> {
        if buffer.len() > self.remaining() {
            return Err(SimulationError::RandomSourceExhausted {
                capacity: self.capacity,
            });
        }
        for slot in buffer.iter_mut() {
            *slot = self.sample();
        }
        self.drawn += buffer.len();
        Ok(())
    }

    #[inline]
    fn sample(&mut self) -> f64 {
        match self.transform {
            GaussianTransform::InverseCdf => {
                let u: f64 = self.inner.sample(Open01);
                inverse_norm_cdf(u)
            }
            GaussianTransform::Ziggurat => self.inner.sample(StandardNormal),
        }
    }
}

impl Iterator for GaussianSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.next_draw().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GaussianSequence {}
