//! Per-path stream partitioning.
//!
//! Every path owns a private Gaussian stream whose seed depends only on the
//! master seed and the path index:
//!
//! ```text
//! seed_m = splitmix64(master_seed + m * 0x9E3779B97F4A7C15)
//! ```
//!
//! Stream contents therefore do not depend on which thread draws a path or
//! in what order, and sequential and parallel runs agree bit for bit.

use rand::Rng;

use super::gaussian::{GaussianSequence, GaussianTransform};
use crate::mc::SimulationError;

/// SplitMix64 increment (the 64-bit golden ratio).
pub const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 output function.
///
/// # Examples
///
/// ```rust
/// use shortrate_mc::rng::splitmix64;
///
/// assert_eq!(splitmix64(0), 0xE220_A839_7B1D_CDAF);
/// ```
#[inline]
pub fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of stream `index` under `master_seed`.
#[inline]
pub fn stream_seed(master_seed: u64, index: usize) -> u64 {
    splitmix64(master_seed.wrapping_add((index as u64).wrapping_mul(GOLDEN_GAMMA)))
}

/// A source of standard normal draws consumed by one path.
pub trait GaussianStream {
    /// Next standard normal draw.
    fn next_gaussian(&mut self) -> Result<f64, SimulationError>;
}

impl GaussianStream for GaussianSequence {
    #[inline]
    fn next_gaussian(&mut self) -> Result<f64, SimulationError> {
        self.next_draw()
    }
}

/// Hands out one independent stream per path index.
///
/// Implementations must be `Sync`: parallel workers request streams
/// concurrently from a shared reference.
pub trait StreamSource: Sync {
    /// Stream type handed to the path generator.
    type Stream: GaussianStream;

    /// Stream for path `index`, provisioned for `draws` draws.
    fn stream(&self, index: usize, draws: usize) -> Result<Self::Stream, SimulationError>;
}

/// Seeded stream source using SplitMix64 partitioning.
///
/// # Examples
///
/// ```rust
/// use shortrate_mc::rng::{SeededStreams, StreamSource};
///
/// let streams = SeededStreams::new(42);
/// let mut first = streams.stream(0, 10).unwrap();
/// let mut again = streams.stream(0, 10).unwrap();
/// let mut other = streams.stream(1, 10).unwrap();
///
/// let z = first.next_draw().unwrap();
/// assert_eq!(z, again.next_draw().unwrap());
/// assert_ne!(z, other.next_draw().unwrap());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededStreams {
    master_seed: u64,
    transform: GaussianTransform,
}

impl SeededStreams {
    /// Creates a source from a master seed, using the inverse CDF transform.
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            transform: GaussianTransform::default(),
        }
    }

    /// Creates a source whose master seed is drawn once from OS entropy.
    ///
    /// Read the seed back with [`SeededStreams::master_seed`] to reproduce
    /// the run.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Sets the uniform-to-Gaussian transform.
    pub fn with_transform(mut self, transform: GaussianTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Master seed.
    #[inline]
    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Transform used by every stream.
    #[inline]
    pub fn transform(&self) -> GaussianTransform {
        self.transform
    }
}

impl StreamSource for SeededStreams {
    type Stream = GaussianSequence;

    fn stream(&self, index: usize, draws: usize) -> Result<GaussianSequence, SimulationError> {
        GaussianSequence::new(stream_seed(self.master_seed, index), draws, self.transform)
    }
}
