//! # Random Number Generation
//!
//! Gaussian draws for path generation.
//!
//! ## Design
//!
//! - **Reproducibility**: every stream is seeded; a master seed fixes a run
//! - **Partitioning**: one private stream per path, seeded by path index
//! - **Static dispatch**: the simulator is generic over [`StreamSource`]
//!
//! ## Module Structure
//!
//! - [`gaussian`]: [`GaussianSequence`] and the uniform-to-normal transforms
//! - [`streams`]: SplitMix64 stream partitioning and [`SeededStreams`]
//!
//! ## Usage Example
//!
//! ```rust
//! use shortrate_mc::rng::{GaussianTransform, SeededStreams, StreamSource};
//!
//! let streams = SeededStreams::new(12345).with_transform(GaussianTransform::Ziggurat);
//!
//! // 360 draws for path 7
//! let stream = streams.stream(7, 360).unwrap();
//! let draws: Vec<f64> = stream.collect();
//! assert_eq!(draws.len(), 360);
//! ```

pub mod gaussian;
pub mod streams;


pub use gaussian::{GaussianSequence, GaussianTransform};
pub use streams::{splitmix64, stream_seed, GaussianStream, SeededStreams, StreamSource};
