//! Error types for the simulation engine.
//!
//! This module defines the error surfaced by every fallible simulation
//! operation: stream construction, path generation and batch simulation.

use shortrate_core::types::ConfigurationError;
use thiserror::Error;

/// Simulation error.
///
/// A run that returns an error has produced no ensemble; partial results are
/// never handed back.
///
/// # Examples
/// ```
/// use shortrate_core::types::ConfigurationError;
/// use shortrate_mc::mc::SimulationError;
///
/// let err: SimulationError = ConfigurationError::InvalidPathCount(0).into();
/// assert!(err.to_string().contains("path count 0"));
///
/// let err = SimulationError::RandomSourceExhausted { capacity: 360 };
/// assert!(err.to_string().contains("360"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Input outside its valid domain, detected before any path was drawn.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A Gaussian stream was asked for more draws than it was provisioned for.
    #[error("Random source exhausted: stream was provisioned for {capacity} draws")]
    RandomSourceExhausted {
        /// Number of draws the stream was created with.
        capacity: usize,
    },
}

impl SimulationError {
    /// Whether this error came from input validation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimulationError::Configuration(_))
    }
}
