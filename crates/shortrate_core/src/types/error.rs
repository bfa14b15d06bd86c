//! Error types for structured error handling.
//!
//! This module provides:
//! - `ConfigurationError`: Parameters outside their valid domain
//! - `DateError`: Errors from date construction and parsing
//! - `MarketDataError`: Errors from curve queries

use thiserror::Error;

/// Parameter validation error.
///
/// Raised eagerly, before any simulation work starts, whenever an input is
/// outside its valid domain. A run that fails with this error has produced
/// no output at all.
///
/// # Examples
/// ```
/// use shortrate_core::types::ConfigurationError;
///
/// let err = ConfigurationError::InvalidPathCount(0);
/// assert_eq!(format!("{}", err), "Invalid path count 0: at least one path is required");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Number of paths below one.
    #[error("Invalid path count {0}: at least one path is required")]
    InvalidPathCount(usize),

    /// Number of time steps below one.
    #[error("Invalid step count {0}: at least one time step is required")]
    InvalidStepCount(usize),

    /// Horizon not strictly positive or not finite.
    #[error("Invalid horizon {0}: must be positive and finite")]
    InvalidHorizon(f64),

    /// Path count times path length does not fit in memory addressing.
    #[error("Ensemble of {paths} paths x {points} points is too large")]
    EnsembleTooLarge {
        /// Requested number of paths.
        paths: usize,
        /// Points per path (steps + 1).
        points: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable holds an unparseable value.
    #[error("Environment variable {var} has invalid value '{value}'")]
    EnvError {
        /// Variable name.
        var: String,
        /// Raw value found.
        value: String,
    },
}

impl ConfigurationError {
    /// Shorthand for [`ConfigurationError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use shortrate_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Curve query errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketDataError {
    /// Maturity outside the curve's domain.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The offending maturity in years.
        t: f64,
    },
}

impl From<DateError> for ConfigurationError {
    fn from(err: DateError) -> Self {
        ConfigurationError::invalid("evaluation_date", err.to_string())
    }
}
