//! Core time and error types.
//!
//! This module provides:
//! - `time`: Date and DayCountConvention
//! - `grid`: The uniform simulation TimeGrid
//! - `error`: Structured error types for configuration, dates and curves
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod grid;
pub mod time;

// Re-export commonly used types at module level
pub use error::{ConfigurationError, DateError, MarketDataError};
pub use grid::TimeGrid;
pub use time::{Date, DayCountConvention};
