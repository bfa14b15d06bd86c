//! # shortrate_core: Foundation for the Short-Rate Simulation Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! shortrate_core is the bottom layer of the 3-layer workspace, providing:
//! - Time types: `Date`, `DayCountConvention`, `TimeGrid` (`types`)
//! - Error types: `ConfigurationError`, `DateError`, `MarketDataError` (`types::error`)
//! - Flat forward curve (`market_data`)
//! - Standard normal distribution functions (`math::distributions`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other shortrate_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use shortrate_core::types::{Date, DayCountConvention, TimeGrid};
//!
//! // Thirty years of monthly steps
//! let grid = TimeGrid::uniform(30.0, 360).unwrap();
//! assert_eq!(grid.len(), 361);
//! assert_eq!(grid.time(360), 30.0);
//!
//! // Grid anchored to an explicit evaluation date
//! let today = Date::from_ymd(2025, 4, 26).unwrap();
//! let end = Date::from_ymd(2026, 4, 26).unwrap();
//! let grid = TimeGrid::between(today, end, 12, DayCountConvention::Actual360).unwrap();
//! assert_eq!(grid.evaluation_date(), Some(today));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date and DayCountConvention

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
