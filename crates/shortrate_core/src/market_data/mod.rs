//! Market data structures.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and the flat forward curve

pub mod curves;

pub use curves::{FlatForwardCurve, YieldCurve};
