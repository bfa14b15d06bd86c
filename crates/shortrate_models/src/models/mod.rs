//! Short-rate models and their one-step evolution.
//!
//! - [`ShortRateModel`]: stepping interface used by the path generator
//! - [`HullWhiteModel`]: Hull-White one-factor dynamics

pub mod hull_white;
pub mod short_rate;

pub use hull_white::{Discretisation, HullWhiteModel, ProcessParameters};
pub use short_rate::ShortRateModel;
