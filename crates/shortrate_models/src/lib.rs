//! # shortrate_models: Short-Rate Model Layer
//!
//! ## Layer 2 Role
//!
//! shortrate_models sits on top of `shortrate_core` and provides:
//! - [`models::ProcessParameters`]: validated Hull-White parameters
//! - [`models::HullWhiteModel`]: one-step evolution under Euler or exact discretisation
//! - [`analytical::AnalyticalReference`]: closed-form mean and variance of the short rate
//!
//! ## Usage
//!
//! ```
//! use shortrate_models::models::{HullWhiteModel, ProcessParameters, ShortRateModel};
//! use shortrate_models::analytical::AnalyticalReference;
//!
//! let params = ProcessParameters::new(0.1, 0.015, 0.05).unwrap();
//! let model = HullWhiteModel::euler(params);
//!
//! let r0 = model.initial_rate();
//! let r1 = model.evolve(r0, 0.0, 1.0 / 12.0, 0.0);
//! assert!(r1.is_finite());
//!
//! let reference = AnalyticalReference::new(params);
//! assert_eq!(reference.variance(0.0), 0.0);
//! ```

#![warn(missing_docs)]

pub mod analytical;
pub mod models;
