//! Numerical building blocks.
//!
//! - [`distributions`]: Standard normal CDF and inverse CDF

pub mod distributions;

pub use distributions::{inverse_norm_cdf, norm_cdf};
