//! Closed-form moments of the Hull-White short rate.
//!
//! Under Hull-White with a flat initial forward curve the short rate is
//! Gaussian at every horizon:
//!
//! **Mean**: E[r(t)] = f0 + 0.5 * (sigma/a * (1 - e^{-at}))^2
//!
//! **Variance**: Var[r(t)] = sigma^2 / (2a) * (1 - e^{-2at})
//!
//! These are the reference the Monte Carlo estimates are judged against.

pub mod moments;

pub use moments::{AnalyticalMoments, AnalyticalReference};
