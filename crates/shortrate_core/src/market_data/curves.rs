//! Initial term structure used to fit the short-rate drift.

use crate::types::MarketDataError;

/// Yield curve queried for discounting and forward rates.
///
/// # Contract
///
/// - `discount_factor(t)` returns D(t), with D(0) = 1
/// - `zero_rate(t)` returns the continuously compounded zero rate
/// - `instantaneous_forward(t)` returns f(0, t)
pub trait YieldCurve {
    /// Discount factor for maturity `t` (years, `t >= 0`).
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError>;

    /// Continuously compounded zero rate for maturity `t` (`t > 0`).
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError>;

    /// Instantaneous forward rate f(0, t) (`t >= 0`).
    fn instantaneous_forward(&self, t: f64) -> Result<f64, MarketDataError>;
}

/// Flat forward curve: the same continuously compounded rate at every maturity.
///
/// # Example
///
/// ```
/// use shortrate_core::market_data::{FlatForwardCurve, YieldCurve};
///
/// let curve = FlatForwardCurve::new(0.05);
///
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// assert_eq!(curve.instantaneous_forward(0.0).unwrap(), 0.05);
/// assert_eq!(curve.zero_rate(10.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForwardCurve {
    rate: f64,
}

impl FlatForwardCurve {
    /// Construct a flat curve with the given constant rate.
    ///
    /// Negative rates are allowed.
    #[inline]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl YieldCurve for FlatForwardCurve {
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        if t.is_nan() || t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        if t.is_nan() || t <= 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(self.rate)
    }

    fn instantaneous_forward(&self, t: f64) -> Result<f64, MarketDataError> {
        if t.is_nan() || t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(self.rate)
    }
}
