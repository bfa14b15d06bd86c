//! Analytical mean and variance on a time grid.

use shortrate_core::types::TimeGrid;

use crate::models::ProcessParameters;

/// Closed-form reference moments for a Hull-White parameter set.
///
/// # Examples
/// ```
/// use shortrate_models::analytical::AnalyticalReference;
/// use shortrate_models::models::ProcessParameters;
///
/// let params = ProcessParameters::new(0.1, 0.015, 0.05).unwrap();
/// let reference = AnalyticalReference::new(params);
///
/// assert_eq!(reference.mean(0.0), 0.05);
/// assert_eq!(reference.variance(0.0), 0.0);
///
/// // 0.015^2 / 0.2 * (1 - e^{-6})
/// assert!((reference.variance(30.0) - 0.0011222).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticalReference {
    params: ProcessParameters,
}

impl AnalyticalReference {
    /// Creates a reference for the given parameters.
    pub fn new(params: ProcessParameters) -> Self {
        Self { params }
    }

    /// Parameters the reference was built from.
    #[inline]
    pub fn params(&self) -> &ProcessParameters {
        &self.params
    }

    /// E[r(t)].
    #[inline]
    pub fn mean(&self, t: f64) -> f64 {
        self.params.alpha(t)
    }

    /// Var[r(t)].
    #[inline]
    pub fn variance(&self, t: f64) -> f64 {
        let a = self.params.mean_reversion();
        let sigma = self.params.volatility();
        sigma * sigma / (2.0 * a) * (1.0 - (-2.0 * a * t).exp())
    }

    /// Standard deviation of r(t).
    #[inline]
    pub fn std_dev(&self, t: f64) -> f64 {
        self.variance(t).sqrt()
    }

    /// Limit of the variance as t goes to infinity: sigma^2 / (2a).
    pub fn stationary_variance(&self) -> f64 {
        let a = self.params.mean_reversion();
        let sigma = self.params.volatility();
        sigma * sigma / (2.0 * a)
    }

    /// Evaluates mean and variance at every point of `grid`.
    pub fn moments(&self, grid: &TimeGrid) -> AnalyticalMoments {
        let times = grid.times().to_vec();
        let means = times.iter().map(|&t| self.mean(t)).collect();
        let variances = times.iter().map(|&t| self.variance(t)).collect();
        AnalyticalMoments {
            times,
            means,
            variances,
        }
    }
}

/// Analytical moments evaluated on a grid, one entry per grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticalMoments {
    times: Vec<f64>,
    means: Vec<f64>,
    variances: Vec<f64>,
}

impl AnalyticalMoments {
    /// Grid times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// E[r(t_i)] for each grid point.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Var[r(t_i)] for each grid point.
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether there are no grid points.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn reference() -> AnalyticalReference {
        AnalyticalReference::new(ProcessParameters::new(0.1, 0.015, 0.05).unwrap())
    }

    #[test]
    fn test_mean_at_zero_is_forward() {
        assert_eq!(reference().mean(0.0), 0.05);
    }

    #[test]
    fn test_variance_at_zero() {
        assert_eq!(reference().variance(0.0), 0.0);
        assert_eq!(reference().std_dev(0.0), 0.0);
    }

    #[test]
    fn test_thirty_year_values() {
        let r = reference();
        // (0.15 * (1 - e^{-3}))^2 / 2 + 0.05
        let x = 0.15 * (1.0 - (-3.0_f64).exp());
        assert_relative_eq!(r.mean(30.0), 0.05 + 0.5 * x * x, max_relative = 1e-14);
        assert_relative_eq!(
            r.variance(30.0),
            0.001125 * (1.0 - (-6.0_f64).exp()),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_stationary_variance() {
        let r = reference();
        assert_relative_eq!(r.stationary_variance(), 0.001125, max_relative = 1e-14);
        assert_relative_eq!(r.variance(500.0), r.stationary_variance(), max_relative = 1e-12);
    }

    #[test]
    fn test_zero_volatility_moments() {
        let r = AnalyticalReference::new(ProcessParameters::new(0.1, 0.0, 0.05).unwrap());
        for &t in &[0.0, 1.0, 30.0] {
            assert_eq!(r.mean(t), 0.05);
            assert_eq!(r.variance(t), 0.0);
        }
    }

    #[test]
    fn test_moments_on_grid() {
        let grid = TimeGrid::uniform(30.0, 360).unwrap();
        let m = reference().moments(&grid);
        assert_eq!(m.len(), 361);
        assert!(!m.is_empty());
        assert_eq!(m.times(), grid.times());
        assert_eq!(m.means()[0], 0.05);
        assert_eq!(m.variances()[0], 0.0);
        assert_relative_eq!(m.variances()[360], reference().variance(30.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_variance_increasing_and_bounded(
            a in 0.01f64..2.0,
            sigma in 0.001f64..0.05,
            t in 0.01f64..50.0,
        ) {
            let r = AnalyticalReference::new(ProcessParameters::new(a, sigma, 0.03).unwrap());
            let v = r.variance(t);
            prop_assert!(v > 0.0);
            prop_assert!(v <= r.stationary_variance());
            prop_assert!(r.variance(t * 1.5) >= v);
        }

        #[test]
        fn prop_mean_above_forward(
            a in 0.01f64..2.0,
            sigma in 0.0f64..0.05,
            t in 0.0f64..50.0,
        ) {
            let r = AnalyticalReference::new(ProcessParameters::new(a, sigma, 0.03).unwrap());
            prop_assert!(r.mean(t) >= 0.03);
        }
    }
}
