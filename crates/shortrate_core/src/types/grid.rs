//! Uniform simulation time grid.

use super::error::ConfigurationError;
use super::time::{Date, DayCountConvention};

/// Uniform time grid `0 = t_0 < t_1 < ... < t_n = T` with step `dt = T / n`.
///
/// The grid owns its evaluation date (if any) instead of reading it from
/// process-wide state, so two grids anchored at different dates can coexist
/// in one process.
///
/// # Invariants
///
/// - `times()[0] == 0.0` and `times()[n] == T` exactly
/// - times are strictly increasing
/// - `len() == n_steps() + 1`
///
/// # Examples
///
/// ```
/// use shortrate_core::types::TimeGrid;
///
/// let grid = TimeGrid::uniform(1.0, 4).unwrap();
/// assert_eq!(grid.times(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(grid.dt(), 0.25);
///
/// assert!(TimeGrid::uniform(0.0, 4).is_err());
/// assert!(TimeGrid::uniform(1.0, 0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
    dt: f64,
    evaluation_date: Option<Date>,
}

impl TimeGrid {
    /// Creates a grid of `n_steps` equal steps over `[0, horizon]`.
    ///
    /// # Errors
    ///
    /// - `InvalidHorizon` if `horizon <= 0` or not finite
    /// - `InvalidStepCount` if `n_steps == 0`
    /// - `InvalidParameter` if the step underflows to zero
    pub fn uniform(horizon: f64, n_steps: usize) -> Result<Self, ConfigurationError> {
        if !(horizon > 0.0 && horizon.is_finite()) {
            return Err(ConfigurationError::InvalidHorizon(horizon));
        }
        if n_steps == 0 {
            return Err(ConfigurationError::InvalidStepCount(n_steps));
        }

        let dt = horizon / n_steps as f64;
        if dt <= 0.0 {
            return Err(ConfigurationError::invalid(
                "n_steps",
                format!("{} steps over {} years underflows the time step", n_steps, horizon),
            ));
        }

        let mut times: Vec<f64> = (0..=n_steps).map(|i| i as f64 * dt).collect();
        times[n_steps] = horizon;

        Ok(Self {
            times,
            dt,
            evaluation_date: None,
        })
    }

    /// Creates a uniform grid and records the date that `t = 0` refers to.
    pub fn anchored(
        evaluation_date: Date,
        horizon: f64,
        n_steps: usize,
    ) -> Result<Self, ConfigurationError> {
        let mut grid = Self::uniform(horizon, n_steps)?;
        grid.evaluation_date = Some(evaluation_date);
        Ok(grid)
    }

    /// Creates a grid from `evaluation_date` to `end_date`, measuring the
    /// horizon with `day_count`.
    ///
    /// # Errors
    ///
    /// `InvalidHorizon` when `end_date` is not after `evaluation_date`.
    pub fn between(
        evaluation_date: Date,
        end_date: Date,
        n_steps: usize,
        day_count: DayCountConvention,
    ) -> Result<Self, ConfigurationError> {
        let horizon = day_count.year_fraction(evaluation_date, end_date);
        Self::anchored(evaluation_date, horizon, n_steps)
    }

    /// All grid times, starting at zero.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Time at grid index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i > n_steps()`.
    #[inline]
    pub fn time(&self, i: usize) -> f64 {
        self.times[i]
    }

    /// Uniform step size.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Final grid time `T`.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Number of steps `n`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Number of grid points `n + 1`.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a grid has at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Date corresponding to `t = 0`, if the grid was anchored.
    #[inline]
    pub fn evaluation_date(&self) -> Option<Date> {
        self.evaluation_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_uniform_grid_endpoints() {
        let grid = TimeGrid::uniform(30.0, 360).unwrap();
        assert_eq!(grid.len(), 361);
        assert_eq!(grid.n_steps(), 360);
        assert_eq!(grid.time(0), 0.0);
        assert_eq!(grid.horizon(), 30.0);
        assert!((grid.dt() - 30.0 / 360.0).abs() < 1e-15);
        assert!(grid.evaluation_date().is_none());
    }

    #[test]
    fn test_invalid_horizon() {
        assert_eq!(
            TimeGrid::uniform(-1.0, 10),
            Err(ConfigurationError::InvalidHorizon(-1.0))
        );
        assert!(TimeGrid::uniform(f64::NAN, 10).is_err());
        assert!(TimeGrid::uniform(f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_invalid_step_count() {
        assert_eq!(
            TimeGrid::uniform(1.0, 0),
            Err(ConfigurationError::InvalidStepCount(0))
        );
    }

    #[test]
    fn test_anchored_grid_keeps_date() {
        let today = Date::from_ymd(2025, 4, 26).unwrap();
        let grid = TimeGrid::anchored(today, 30.0, 360).unwrap();
        assert_eq!(grid.evaluation_date(), Some(today));
    }

    #[test]
    fn test_between_uses_day_count() {
        let today = Date::from_ymd(2025, 4, 26).unwrap();
        let end = Date::from_ymd(2025, 10, 23).unwrap();
        let grid = TimeGrid::between(today, end, 6, DayCountConvention::Actual360).unwrap();
        assert!((grid.horizon() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_between_rejects_end_before_start() {
        let today = Date::from_ymd(2025, 4, 26).unwrap();
        let past = Date::from_ymd(2025, 1, 1).unwrap();
        let result = TimeGrid::between(today, past, 6, DayCountConvention::Actual360);
        assert!(matches!(result, Err(ConfigurationError::InvalidHorizon(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_grid_strictly_increasing(horizon in 1e-3..100.0f64, n_steps in 1..2000usize) {
            let grid = TimeGrid::uniform(horizon, n_steps).unwrap();
            prop_assert_eq!(grid.len(), n_steps + 1);
            prop_assert_eq!(grid.time(0), 0.0);
            prop_assert_eq!(grid.horizon(), horizon);
            for w in grid.times().windows(2) {
                prop_assert!(w[1] > w[0]);
            }
        }
    }
}
