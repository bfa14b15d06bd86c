//! Single-path generation.
//!
//! [`PathGenerator`] advances one trajectory of a [`ShortRateModel`] across a
//! [`TimeGrid`], consuming exactly one Gaussian draw per step.

use shortrate_core::types::{ConfigurationError, TimeGrid};
use shortrate_models::models::ShortRateModel;

use super::error::SimulationError;
use crate::rng::GaussianStream;

/// One realised short-rate trajectory: `n + 1` values starting at `r_0`.
///
/// Immutable after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplePath {
    values: Vec<f64>,
}

impl SamplePath {
    /// Rates at each grid point.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a path holds at least `r_0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rate at `t = 0`.
    #[inline]
    pub fn initial(&self) -> f64 {
        self.values[0]
    }

    /// Rate at the horizon.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Consumes the path, returning the rates.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for SamplePath {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Generates sample paths of `model` on `grid`.
///
/// # Examples
///
/// ```rust
/// use shortrate_core::types::TimeGrid;
/// use shortrate_mc::mc::PathGenerator;
/// use shortrate_mc::rng::{SeededStreams, StreamSource};
/// use shortrate_models::models::{HullWhiteModel, ProcessParameters};
///
/// let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.015, 0.05).unwrap());
/// let grid = TimeGrid::uniform(30.0, 360).unwrap();
/// let generator = PathGenerator::new(&model, &grid);
///
/// let mut stream = SeededStreams::new(42).stream(0, grid.n_steps()).unwrap();
/// let path = generator.generate(&mut stream).unwrap();
///
/// assert_eq!(path.len(), 361);
/// assert_eq!(path.initial(), 0.05);
/// ```
#[derive(Debug)]
pub struct PathGenerator<'a, M: ShortRateModel> {
    model: &'a M,
    grid: &'a TimeGrid,
}

impl<'a, M: ShortRateModel> PathGenerator<'a, M> {
    /// Creates a generator for `model` on `grid`.
    pub fn new(model: &'a M, grid: &'a TimeGrid) -> Self {
        Self { model, grid }
    }

    /// The grid paths are generated on.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        self.grid
    }

    /// Generates a new path.
    ///
    /// # Errors
    ///
    /// `RandomSourceExhausted` if `stream` runs out before the horizon.
    pub fn generate<S: GaussianStream>(
        &self,
        stream: &mut S,
    ) -> Result<SamplePath, SimulationError> {
        let mut values = vec![0.0; self.grid.len()];
        self.fill(stream, &mut values)?;
        Ok(SamplePath { values })
    }

    /// Writes a path into `out`, which must hold exactly `grid.len()` values.
    ///
    /// Step `i` advances from `t_i` to `t_{i+1}` with the `i`-th draw.
    pub fn fill<S: GaussianStream>(
        &self,
        stream: &mut S,
        out: &mut [f64],
    ) -> Result<(), SimulationError> {
        if out.len() != self.grid.len() {
            return Err(ConfigurationError::invalid(
                "path_buffer",
                format!("expected {} slots, got {}", self.grid.len(), out.len()),
            )
            .into());
        }

        let dt = self.grid.dt();
        let mut rate = self.model.initial_rate();
        out[0] = rate;

        for (i, slot) in out.iter_mut().enumerate().skip(1) {
            let t = self.grid.time(i - 1);
            let z = stream.next_gaussian()?;
            rate = self.model.evolve(rate, t, dt, z);
            *slot = rate;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GaussianSequence, GaussianTransform, SeededStreams, StreamSource};
    use approx::assert_relative_eq;
    use shortrate_models::models::{HullWhiteModel, ProcessParameters};

    /// Stream of fixed draws, for deterministic checks.
    struct FixedDraws {
        value: f64,
        remaining: usize,
    }

    impl GaussianStream for FixedDraws {
        fn next_gaussian(&mut self) -> Result<f64, SimulationError> {
            if self.remaining == 0 {
                return Err(SimulationError::RandomSourceExhausted { capacity: 0 });
            }
            self.remaining -= 1;
            Ok(self.value)
        }
    }

    fn model() -> HullWhiteModel {
        HullWhiteModel::euler(ProcessParameters::new(0.1, 0.015, 0.05).unwrap())
    }

    #[test]
    fn test_path_length_and_start() {
        let model = model();
        let grid = TimeGrid::uniform(30.0, 360).unwrap();
        let generator = PathGenerator::new(&model, &grid);
        let mut stream = SeededStreams::new(42).stream(0, 360).unwrap();

        let path = generator.generate(&mut stream).unwrap();
        assert_eq!(path.len(), 361);
        assert!(!path.is_empty());
        assert_eq!(path.initial(), 0.05);
        assert!(path.values().iter().all(|r| r.is_finite()));
    }

    #[test]
    fn test_consumes_exactly_one_draw_per_step() {
        let model = model();
        let grid = TimeGrid::uniform(1.0, 12).unwrap();
        let generator = PathGenerator::new(&model, &grid);

        let mut stream = GaussianSequence::new(3, 20, GaussianTransform::InverseCdf).unwrap();
        generator.generate(&mut stream).unwrap();
        assert_eq!(stream.remaining(), 8);
    }

    #[test]
    fn test_short_stream_is_exhausted() {
        let model = model();
        let grid = TimeGrid::uniform(1.0, 12).unwrap();
        let generator = PathGenerator::new(&model, &grid);

        let mut stream = GaussianSequence::new(3, 11, GaussianTransform::InverseCdf).unwrap();
        assert_eq!(
            generator.generate(&mut stream),
            Err(SimulationError::RandomSourceExhausted { capacity: 11 })
        );
    }

    #[test]
    fn test_zero_draws_follow_euler_mean_recursion() {
        let model = model();
        let params = *model.params();
        let grid = TimeGrid::uniform(5.0, 60).unwrap();
        let generator = PathGenerator::new(&model, &grid);

        let mut stream = FixedDraws {
            value: 0.0,
            remaining: 60,
        };
        let path = generator.generate(&mut stream).unwrap();

        let mut expected = 0.05;
        for i in 0..60 {
            let t = grid.time(i);
            let drift = params.mean_reversion() * (params.reversion_level(t) - expected);
            expected += drift * grid.dt();
            assert_eq!(path.values()[i + 1], expected);
        }
        // Euler drift tracks the analytical mean closely
        assert_relative_eq!(path.terminal(), params.alpha(5.0), max_relative = 1e-3);
    }

    #[test]
    fn test_fill_rejects_wrong_buffer() {
        let model = model();
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let generator = PathGenerator::new(&model, &grid);
        let mut stream = FixedDraws {
            value: 0.0,
            remaining: 10,
        };

        let mut short = vec![0.0; 4];
        let err = generator.fill(&mut stream, &mut short).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_negative_rates_survive() {
        let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.05, 0.001).unwrap());
        let grid = TimeGrid::uniform(1.0, 12).unwrap();
        let generator = PathGenerator::new(&model, &grid);
        let mut stream = FixedDraws {
            value: -2.0,
            remaining: 12,
        };

        let path = generator.generate(&mut stream).unwrap();
        assert!(path.terminal() < 0.0);
        assert_eq!(path.clone().into_values().len(), 13);
    }
}
