//! Batch simulation of independent sample paths.
//!
//! [`BatchSimulator`] drives a [`PathGenerator`] once per path, each path
//! consuming its own stream from a [`StreamSource`]. In parallel mode rayon
//! workers write disjoint rows of the ensemble; because stream contents
//! depend only on the path index, both modes produce identical ensembles.

use std::time::Instant;

use rayon::prelude::*;
use shortrate_core::types::{ConfigurationError, TimeGrid};
use shortrate_models::models::ShortRateModel;
use tracing::{debug, info};

use super::ensemble::PathEnsemble;
use super::error::SimulationError;
use super::paths::PathGenerator;
use crate::rng::StreamSource;

/// How paths are distributed over threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// All paths on the calling thread, in index order.
    Sequential,
    /// Paths spread over rayon's global pool.
    #[default]
    Parallel,
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "serial" => Ok(ExecutionMode::Sequential),
            "parallel" | "rayon" => Ok(ExecutionMode::Parallel),
            _ => Err(format!("Unknown execution mode: {}", s)),
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Parallel => write!(f, "parallel"),
        }
    }
}

/// Produces a [`PathEnsemble`] of independent paths.
///
/// # Examples
///
/// ```rust
/// use shortrate_core::types::TimeGrid;
/// use shortrate_mc::mc::{BatchSimulator, ExecutionMode};
/// use shortrate_mc::rng::SeededStreams;
/// use shortrate_models::models::{HullWhiteModel, ProcessParameters};
///
/// let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.015, 0.05).unwrap());
/// let grid = TimeGrid::uniform(30.0, 360).unwrap();
///
/// let sequential = BatchSimulator::new(model, grid.clone(), SeededStreams::new(42))
///     .with_mode(ExecutionMode::Sequential)
///     .simulate(64)
///     .unwrap();
/// let parallel = BatchSimulator::new(model, grid, SeededStreams::new(42))
///     .with_mode(ExecutionMode::Parallel)
///     .simulate(64)
///     .unwrap();
///
/// assert_eq!(sequential, parallel);
/// ```
#[derive(Clone, Debug)]
pub struct BatchSimulator<M: ShortRateModel, S: StreamSource> {
    model: M,
    grid: TimeGrid,
    streams: S,
    mode: ExecutionMode,
}

impl<M: ShortRateModel, S: StreamSource> BatchSimulator<M, S> {
    /// Creates a simulator in the default (parallel) mode.
    pub fn new(model: M, grid: TimeGrid, streams: S) -> Self {
        Self {
            model,
            grid,
            streams,
            mode: ExecutionMode::default(),
        }
    }

    /// Sets the execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// The model being simulated.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The time grid.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// The stream source.
    #[inline]
    pub fn streams(&self) -> &S {
        &self.streams
    }

    /// The execution mode.
    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Simulates `n_paths` paths.
    ///
    /// # Errors
    ///
    /// - `Configuration` if `n_paths == 0` or the ensemble is too large
    /// - Any error from stream construction or path generation; no partial
    ///   ensemble is returned
    pub fn simulate(&self, n_paths: usize) -> Result<PathEnsemble, SimulationError> {
        let path_len = self.grid.len();
        let n_steps = self.grid.n_steps();
        let total = PathEnsemble::required_len(n_paths, path_len)?;

        info!(
            model = self.model.model_name(),
            n_paths,
            n_steps,
            horizon = self.grid.horizon(),
            mode = %self.mode,
            "Starting path simulation"
        );
        let started = Instant::now();

        let mut values = Vec::new();
        values
            .try_reserve_exact(total)
            .map_err(|_| ConfigurationError::EnsembleTooLarge {
                paths: n_paths,
                points: path_len,
            })?;
        values.resize(total, 0.0);
        let generator = PathGenerator::new(&self.model, &self.grid);

        let fill_row = |(m, row): (usize, &mut [f64])| -> Result<(), SimulationError> {
            let mut stream = self.streams.stream(m, n_steps)?;
            generator.fill(&mut stream, row)
        };

        match self.mode {
            ExecutionMode::Sequential => {
                values.chunks_mut(path_len).enumerate().try_for_each(fill_row)?;
            }
            ExecutionMode::Parallel => {
                debug!(
                    threads = rayon::current_num_threads(),
                    "Distributing paths over rayon pool"
                );
                values
                    .par_chunks_mut(path_len)
                    .enumerate()
                    .try_for_each(fill_row)?;
            }
        }

        let ensemble = PathEnsemble::from_values(values, n_paths, self.grid.clone())?;

        info!(
            n_paths,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Path simulation complete"
        );
        Ok(ensemble)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GaussianSequence, GaussianTransform, SeededStreams};
    use shortrate_models::models::{HullWhiteModel, ProcessParameters};

    fn simulator(mode: ExecutionMode) -> BatchSimulator<HullWhiteModel, SeededStreams> {
        let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.015, 0.05).unwrap());
        let grid = TimeGrid::uniform(10.0, 120).unwrap();
        BatchSimulator::new(model, grid, SeededStreams::new(42)).with_mode(mode)
    }

    /// Stream source whose streams are one draw short.
    struct ShortStreams;

    impl StreamSource for ShortStreams {
        type Stream = GaussianSequence;

        fn stream(&self, index: usize, draws: usize) -> Result<GaussianSequence, SimulationError> {
            GaussianSequence::new(index as u64, draws - 1, GaussianTransform::InverseCdf)
        }
    }

    #[test]
    fn test_shape() {
        let ensemble = simulator(ExecutionMode::Sequential).simulate(50).unwrap();
        assert_eq!(ensemble.n_paths(), 50);
        assert_eq!(ensemble.path_len(), 121);
        assert_eq!(ensemble.as_slice().len(), 50 * 121);
        assert!(ensemble.column(0).all(|r| r == 0.05));
    }

    #[test]
    fn test_zero_paths_rejected() {
        let err = simulator(ExecutionMode::Parallel).simulate(0).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Configuration(ConfigurationError::InvalidPathCount(0))
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_unallocatable_ensemble_is_an_error() {
        // 2^45 values (256 TiB) pass the size arithmetic but cannot be mapped
        let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.015, 0.05).unwrap());
        let grid = TimeGrid::uniform(1.0, 1).unwrap();
        let n_paths = 1usize << 44;
        assert!(PathEnsemble::required_len(n_paths, grid.len()).is_ok());

        let sim = BatchSimulator::new(model, grid, SeededStreams::new(1));
        assert_eq!(
            sim.simulate(n_paths),
            Err(SimulationError::Configuration(
                ConfigurationError::EnsembleTooLarge {
                    paths: n_paths,
                    points: 2
                }
            ))
        );
    }

    #[test]
    fn test_modes_bit_identical() {
        let seq = simulator(ExecutionMode::Sequential).simulate(200).unwrap();
        let par = simulator(ExecutionMode::Parallel).simulate(200).unwrap();
        assert_eq!(seq.as_slice(), par.as_slice());
    }

    #[test]
    fn test_rows_match_single_path_generation() {
        let sim = simulator(ExecutionMode::Parallel);
        let ensemble = sim.simulate(8).unwrap();
        let generator = PathGenerator::new(sim.model(), sim.grid());

        for m in 0..8 {
            let mut stream = sim.streams().stream(m, 120).unwrap();
            let path = generator.generate(&mut stream).unwrap();
            assert_eq!(path.values(), ensemble.path(m));
        }
    }

    #[test]
    fn test_prefix_stability() {
        // Path m does not depend on how many paths are requested
        let small = simulator(ExecutionMode::Parallel).simulate(10).unwrap();
        let large = simulator(ExecutionMode::Parallel).simulate(100).unwrap();
        assert_eq!(small.as_slice(), &large.as_slice()[..small.as_slice().len()]);
    }

    #[test]
    fn test_path_failure_propagates() {
        let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.015, 0.05).unwrap());
        let grid = TimeGrid::uniform(1.0, 12).unwrap();

        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let sim = BatchSimulator::new(model, grid.clone(), ShortStreams).with_mode(mode);
            assert_eq!(
                sim.simulate(16),
                Err(SimulationError::RandomSourceExhausted { capacity: 11 })
            );
        }
    }

    #[test]
    fn test_execution_mode_parsing() {
        assert_eq!(
            "Sequential".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Sequential
        );
        assert_eq!("rayon".parse::<ExecutionMode>().unwrap(), ExecutionMode::Parallel);
        assert!("gpu".parse::<ExecutionMode>().is_err());
        assert_eq!(ExecutionMode::Parallel.to_string(), "parallel");
    }
}
