//! Row-major storage for a batch of sample paths.

use shortrate_core::types::{ConfigurationError, TimeGrid};

use super::paths::SamplePath;

/// `M` sample paths of identical length sharing one [`TimeGrid`].
///
/// Values are stored row-major: path `m`, grid index `i` lives at
/// `values[m * (n + 1) + i]`.
///
/// # Examples
///
/// ```rust
/// use shortrate_core::types::TimeGrid;
/// use shortrate_mc::mc::BatchSimulator;
/// use shortrate_mc::rng::SeededStreams;
/// use shortrate_models::models::{HullWhiteModel, ProcessParameters};
///
/// let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.015, 0.05).unwrap());
/// let grid = TimeGrid::uniform(1.0, 12).unwrap();
/// let simulator = BatchSimulator::new(model, grid, SeededStreams::new(7));
///
/// let ensemble = simulator.simulate(100).unwrap();
/// assert_eq!(ensemble.n_paths(), 100);
/// assert_eq!(ensemble.path(3).len(), 13);
/// assert_eq!(ensemble.column(0).count(), 100);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathEnsemble {
    values: Vec<f64>,
    n_paths: usize,
    grid: TimeGrid,
}

impl PathEnsemble {
    /// Number of values an ensemble of `n_paths` x `path_len` needs.
    ///
    /// # Errors
    ///
    /// - `InvalidPathCount` if `n_paths == 0`
    /// - `EnsembleTooLarge` if the byte size exceeds `isize::MAX`
    pub fn required_len(n_paths: usize, path_len: usize) -> Result<usize, ConfigurationError> {
        if n_paths == 0 {
            return Err(ConfigurationError::InvalidPathCount(n_paths));
        }
        let too_large = || ConfigurationError::EnsembleTooLarge {
            paths: n_paths,
            points: path_len,
        };
        let len = n_paths.checked_mul(path_len).ok_or_else(too_large)?;
        let bytes = len
            .checked_mul(std::mem::size_of::<f64>())
            .ok_or_else(too_large)?;
        if bytes > isize::MAX as usize {
            return Err(too_large());
        }
        Ok(len)
    }

    /// Wraps row-major `values` produced on `grid`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `values.len()` is not `n_paths * grid.len()`.
    pub fn from_values(
        values: Vec<f64>,
        n_paths: usize,
        grid: TimeGrid,
    ) -> Result<Self, ConfigurationError> {
        let expected = Self::required_len(n_paths, grid.len())?;
        if values.len() != expected {
            return Err(ConfigurationError::invalid(
                "ensemble",
                format!(
                    "{} values do not form {} paths of {} points",
                    values.len(),
                    n_paths,
                    grid.len()
                ),
            ));
        }
        Ok(Self {
            values,
            n_paths,
            grid,
        })
    }

    /// Number of paths `M`.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Points per path (`n + 1`).
    #[inline]
    pub fn path_len(&self) -> usize {
        self.grid.len()
    }

    /// The shared time grid.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// All values, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Rates of path `m`.
    ///
    /// # Panics
    ///
    /// Panics if `m >= n_paths()`.
    #[inline]
    pub fn path(&self, m: usize) -> &[f64] {
        let len = self.path_len();
        &self.values[m * len..(m + 1) * len]
    }

    /// Rate of path `m` at grid index `i`.
    #[inline]
    pub fn value(&self, m: usize, i: usize) -> f64 {
        self.values[m * self.path_len() + i]
    }

    /// Iterates over paths in index order.
    pub fn paths(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.path_len())
    }

    /// Iterates over the cross-section at grid index `i`.
    pub fn column(&self, i: usize) -> impl Iterator<Item = f64> + '_ {
        self.paths().map(move |path| path[i])
    }

    /// Copies path `m` out as a [`SamplePath`].
    pub fn sample_path(&self, m: usize) -> SamplePath {
        SamplePath::from(self.path(m).to_vec())
    }

    /// Consumes the ensemble, returning the row-major values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}
