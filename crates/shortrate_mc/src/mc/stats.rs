//! Cross-sectional estimation over a path ensemble.
//!
//! At each grid index `i` the estimator computes
//!
//! ```text
//! mu_i = (1/M) * sum_m r_{m,i}
//! v_i  = (1/M) * sum_m (r_{m,i} - mu_i)^2
//! ```
//!
//! The variance is the population variance (divisor `M`), so a single path
//! has variance exactly zero. Sums are shifted by the first path's value at
//! each index, which keeps a constant column at exactly zero variance.

use tracing::{debug, warn};

use super::ensemble::PathEnsemble;

/// Advisory raised when every variance after `t_0` is exactly zero while
/// more than one path was simulated.
///
/// This is expected for zero volatility and a sign of a broken random
/// source otherwise. It is never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericalDegeneracy {
    /// Number of paths in the ensemble.
    pub n_paths: usize,
    /// Number of grid points checked (excluding `t_0`).
    pub n_points: usize,
}

impl std::fmt::Display for NumericalDegeneracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "variance is exactly zero at all {} points after t = 0 across {} paths",
            self.n_points, self.n_paths
        )
    }
}

/// One row of [`CrossSectionalStats`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsRow {
    /// Grid time.
    pub time: f64,
    /// Sample mean of the short rate.
    pub mean: f64,
    /// Population variance of the short rate.
    pub variance: f64,
}

/// Per-index sample mean and variance of an ensemble.
///
/// Derived from an ensemble and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossSectionalStats {
    times: Vec<f64>,
    means: Vec<f64>,
    variances: Vec<f64>,
    n_paths: usize,
    degeneracy: Option<NumericalDegeneracy>,
}

impl CrossSectionalStats {
    /// Estimates mean and variance at every grid index of `ensemble`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shortrate_core::types::TimeGrid;
    /// use shortrate_mc::mc::{CrossSectionalStats, PathEnsemble};
    ///
    /// let grid = TimeGrid::uniform(1.0, 1).unwrap();
    /// let ensemble = PathEnsemble::from_values(vec![0.05, 0.04, 0.05, 0.06], 2, grid).unwrap();
    ///
    /// let stats = CrossSectionalStats::estimate(&ensemble);
    /// assert!((stats.means()[1] - 0.05).abs() < 1e-15);
    /// assert!((stats.variances()[1] - 1e-4).abs() < 1e-15);
    /// assert_eq!(stats.variances()[0], 0.0);
    /// ```
    pub fn estimate(ensemble: &PathEnsemble) -> Self {
        let n_paths = ensemble.n_paths();
        let len = ensemble.path_len();
        let scale = 1.0 / n_paths as f64;

        // Shift by the first path so constant columns give exactly zero.
        let shift = ensemble.path(0).to_vec();

        let mut sums = vec![0.0; len];
        for path in ensemble.paths() {
            for ((acc, &r), &s) in sums.iter_mut().zip(path).zip(&shift) {
                *acc += r - s;
            }
        }
        let offsets: Vec<f64> = sums.iter().map(|&sum| sum * scale).collect();

        let mut squares = vec![0.0; len];
        for path in ensemble.paths() {
            for (((acc, &r), &s), &d) in squares.iter_mut().zip(path).zip(&shift).zip(&offsets) {
                let dev = (r - s) - d;
                *acc += dev * dev;
            }
        }

        let means: Vec<f64> = shift.iter().zip(&offsets).map(|(&s, &d)| s + d).collect();
        let variances: Vec<f64> = squares.iter().map(|&sq| sq * scale).collect();

        let degeneracy = if n_paths > 1 && len > 1 && variances[1..].iter().all(|&v| v == 0.0) {
            let advisory = NumericalDegeneracy {
                n_paths,
                n_points: len - 1,
            };
            warn!(n_paths, n_points = len - 1, "Numerical degeneracy: {}", advisory);
            Some(advisory)
        } else {
            None
        };

        debug!(n_paths, n_points = len, "Cross-sectional estimation complete");

        Self {
            times: ensemble.grid().times().to_vec(),
            means,
            variances,
            n_paths,
            degeneracy,
        }
    }

    /// Grid times.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Sample mean at each grid index.
    #[inline]
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Population variance at each grid index.
    #[inline]
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    /// Number of paths the statistics were estimated from.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether there are no grid points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Standard error of the mean at index `i`: `sqrt(v_i / M)`.
    pub fn standard_error(&self, i: usize) -> f64 {
        (self.variances[i] / self.n_paths as f64).sqrt()
    }

    /// Row at grid index `i`.
    pub fn row(&self, i: usize) -> StatsRow {
        StatsRow {
            time: self.times[i],
            mean: self.means[i],
            variance: self.variances[i],
        }
    }

    /// Rows in grid order.
    pub fn rows(&self) -> impl Iterator<Item = StatsRow> + '_ {
        (0..self.len()).map(move |i| self.row(i))
    }

    /// Row at the horizon.
    pub fn terminal(&self) -> StatsRow {
        self.row(self.len() - 1)
    }

    /// Degeneracy advisory, if the run was degenerate.
    #[inline]
    pub fn degeneracy(&self) -> Option<NumericalDegeneracy> {
        self.degeneracy
    }
}
