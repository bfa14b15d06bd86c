//! Comparison of estimated moments against the closed-form reference.

use shortrate_core::types::ConfigurationError;
use shortrate_models::analytical::AnalyticalMoments;

use super::error::SimulationError;
use super::stats::CrossSectionalStats;

/// Per-index errors of Monte Carlo moments against analytical moments.
///
/// - mean error: `|mu_i - E[r(t_i)]|`
/// - variance error: `|v_i - Var(t_i)| / Var(t_i)`, skipped (`None`) where the
///   reference variance is zero, which always includes `t_0`
#[derive(Clone, Debug, PartialEq)]
pub struct ConvergenceReport {
    times: Vec<f64>,
    mean_abs_errors: Vec<f64>,
    variance_rel_errors: Vec<Option<f64>>,
}

impl ConvergenceReport {
    /// Compares `stats` with `reference`, index by index.
    ///
    /// # Errors
    ///
    /// `Configuration` if the two were computed on grids of different length.
    pub fn compare(
        stats: &CrossSectionalStats,
        reference: &AnalyticalMoments,
    ) -> Result<Self, SimulationError> {
        if stats.len() != reference.len() {
            return Err(ConfigurationError::invalid(
                "reference",
                format!(
                    "{} estimated points against {} reference points",
                    stats.len(),
                    reference.len()
                ),
            )
            .into());
        }

        let mean_abs_errors = stats
            .means()
            .iter()
            .zip(reference.means())
            .map(|(mu, expected)| (mu - expected).abs())
            .collect();

        let variance_rel_errors = stats
            .variances()
            .iter()
            .zip(reference.variances())
            .map(|(&v, &expected)| {
                if expected > 0.0 {
                    Some((v - expected).abs() / expected)
                } else {
                    None
                }
            })
            .collect();

        Ok(Self {
            times: stats.times().to_vec(),
            mean_abs_errors,
            variance_rel_errors,
        })
    }

    /// Grid times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Absolute mean error per index.
    pub fn mean_abs_errors(&self) -> &[f64] {
        &self.mean_abs_errors
    }

    /// Relative variance error per index (`None` where the reference is zero).
    pub fn variance_rel_errors(&self) -> &[Option<f64>] {
        &self.variance_rel_errors
    }

    /// Largest absolute mean error.
    pub fn max_mean_abs_error(&self) -> f64 {
        self.mean_abs_errors.iter().copied().fold(0.0, f64::max)
    }

    /// Largest relative variance error over the compared indices.
    pub fn max_variance_rel_error(&self) -> f64 {
        self.variance_rel_errors
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }

    /// Index and value of the largest relative variance error.
    pub fn worst_variance(&self) -> Option<(usize, f64)> {
        self.variance_rel_errors
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|e| (i, e)))
            .fold(None, |worst, (i, e)| match worst {
                Some((_, w)) if w >= e => worst,
                _ => Some((i, e)),
            })
    }

    /// Whether every mean error is below `mean_tol` and every compared
    /// variance error is below `var_rel_tol`.
    pub fn within(&self, mean_tol: f64, var_rel_tol: f64) -> bool {
        self.mean_abs_errors.iter().all(|&e| e <= mean_tol)
            && self.variance_rel_errors.iter().flatten().all(|&e| e <= var_rel_tol)
    }
}
