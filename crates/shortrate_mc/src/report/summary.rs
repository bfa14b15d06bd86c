//! JSON run summary.

use std::io::Write;

use serde::{Deserialize, Serialize};
use shortrate_core::types::Date;
use shortrate_models::models::Discretisation;

use super::error::ReportError;
use crate::mc::{ExecutionMode, SimulationOutcome};
use crate::rng::GaussianTransform;

/// Parameters, grid, seed, terminal statistics and maximum errors of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Model name.
    pub model: String,
    /// Mean reversion speed `a`.
    pub mean_reversion: f64,
    /// Volatility `sigma`.
    pub volatility: f64,
    /// Flat initial forward rate.
    pub forward_rate: f64,
    /// Horizon in years.
    pub horizon: f64,
    /// Number of time steps.
    pub n_steps: usize,
    /// Number of paths.
    pub n_paths: usize,
    /// Master seed used.
    pub seed: u64,
    /// Execution mode.
    pub execution: ExecutionMode,
    /// Discretisation scheme.
    pub discretisation: Discretisation,
    /// Gaussian transform.
    pub transform: GaussianTransform,
    /// Evaluation date of the grid, if anchored.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub evaluation_date: Option<Date>,
    /// Estimated mean at the horizon.
    pub terminal_mean: f64,
    /// Estimated variance at the horizon.
    pub terminal_variance: f64,
    /// Analytical mean at the horizon.
    pub analytical_terminal_mean: f64,
    /// Analytical variance at the horizon.
    pub analytical_terminal_variance: f64,
    /// Largest absolute mean error over the grid.
    pub max_mean_abs_error: f64,
    /// Largest relative variance error over the grid.
    pub max_variance_rel_error: f64,
    /// Whether the numerical degeneracy advisory was raised.
    pub degenerate: bool,
}

impl RunSummary {
    /// Summarises `outcome`.
    pub fn from_outcome(outcome: &SimulationOutcome) -> Self {
        let grid = outcome.ensemble.grid();
        let terminal = outcome.stats.terminal();
        let last = outcome.reference.len() - 1;

        Self {
            model: outcome.model_name.to_string(),
            mean_reversion: outcome.config.mean_reversion,
            volatility: outcome.config.volatility,
            forward_rate: outcome.config.forward_rate,
            horizon: grid.horizon(),
            n_steps: grid.n_steps(),
            n_paths: outcome.ensemble.n_paths(),
            seed: outcome.seed,
            execution: outcome.config.execution,
            discretisation: outcome.config.discretisation,
            transform: outcome.config.transform,
            evaluation_date: grid.evaluation_date(),
            terminal_mean: terminal.mean,
            terminal_variance: terminal.variance,
            analytical_terminal_mean: outcome.reference.means()[last],
            analytical_terminal_variance: outcome.reference.variances()[last],
            max_mean_abs_error: outcome.report.max_mean_abs_error(),
            max_variance_rel_error: outcome.report.max_variance_rel_error(),
            degenerate: outcome.stats.degeneracy().is_some(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes pretty-printed JSON to `writer`.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{run_simulation, SimulationConfig};
    use approx::assert_relative_eq;

    fn outcome() -> SimulationOutcome {
        let config = SimulationConfig::builder()
            .n_paths(50)
            .n_steps(24)
            .horizon(2.0)
            .seed(42)
            .build()
            .unwrap();
        run_simulation(&config).unwrap()
    }

    #[test]
    fn test_summary_fields() {
        let outcome = outcome();
        let summary = RunSummary::from_outcome(&outcome);

        assert_eq!(summary.model, "HullWhite1F-Euler");
        assert_eq!(summary.seed, 42);
        assert_eq!(summary.n_paths, 50);
        assert_eq!(summary.n_steps, 24);
        assert_eq!(summary.horizon, 2.0);
        assert_eq!(summary.terminal_variance, outcome.stats.terminal().variance);
        assert!(!summary.degenerate);
        assert_eq!(summary.evaluation_date, None);
    }

    #[test]
    fn test_json_output() {
        let summary = RunSummary::from_outcome(&outcome());

        let mut out = Vec::new();
        summary.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["seed"], 42);
        assert_eq!(value["execution"], "parallel");
        assert_eq!(value["discretisation"], "euler");
        assert_eq!(value["transform"], "inverse_cdf");
        assert!(value.get("evaluation_date").is_none());

        let parsed: RunSummary = serde_json::from_str(&summary.to_json_string().unwrap()).unwrap();
        assert_eq!(parsed.model, summary.model);
        assert_eq!(parsed.discretisation, summary.discretisation);
        assert_relative_eq!(parsed.terminal_mean, summary.terminal_mean, max_relative = 1e-15);
    }
}
