//! Simulation configuration management.
//!
//! Handles loading configuration from defaults, TOML files, environment
//! variables and the programmatic builder.
//!
//! Priority (highest to lowest):
//! 1. Builder calls
//! 2. Environment variables (`SHORTRATE_*`)
//! 3. Config file
//! 4. Default values

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shortrate_core::types::{ConfigurationError, Date, DayCountConvention, TimeGrid};
use shortrate_models::models::{Discretisation, HullWhiteModel, ProcessParameters};

use super::ensemble::PathEnsemble;
use super::simulator::ExecutionMode;
use crate::rng::GaussianTransform;

/// Number of paths.
pub const ENV_PATHS: &str = "SHORTRATE_PATHS";
/// Number of time steps.
pub const ENV_STEPS: &str = "SHORTRATE_STEPS";
/// Master seed.
pub const ENV_SEED: &str = "SHORTRATE_SEED";
/// Execution mode (`sequential` or `parallel`).
pub const ENV_EXECUTION: &str = "SHORTRATE_EXECUTION";
/// Log level.
pub const ENV_LOG_LEVEL: &str = "SHORTRATE_LOG_LEVEL";

/// Log levels supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-stream setup.
    Trace,
    /// Stream and estimator diagnostics.
    Debug,
    /// Run start and completion.
    #[default]
    Info,
    /// Degeneracy advisories only.
    Warn,
    /// Errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            )),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Complete description of one simulation run.
///
/// # Examples
///
/// ```rust
/// use shortrate_mc::mc::{ExecutionMode, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .n_paths(10_000)
///     .n_steps(360)
///     .seed(42)
///     .execution(ExecutionMode::Sequential)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths, 10_000);
/// assert_eq!(config.mean_reversion, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Mean reversion speed `a` (> 0).
    pub mean_reversion: f64,
    /// Volatility `sigma` (>= 0).
    pub volatility: f64,
    /// Flat initial forward rate `f0`.
    pub forward_rate: f64,
    /// Horizon `T` in years (> 0). Ignored when `end_date` is set.
    pub horizon: f64,
    /// Number of time steps `n` (>= 1).
    pub n_steps: usize,
    /// Number of paths `M` (>= 1).
    pub n_paths: usize,
    /// Master seed; drawn from OS entropy when absent.
    pub seed: Option<u64>,
    /// Sequential or parallel path generation.
    pub execution: ExecutionMode,
    /// Euler or exact stepping.
    pub discretisation: Discretisation,
    /// Uniform-to-Gaussian transform.
    pub transform: GaussianTransform,
    /// Date that `t = 0` refers to.
    pub evaluation_date: Option<Date>,
    /// Horizon end date; requires `evaluation_date`.
    pub end_date: Option<Date>,
    /// Day count measuring the horizon between the two dates.
    pub day_count: DayCountConvention,
    /// Log level for [`crate::telemetry::init_tracing`].
    pub log_level: LogLevel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mean_reversion: 0.1,
            volatility: 0.015,
            forward_rate: 0.05,
            horizon: 30.0,
            n_steps: 360,
            n_paths: 1000,
            seed: None,
            execution: ExecutionMode::default(),
            discretisation: Discretisation::default(),
            transform: GaussianTransform::default(),
            evaluation_date: None,
            end_date: None,
            day_count: DayCountConvention::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl SimulationConfig {
    /// Creates a new builder starting from the defaults.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        let config: SimulationConfig = toml::from_str(content)
            .map_err(|e| ConfigurationError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Overrides fields from `SHORTRATE_*` environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigurationError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Overrides fields from variables returned by `lookup`.
    ///
    /// Unset variables leave the field unchanged; unparseable values are
    /// `ConfigurationError::EnvError`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: FromStr>(var: &str, value: String) -> Result<T, ConfigurationError> {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|_| ConfigurationError::EnvError {
                var: var.to_string(),
                value,
            })
        }

        if let Some(value) = lookup(ENV_PATHS) {
            self.n_paths = parse(ENV_PATHS, value)?;
        }
        if let Some(value) = lookup(ENV_STEPS) {
            self.n_steps = parse(ENV_STEPS, value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.seed = Some(parse(ENV_SEED, value)?);
        }
        if let Some(value) = lookup(ENV_EXECUTION) {
            self.execution = parse(ENV_EXECUTION, value)?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = parse(ENV_LOG_LEVEL, value)?;
        }
        Ok(())
    }

    /// Builds configuration from all sources: file (if any), then
    /// environment, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - `n_paths` or `n_steps` is 0
    /// - the process parameters are outside their domain
    /// - the horizon (or date range) is not positive
    /// - the ensemble would not fit in memory
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.n_paths == 0 {
            return Err(ConfigurationError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 {
            return Err(ConfigurationError::InvalidStepCount(self.n_steps));
        }
        self.process_parameters()?;
        let grid = self.time_grid()?;
        PathEnsemble::required_len(self.n_paths, grid.len())?;
        Ok(())
    }

    /// Validated process parameters.
    pub fn process_parameters(&self) -> Result<ProcessParameters, ConfigurationError> {
        ProcessParameters::new(self.mean_reversion, self.volatility, self.forward_rate)
    }

    /// Model with the configured discretisation.
    pub fn model(&self) -> Result<HullWhiteModel, ConfigurationError> {
        Ok(HullWhiteModel::new(
            self.process_parameters()?,
            self.discretisation,
        ))
    }

    /// Time grid, anchored when an evaluation date is configured.
    pub fn time_grid(&self) -> Result<TimeGrid, ConfigurationError> {
        match (self.evaluation_date, self.end_date) {
            (Some(evaluation_date), Some(end_date)) => {
                TimeGrid::between(evaluation_date, end_date, self.n_steps, self.day_count)
            }
            (Some(evaluation_date), None) => {
                TimeGrid::anchored(evaluation_date, self.horizon, self.n_steps)
            }
            (None, None) => TimeGrid::uniform(self.horizon, self.n_steps),
            (None, Some(_)) => Err(ConfigurationError::invalid(
                "end_date",
                "an end date requires an evaluation date",
            )),
        }
    }
}

/// Builder for [`SimulationConfig`].
///
/// Starts from [`SimulationConfig::default`] and validates at build time.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    /// Starts from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Sets the mean reversion speed `a`.
    pub fn mean_reversion(mut self, a: f64) -> Self {
        self.config.mean_reversion = a;
        self
    }

    /// Sets the volatility `sigma`.
    pub fn volatility(mut self, sigma: f64) -> Self {
        self.config.volatility = sigma;
        self
    }

    /// Sets the flat forward rate `f0`.
    pub fn forward_rate(mut self, f0: f64) -> Self {
        self.config.forward_rate = f0;
        self
    }

    /// Sets the horizon in years.
    pub fn horizon(mut self, horizon: f64) -> Self {
        self.config.horizon = horizon;
        self
    }

    /// Sets the number of time steps.
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.config.n_steps = n_steps;
        self
    }

    /// Sets the number of paths.
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.config.n_paths = n_paths;
        self
    }

    /// Sets the master seed for reproducibility.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets the execution mode.
    pub fn execution(mut self, mode: ExecutionMode) -> Self {
        self.config.execution = mode;
        self
    }

    /// Sets the discretisation scheme.
    pub fn discretisation(mut self, scheme: Discretisation) -> Self {
        self.config.discretisation = scheme;
        self
    }

    /// Sets the Gaussian transform.
    pub fn transform(mut self, transform: GaussianTransform) -> Self {
        self.config.transform = transform;
        self
    }

    /// Anchors the grid at `date`.
    pub fn evaluation_date(mut self, date: Date) -> Self {
        self.config.evaluation_date = Some(date);
        self
    }

    /// Ends the grid at `date`, measured with `day_count`.
    pub fn end_date(mut self, date: Date, day_count: DayCountConvention) -> Self {
        self.config.end_date = Some(date);
        self.config.day_count = day_count;
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<SimulationConfig, ConfigurationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
