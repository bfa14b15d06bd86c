//! # Monte Carlo Simulation of the Short Rate
//!
//! ## Components
//!
//! - [`PathGenerator`]: advances one path across the grid
//! - [`BatchSimulator`]: M independent paths into a [`PathEnsemble`]
//! - [`CrossSectionalStats`]: per-index mean and population variance
//! - [`ConvergenceReport`]: estimated against closed-form moments
//! - [`SimulationConfig`]: run configuration (defaults, TOML, env, builder)
//! - [`run_simulation`]: all of the above in one call
//!
//! ## Usage Example
//!
//! ```rust
//! use shortrate_mc::mc::{run_simulation, ExecutionMode, SimulationConfig};
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(1_000)
//!     .seed(42)
//!     .execution(ExecutionMode::Parallel)
//!     .build()
//!     .unwrap();
//!
//! let outcome = run_simulation(&config).unwrap();
//! let terminal = outcome.stats.terminal();
//! assert_eq!(terminal.time, 30.0);
//! assert!(terminal.variance > 0.0);
//! ```

pub mod compare;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod paths;
pub mod run;
pub mod simulator;
pub mod stats;

pub use compare::ConvergenceReport;
pub use config::{LogLevel, SimulationConfig, SimulationConfigBuilder};
pub use ensemble::PathEnsemble;
pub use error::SimulationError;
pub use paths::{PathGenerator, SamplePath};
pub use run::{run_simulation, SimulationOutcome};
pub use simulator::{BatchSimulator, ExecutionMode};
pub use stats::{CrossSectionalStats, NumericalDegeneracy, StatsRow};
