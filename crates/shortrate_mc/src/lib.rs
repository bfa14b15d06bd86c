//! # shortrate_mc: Monte Carlo Engine for the Hull-White Short Rate
//!
//! ## Layer 3 Role
//!
//! shortrate_mc builds on `shortrate_core` and `shortrate_models` and provides:
//! - Seeded Gaussian streams partitioned by path index (`rng`)
//! - Path generation, batch simulation and cross-sectional estimation (`mc`)
//! - Comparison against the closed-form moments (`mc::compare`)
//! - Configuration from defaults, TOML and `SHORTRATE_*` variables (`mc::config`)
//! - CSV and JSON reports (`report`)
//! - Tracing subscriber setup (`telemetry`)
//!
//! ## Quick Start
//!
//! ```rust
//! use shortrate_mc::mc::{run_simulation, SimulationConfig};
//! use shortrate_mc::report::{write_stats_csv, RunSummary};
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(200)
//!     .n_steps(120)
//!     .horizon(10.0)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let outcome = run_simulation(&config).unwrap();
//!
//! let mut table = Vec::new();
//! write_stats_csv(&outcome.stats, Some(&outcome.reference), &mut table).unwrap();
//!
//! let summary = RunSummary::from_outcome(&outcome);
//! assert_eq!(summary.n_paths, 200);
//! ```
//!
//! ## Reproducibility
//!
//! A master seed fixes every path. Stream `m` is seeded from
//! `(master_seed, m)` alone, so sequential and parallel runs are
//! bit-identical.

#![warn(missing_docs)]

pub mod mc;
pub mod report;
pub mod rng;
pub mod telemetry;
