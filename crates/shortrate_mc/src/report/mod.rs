//! Report writers.
//!
//! Writers take caller-supplied `std::io::Write` sinks; nothing here opens
//! files on its own.

pub mod error;
pub mod summary;
pub mod tables;

pub use error::ReportError;
pub use summary::RunSummary;
pub use tables::{write_ensemble_csv, write_stats_csv};
