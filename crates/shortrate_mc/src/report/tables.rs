//! CSV tables for ensembles and statistics.
//!
//! - Ensemble: a header row of grid times, then one row per path
//! - Statistics: `time,mean,variance`, optionally followed by
//!   `analytical_mean,analytical_variance`

use std::io::Write;

use shortrate_models::analytical::AnalyticalMoments;

use super::error::ReportError;
use crate::mc::{CrossSectionalStats, PathEnsemble};

/// Writes `ensemble` as CSV to `writer`.
///
/// # Examples
///
/// ```rust
/// use shortrate_core::types::TimeGrid;
/// use shortrate_mc::mc::PathEnsemble;
/// use shortrate_mc::report::write_ensemble_csv;
///
/// let grid = TimeGrid::uniform(1.0, 2).unwrap();
/// let ensemble = PathEnsemble::from_values(vec![0.05, 0.06, 0.07], 1, grid).unwrap();
///
/// let mut out = Vec::new();
/// write_ensemble_csv(&ensemble, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "0,0.5,1\n0.05,0.06,0.07\n");
/// ```
pub fn write_ensemble_csv<W: Write>(ensemble: &PathEnsemble, writer: W) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(ensemble.grid().times().iter().map(f64::to_string))?;
    for path in ensemble.paths() {
        csv.write_record(path.iter().map(f64::to_string))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes `stats` as CSV to `writer`, with analytical columns when
/// `reference` is given.
///
/// # Errors
///
/// `GridMismatch` if `reference` has a different number of points.
pub fn write_stats_csv<W: Write>(
    stats: &CrossSectionalStats,
    reference: Option<&AnalyticalMoments>,
    writer: W,
) -> Result<(), ReportError> {
    if let Some(reference) = reference {
        if reference.len() != stats.len() {
            return Err(ReportError::GridMismatch(format!(
                "{} statistics rows against {} reference rows",
                stats.len(),
                reference.len()
            )));
        }
    }

    let mut csv = csv::Writer::from_writer(writer);
    match reference {
        Some(_) => csv.write_record([
            "time",
            "mean",
            "variance",
            "analytical_mean",
            "analytical_variance",
        ])?,
        None => csv.write_record(["time", "mean", "variance"])?,
    }

    for (i, row) in stats.rows().enumerate() {
        let mut record = vec![
            row.time.to_string(),
            row.mean.to_string(),
            row.variance.to_string(),
        ];
        if let Some(reference) = reference {
            record.push(reference.means()[i].to_string());
            record.push(reference.variances()[i].to_string());
        }
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}
