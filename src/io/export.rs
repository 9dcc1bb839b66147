//! Export sweep results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or plotting scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::SweepPoint;
use crate::error::AppError;

/// Write one CSV row per sweep point.
pub fn write_sweep_csv(path: &Path, points: &[SweepPoint]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_sweep_rows(&mut file, points)
}

fn write_sweep_rows<W: Write>(out: &mut W, points: &[SweepPoint]) -> Result<(), AppError> {
    writeln!(out, "estimator,n,m,sparsity,trials,successes,non_converged,probability")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in points {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{:.6}",
            p.estimator, p.n, p.m, p.sparsity, p.trials, p.successes, p.non_converged, p.probability,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
