//! Write comparison JSON files.
//!
//! A comparison JSON is the portable record of one OMP vs look-ahead run:
//! problem shape, seed, search options, both residue traces and the visited
//! supports. External plotting tools consume it to draw figures.
//!
//! The schema is defined by `domain::Comparison`.

use std::fs::File;
use std::path::Path;

use crate::domain::Comparison;
use crate::error::AppError;

/// Write a comparison JSON file.
pub fn write_comparison_json(path: &Path, comparison: &Comparison) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create comparison JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, comparison)
        .map_err(|e| AppError::new(2, format!("Failed to write comparison JSON: {e}")))?;

    Ok(())
}
