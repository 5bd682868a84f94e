//! Resolves the input file and output directory before the destination is touched.

use crate::config::ImportConfig;
use crate::error::{ImportError, Result};
use log::info;
use std::fs::{self, File};

/// Ensures the output directory exists and opens the input file.
///
/// The directory is created (with intermediate segments) when absent. A
/// missing input file fails with `ImportError::MissingInput`, an unreadable
/// one with `ImportError::Io`; the destination database is never touched in
/// either case.
pub fn locate_sources(config: &ImportConfig) -> Result<File> {
    if !config.output_dir.exists() {
        fs::create_dir_all(&config.output_dir)?;
        info!("Created directory: {}", config.output_dir.display());
    }

    if !config.input_path.is_file() {
        return Err(ImportError::MissingInput {
            path: config.input_path.clone(),
            dir: config.output_dir.clone(),
        });
    }

    let input = File::open(&config.input_path)?;
    info!("Reading CSV file: {}", config.input_path.display());
    Ok(input)
}
