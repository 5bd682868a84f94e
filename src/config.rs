//! Import configuration.

use std::path::{Path, PathBuf};

/// File name of the Japan Post "all regions" CSV (UTF-8 edition).
pub const INPUT_FILE_NAME: &str = "utf_ken_all.csv";

/// File name of the generated database.
pub const DB_FILE_NAME: &str = "zipcode.db";

/// Rows between two progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// Locations and knobs for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Source CSV file
    pub input_path: PathBuf,

    /// Directory that must exist before the database is created
    pub output_dir: PathBuf,

    /// Destination database file, recreated on every run
    pub db_path: PathBuf,

    /// Emit a progress line every this many rows; 0 disables reporting
    pub progress_interval: u64,
}

impl ImportConfig {
    /// Standard layout: both the CSV and the database live in `data_dir`.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        ImportConfig {
            input_path: data_dir.join(INPUT_FILE_NAME),
            output_dir: data_dir.to_path_buf(),
            db_path: data_dir.join(DB_FILE_NAME),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Overrides the database path. The output directory follows the
    /// database's parent so the sink can always be created.
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.output_dir = parent.to_path_buf();
        }
        self.db_path = path;
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::from_data_dir("data")
    }
}
