//! The import pipeline.
//!
//! Runs the stages in order over a single connection:
//!
//! ```text
//! Idle -> Validating -> SchemaReady -> Streaming -> Committing -> Closed
//!             |                            |
//!             +---------> Aborted <--------+
//! ```
//!
//! Any failure is terminal. There are no retries.

use crate::config::ImportConfig;
use crate::error::Result;
use crate::loader::BulkLoader;
use crate::locator::locate_sources;
use crate::parser::RecordStream;
use crate::postal_code::PostalCode;
use crate::progress::ProgressReporter;
use crate::sink::prepare_sink;
use log::{debug, error, info};
use std::io::BufReader;
use std::path::PathBuf;

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Validating,
    SchemaReady,
    Streaming,
    Committing,
    Closed,
    Aborted,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Closed | PipelineState::Aborted)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows committed to `postal_codes`
    pub rows: u64,

    /// Database file written
    pub db_path: PathBuf,
}

/// One-shot importer for a single configuration.
pub struct Importer {
    config: ImportConfig,
    state: PipelineState,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Importer {
            config,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs the whole import. On error the state is `Aborted` and nothing
    /// has been committed.
    pub fn run(&mut self) -> Result<ImportSummary> {
        let result = self.execute();
        if result.is_err() {
            self.transition(PipelineState::Aborted);
        }
        result
    }

    fn execute(&mut self) -> Result<ImportSummary> {
        self.transition(PipelineState::Validating);
        let input = locate_sources(&self.config)?;

        let mut conn = prepare_sink(&self.config.db_path)?;
        self.transition(PipelineState::SchemaReady);

        let records = RecordStream::new(BufReader::new(input));
        let rows = records.map(|record| record.map(|r| PostalCode::from_record(&r)));
        let progress = ProgressReporter::new(self.config.progress_interval);

        self.transition(PipelineState::Streaming);
        let mut loader = BulkLoader::begin(&mut conn)?;
        if let Err(e) = loader.load(rows, &progress) {
            return Err(loader.abort(e));
        }

        self.transition(PipelineState::Committing);
        let committed = loader.commit()?;
        info!("Successfully imported {} records.", committed);

        match conn.close() {
            Ok(()) => info!("Database connection closed."),
            Err((_, e)) => error!("Error closing database: {}", e),
        }
        self.transition(PipelineState::Closed);

        Ok(ImportSummary {
            rows: committed,
            db_path: self.config.db_path.clone(),
        })
    }

    fn transition(&mut self, next: PipelineState) {
        debug!("Pipeline state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Convenience wrapper: builds an [`Importer`] and runs it.
pub fn run_import(config: ImportConfig) -> Result<ImportSummary> {
    Importer::new(config).run()
}
