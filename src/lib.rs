//! # Zipcode Import
//!
//! Converts the Japan Post postal-code CSV (`utf_ken_all.csv`) into a SQLite
//! database with a single indexed `postal_codes` table.
//!
//! ## Design Principles
//!
//! - **Streaming processing**: records are decoded and inserted one at a time
//! - **All-or-nothing**: one transaction per import, rolled back on failure
//! - **Prepared statement reuse**: the insert is compiled once per run
//! - **Full replace**: the database is recreated on every run
//!
//! ## Example
//!
//! ```no_run
//! use zipcode_import::{run_import, ImportConfig};
//!
//! let summary = run_import(ImportConfig::from_data_dir("data")).unwrap();
//! println!("imported {} rows into {}", summary.rows, summary.db_path.display());
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod locator;
pub mod parser;
pub mod pipeline;
pub mod postal_code;
pub mod progress;
pub mod sink;

pub use config::ImportConfig;
pub use error::{ImportError, Result, SinkCause};
pub use loader::BulkLoader;
pub use parser::RecordStream;
pub use pipeline::{run_import, ImportSummary, Importer, PipelineState};
pub use postal_code::PostalCode;
pub use progress::ProgressReporter;
