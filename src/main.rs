//! Zipcode Import CLI
//!
//! Reads `utf_ken_all.csv` and writes `zipcode.db`, both under the data
//! directory by default.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --data-dir data
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity (default `info`)

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process;
use zipcode_import::config::DEFAULT_PROGRESS_INTERVAL;
use zipcode_import::{ImportConfig, Importer};

#[derive(Parser, Debug)]
#[command(name = "zipcode-import", version, about)]
struct Cli {
    /// Directory holding utf_ken_all.csv and the generated zipcode.db
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Input CSV, overriding <DATA_DIR>/utf_ken_all.csv
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output database, overriding <DATA_DIR>/zipcode.db
    #[arg(long)]
    db: Option<PathBuf>,

    /// Report progress every N rows (0 disables)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_every: u64,
}

impl Cli {
    fn into_config(self) -> ImportConfig {
        let mut config =
            ImportConfig::from_data_dir(&self.data_dir).with_progress_interval(self.progress_every);
        if let Some(input) = self.input {
            config = config.with_input_path(input);
        }
        if let Some(db) = self.db {
            config = config.with_db_path(db);
        }
        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();

    info!("Starting the import process...");
    let mut importer = Importer::new(config);
    match importer.run() {
        Ok(summary) => {
            info!("Process finished.");
            println!(
                "Imported {} records into {}",
                summary.rows,
                summary.db_path.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
