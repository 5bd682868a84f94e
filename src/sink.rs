//! Destination database preparation.
//!
//! The database is recreated from scratch on every run: any previous file is
//! removed, a new one is opened and the `postal_codes` table and its
//! `idx_zipcode` index are created before a single row is loaded.

use crate::error::{ImportError, Result, SinkCause};
use log::info;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Destination table name.
pub const TABLE_NAME: &str = "postal_codes";

const CREATE_TABLE_SQL: &str = "
    CREATE TABLE postal_codes (
        zipcode     TEXT NOT NULL,
        pref        TEXT NOT NULL,
        city        TEXT NOT NULL,
        town        TEXT NOT NULL,
        pref_kana   TEXT,
        city_kana   TEXT,
        town_kana   TEXT
    )";

// Non-unique: several town segments share one postal code.
const CREATE_INDEX_SQL: &str = "CREATE INDEX idx_zipcode ON postal_codes (zipcode)";

/// Removes any prior database at `db_path`, opens a fresh one and creates the
/// schema.
pub fn prepare_sink(db_path: &Path) -> Result<Connection> {
    let sink_err = |cause: SinkCause| ImportError::SinkOpen {
        path: db_path.to_path_buf(),
        source: cause,
    };

    if db_path.exists() {
        fs::remove_file(db_path).map_err(|e| sink_err(e.into()))?;
        info!("Removed existing database file: {}", db_path.display());
    }

    let conn = Connection::open(db_path).map_err(|e| sink_err(e.into()))?;
    info!("Successfully connected to database: {}", db_path.display());

    info!("Creating table `{}`...", TABLE_NAME);
    conn.execute_batch(CREATE_TABLE_SQL)
        .map_err(|e| sink_err(e.into()))?;

    info!("Creating index on `zipcode` column...");
    conn.execute_batch(CREATE_INDEX_SQL)
        .map_err(|e| sink_err(e.into()))?;

    Ok(conn)
}

/// Counts the rows currently in `postal_codes`.
#[cfg(test)]
pub(crate) fn count_rows(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM postal_codes", [], |row| row.get(0))?;
    Ok(count as u64)
}
