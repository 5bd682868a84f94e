//! Transactional bulk loading.
//!
//! All rows of one import go through a single transaction and a single
//! prepared insert statement. The transaction is either committed once the
//! input is exhausted or rolled back on the first failure.

use crate::error::{ImportError, Result};
use crate::postal_code::PostalCode;
use crate::progress::ProgressReporter;
use log::{debug, warn};
use rusqlite::{params, Connection, Transaction};

const INSERT_SQL: &str = "
    INSERT INTO postal_codes (zipcode, pref, city, town, pref_kana, city_kana, town_kana)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// An open import transaction.
pub struct BulkLoader<'conn> {
    tx: Transaction<'conn>,
    inserted: u64,
}

impl<'conn> BulkLoader<'conn> {
    /// Begins the transaction that scopes the whole import.
    pub fn begin(conn: &'conn mut Connection) -> Result<Self> {
        let tx = conn.transaction()?;
        debug!("Transaction started");
        Ok(BulkLoader { tx, inserted: 0 })
    }

    /// Rows inserted so far in this transaction.
    #[cfg(test)]
    pub(crate) fn inserted(&self) -> u64 {
        self.inserted
    }

    /// Inserts every row of `rows` with one prepared statement.
    ///
    /// Stops at the first error, which is returned as-is; the caller decides
    /// between [`commit`](Self::commit) and [`abort`](Self::abort).
    pub fn load<I>(&mut self, rows: I, progress: &ProgressReporter) -> Result<u64>
    where
        I: IntoIterator<Item = Result<PostalCode>>,
    {
        let mut stmt = self.tx.prepare(INSERT_SQL)?;

        for row in rows {
            let row = row?;
            stmt.execute(params![
                row.zipcode,
                row.pref,
                row.city,
                row.town,
                row.pref_kana,
                row.city_kana,
                row.town_kana,
            ])?;
            self.inserted += 1;
            progress.observe(self.inserted);
        }

        stmt.finalize()?;
        Ok(self.inserted)
    }

    /// Commits the transaction and returns the number of rows committed.
    pub fn commit(self) -> Result<u64> {
        let rows = self.inserted;
        self.tx.commit().map_err(|e| ImportError::LoadAborted {
            rows,
            source: Box::new(ImportError::Database(e)),
        })?;
        Ok(rows)
    }

    /// Rolls the transaction back and wraps `cause` as `LoadAborted`.
    pub fn abort(self, cause: ImportError) -> ImportError {
        let rows = self.inserted;
        if let Err(e) = self.tx.rollback() {
            warn!("Rollback failed: {}", e);
        }
        ImportError::LoadAborted {
            rows,
            source: Box::new(cause),
        }
    }
}
