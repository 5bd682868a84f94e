//! Advisory progress reporting.

use log::info;

/// Emits a status line every `interval` rows.
///
/// Reporting goes through the logger and cannot fail, so it never affects
/// the import itself.
#[derive(Debug, Clone, Copy)]
pub struct ProgressReporter {
    interval: u64,
}

impl ProgressReporter {
    /// An interval of 0 disables reporting.
    pub fn new(interval: u64) -> Self {
        ProgressReporter { interval }
    }

    /// Called with the cumulative row count after each insert. Returns
    /// whether a report was emitted.
    pub fn observe(&self, count: u64) -> bool {
        if self.interval == 0 || count == 0 || count % self.interval != 0 {
            return false;
        }
        info!("Processed {} records...", count);
        true
    }
}
