//! Debug-only statistics scraping.
//!
//! A read-only observer of predictor state, mirroring what a verification
//! harness would scrape out of the RTL. Not part of the hardware contract.

use crate::common::constants::NUM_TABLES;
use serde::Serialize;

/// Occupancy and training statistics for one table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TableStats {
    /// Valid entries.
    pub valid: usize,
    /// Valid entries whose useful bit is set.
    pub useful: usize,
    /// Mean age over valid entries.
    pub avg_age: f64,
    /// Mean counter over valid entries.
    pub avg_counter: f64,
}

/// Snapshot of predictor state for debugging and analysis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictorStats {
    /// Mispredictions reported since construction or the last reset.
    pub mispredicts: u64,
    /// Per-table occupancy, base table first.
    pub tables: [TableStats; NUM_TABLES],
}

impl PredictorStats {
    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Prints a fixed-width occupancy report.
    pub fn print(&self) {
        println!("mispredicts: {}", self.mispredicts);
        println!("table  valid useful avg_age avg_ctr");
        for (t, s) in self.tables.iter().enumerate() {
            println!(
                "{:>5} {:>6} {:>6} {:>7.2} {:>7.2}",
                t, s.valid, s.useful, s.avg_age, s.avg_counter
            );
        }
    }
}
