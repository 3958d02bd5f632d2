//! Periodic aging of history-table entries.

use super::table::TageTable;
use crate::common::constants::MAX_AGE;

/// Ages every valid entry of one history table.
///
/// Each entry's age saturates upward; once it reaches the upper half of
/// the age range the useful bit is cleared, so stale entries lose their
/// eviction protection. The base table is never passed through here.
pub fn age_table(table: &mut TageTable) {
    table.for_each_valid_mut(|e| {
        e.age = (e.age + 1).min(MAX_AGE);
        if e.age >= MAX_AGE / 2 {
            e.useful = false;
        }
    });
}
