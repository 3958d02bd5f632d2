//! Victim selection for entry allocation.

use super::table::TageTable;
use crate::common::constants::{ENTRIES_PER_TABLE, LRU_SEARCH_WIDTH};

/// Picks the entry to displace for an allocation near `preferred`.
///
/// Scans an 8-slot window at offsets -4..=+3 around the preferred index,
/// wrapped modulo the table size. Invalid slots win outright, then slots
/// whose useful bit is clear, then the oldest slot in the window. Within
/// each class the first slot in scan order wins, so the choice is fully
/// deterministic. Useful entries are collectively protected: the scan
/// never weighs one useful entry's age against another's while a
/// non-useful slot exists.
pub fn select_victim(table: &TageTable, preferred: usize) -> usize {
    let at = |off: i64| -> usize {
        (preferred as i64 + off).rem_euclid(ENTRIES_PER_TABLE as i64) as usize
    };

    let lo = -(LRU_SEARCH_WIDTH as i64 / 2);
    let hi = lo + LRU_SEARCH_WIDTH as i64;

    for off in lo..hi {
        let idx = at(off);
        if !table.presence(idx) {
            return idx;
        }
    }

    for off in lo..hi {
        let idx = at(off);
        if !table.entry(idx).useful {
            return idx;
        }
    }

    let mut victim = at(lo);
    let mut oldest = table.entry(victim).age;
    for off in (lo + 1)..hi {
        let idx = at(off);
        let age = table.entry(idx).age;
        if age > oldest {
            oldest = age;
            victim = idx;
        }
    }
    victim
}
