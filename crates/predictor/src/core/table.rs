use super::entry::TageEntry;
use crate::common::constants::{BITMAP_WORDS, ENTRIES_PER_TABLE};

/// One predictor table: 1024 entries, a 1024-bit valid bitmap, and the
/// history length the table is indexed with.
///
/// The bitmap is the authority on entry liveness. Fields of an entry whose
/// valid bit is clear are unobservable; callers consult `presence` before
/// `entry`, except for the base table where every bit stays set for the
/// lifetime of the predictor.
pub struct TageTable {
    entries: Vec<TageEntry>,
    valid: [u64; BITMAP_WORDS],
    history_len: usize,
}

impl TageTable {
    /// Creates an empty history table indexed with `history_len` bits.
    pub fn new(history_len: usize) -> Self {
        Self {
            entries: vec![TageEntry::default(); ENTRIES_PER_TABLE],
            valid: [0; BITMAP_WORDS],
            history_len,
        }
    }

    /// Creates the base table: history-independent and permanently valid,
    /// every counter at mid-scale.
    pub fn new_base() -> Self {
        Self {
            entries: vec![TageEntry::neutral(); ENTRIES_PER_TABLE],
            valid: [u64::MAX; BITMAP_WORDS],
            history_len: 0,
        }
    }

    /// History length this table is indexed with.
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Reads bit `idx` of the valid bitmap.
    pub fn presence(&self, idx: usize) -> bool {
        self.valid[idx / 64] >> (idx % 64) & 1 != 0
    }

    /// Sets bit `idx` of the valid bitmap.
    pub fn mark_valid(&mut self, idx: usize) {
        self.valid[idx / 64] |= 1 << (idx % 64);
    }

    /// Clears bit `idx` of the valid bitmap.
    pub fn mark_invalid(&mut self, idx: usize) {
        self.valid[idx / 64] &= !(1 << (idx % 64));
    }

    /// Reads the backing storage at `idx`.
    pub fn entry(&self, idx: usize) -> &TageEntry {
        &self.entries[idx]
    }

    /// Mutable access to the backing storage at `idx`.
    pub fn entry_mut(&mut self, idx: usize) -> &mut TageEntry {
        &mut self.entries[idx]
    }

    /// Clears the whole bitmap a word at a time.
    pub fn invalidate_all(&mut self) {
        self.valid = [0; BITMAP_WORDS];
    }

    /// Number of valid entries.
    pub fn valid_count(&self) -> usize {
        self.valid.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterates the indices of all valid entries, extracting set bits with
    /// trailing-zeros so invalid regions are skipped a word at a time.
    pub fn valid_indices(&self) -> ValidIndices<'_> {
        ValidIndices {
            valid: &self.valid,
            word_idx: 0,
            word: self.valid[0],
        }
    }

    /// Visits every valid entry mutably, in ascending index order.
    pub fn for_each_valid_mut(&mut self, mut f: impl FnMut(&mut TageEntry)) {
        for w in 0..BITMAP_WORDS {
            let mut word = self.valid[w];
            while word != 0 {
                let bit = word.trailing_zeros() as usize;
                word &= word - 1;
                f(&mut self.entries[w * 64 + bit]);
            }
        }
    }
}

/// Iterator over the set bits of a table's valid bitmap.
pub struct ValidIndices<'a> {
    valid: &'a [u64; BITMAP_WORDS],
    word_idx: usize,
    word: u64,
}

impl Iterator for ValidIndices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.word == 0 {
            self.word_idx += 1;
            if self.word_idx >= BITMAP_WORDS {
                return None;
            }
            self.word = self.valid[self.word_idx];
        }
        let bit = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(self.word_idx * 64 + bit)
    }
}
