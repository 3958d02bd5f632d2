//! Synthesis-time geometry of the predictor.
//!
//! These values are the hardware contract shared between the reference
//! model and the eventual RTL: table shapes, field widths, and tuning
//! constants. None of them are runtime-configurable.

/// Number of predictor tables, including the base table (id 0).
pub const NUM_TABLES: usize = 8;

/// Entries per table; the index is 10 bits wide.
pub const ENTRIES_PER_TABLE: usize = 1024;

/// Mask for a 10-bit table index.
pub const INDEX_MASK: u64 = ENTRIES_PER_TABLE as u64 - 1;

/// Number of hardware contexts tracked for isolation.
pub const NUM_CONTEXTS: usize = 8;

/// Width of the per-entry tag in bits.
pub const TAG_WIDTH: u32 = 13;

/// Mask for a 13-bit tag.
pub const TAG_MASK: u64 = (1 << TAG_WIDTH) - 1;

/// Ceiling of the 3-bit saturating direction counter.
pub const MAX_COUNTER: u8 = 7;

/// Mid-scale counter value given to fresh base entries.
pub const NEUTRAL_COUNTER: u8 = 4;

/// Counter values at or above this threshold predict taken.
pub const TAKEN_THRESHOLD: u8 = 4;

/// Ceiling of the 3-bit age field.
pub const MAX_AGE: u8 = 7;

/// Geometric history length per table. Table 0 ignores history entirely.
pub const HISTORY_LENGTHS: [usize; NUM_TABLES] = [0, 4, 8, 12, 16, 24, 32, 64];

/// Mispredictions between aging sweeps.
pub const AGING_INTERVAL: u64 = 1024;

/// Size of the victim search window around the preferred index.
pub const LRU_SEARCH_WIDTH: usize = 8;

/// Inclusive lower bound of the weak counter band.
pub const ALLOC_WEAK_MIN: u8 = 2;

/// Inclusive upper bound of the weak counter band.
pub const ALLOC_WEAK_MAX: u8 = 5;

/// Golden-ratio-derived odd multiplier for history mixing.
pub const HASH_PRIME: u64 = 0x9E37_79B9_7F4A_7C15;

/// 64-bit words backing each table's valid bitmap.
pub const BITMAP_WORDS: usize = ENTRIES_PER_TABLE / 64;
