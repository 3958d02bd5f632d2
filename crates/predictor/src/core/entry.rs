use crate::common::constants::{MAX_COUNTER, NEUTRAL_COUNTER, TAKEN_THRESHOLD};

// Bit layout of the packed 24-bit storage word:
// [23-21]: age (3 bits)
// [20]:    last observed direction (1 bit)
// [19]:    useful (1 bit)
// [18-16]: context (3 bits)
// [15-13]: counter (3 bits)
// [12-0]:  tag (13 bits)
const CTR_SHIFT: u32 = 13;
const CTX_SHIFT: u32 = 16;
const USEFUL_SHIFT: u32 = 19;
const TAKEN_SHIFT: u32 = 20;
const AGE_SHIFT: u32 = 21;

const TAG_FIELD: u32 = (1 << 13) - 1;
const THREE_BIT: u32 = 0x7;

/// A single predictor table entry.
///
/// Packs into 24 bits of storage in hardware: 13-bit tag, 3-bit counter,
/// 3-bit context, useful bit, last-direction bit, 3-bit age.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TageEntry {
    /// Tag matched against the PC hash.
    pub tag: u16,
    /// 3-bit saturating direction counter.
    pub ctr: u8,
    /// Hardware context that owns this entry.
    pub ctx: u8,
    /// Set when the entry recently provided a correct prediction.
    pub useful: bool,
    /// Direction observed at the last training event.
    pub taken: bool,
    /// 3-bit age, advanced by the aging sweep.
    pub age: u8,
}

impl TageEntry {
    /// Fresh base-table entry: mid-scale counter, everything else zero.
    pub fn neutral() -> Self {
        Self {
            ctr: NEUTRAL_COUNTER,
            ..Self::default()
        }
    }

    /// Direction this entry's counter predicts.
    pub fn predict_taken(&self) -> bool {
        self.ctr >= TAKEN_THRESHOLD
    }

    /// Packs the entry into its 24-bit hardware storage word.
    ///
    /// The packed form is what an RTL trace dump carries; round-tripping
    /// through it is lossless for any in-range entry.
    pub fn to_bits(&self) -> u32 {
        u32::from(self.tag)
            | u32::from(self.ctr) << CTR_SHIFT
            | u32::from(self.ctx) << CTX_SHIFT
            | u32::from(self.useful) << USEFUL_SHIFT
            | u32::from(self.taken) << TAKEN_SHIFT
            | u32::from(self.age) << AGE_SHIFT
    }

    /// Unpacks an entry from its 24-bit hardware storage word. Bits above
    /// 23 are ignored.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            tag: (bits & TAG_FIELD) as u16,
            ctr: (bits >> CTR_SHIFT & THREE_BIT) as u8,
            ctx: (bits >> CTX_SHIFT & THREE_BIT) as u8,
            useful: bits >> USEFUL_SHIFT & 1 != 0,
            taken: bits >> TAKEN_SHIFT & 1 != 0,
            age: (bits >> AGE_SHIFT & THREE_BIT) as u8,
        }
    }

    /// Steps the saturating counter toward `taken`.
    ///
    /// The step widens to 2 when reinforcing a counter already at 6..7
    /// (or 0..1 for not-taken), which accelerates saturation for strong
    /// predictions without destabilising the uncertain middle.
    pub fn adjust_counter(&mut self, taken: bool) {
        let delta = if (taken && self.ctr >= MAX_COUNTER - 1) || (!taken && self.ctr <= 1) {
            2
        } else {
            1
        };
        self.ctr = if taken {
            (self.ctr + delta).min(MAX_COUNTER)
        } else {
            self.ctr.saturating_sub(delta)
        };
    }
}
