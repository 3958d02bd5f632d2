//! Shared types and constants for the predictor model.

pub mod constants;

use self::constants::MAX_COUNTER;

/// Source and strength of a prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Confidence {
    /// Base-table fallback; no history component matched.
    Low = 0,
    /// History hit with a counter in the uncertain middle of the range.
    Medium = 1,
    /// History hit with a counter at or near saturation.
    High = 2,
}

impl Confidence {
    /// Confidence of a history-table hit with the given counter value.
    pub(crate) fn of_history_hit(ctr: u8) -> Self {
        if ctr <= 1 || ctr >= MAX_COUNTER - 1 {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }
}

/// A direction prediction together with its confidence level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// Predicted direction: `true` for taken.
    pub taken: bool,
    /// How much the host should trust the direction bit.
    pub confidence: Confidence,
}
