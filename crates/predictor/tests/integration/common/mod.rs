//! Shared helpers for end-to-end predictor tests.

use tagecore::TagePredictor;

/// Reports a run of identical outcomes through the correct-prediction path.
pub fn train_updates(p: &mut TagePredictor, pc: u64, ctx: u8, taken: bool, n: usize) {
    for _ in 0..n {
        p.update(pc, ctx, taken);
    }
}

/// Reports a run of identical outcomes through the misprediction path.
pub fn train_mispredicts(p: &mut TagePredictor, pc: u64, ctx: u8, taken: bool, n: usize) {
    for _ in 0..n {
        p.on_mispredict(pc, ctx, taken);
    }
}
