//! Correct-prediction training: counter reinforcement, history shifting,
//! and the scoreboard fast path.

use crate::common::{train_mispredicts, train_updates};
use tagecore::core::hash::hash_index;
use tagecore::{Confidence, TagePredictor};

#[test]
fn test_always_taken_learning() {
    let mut p = TagePredictor::new();
    train_updates(&mut p, 0xC0000, 0, true, 20);

    let pred = p.predict(0xC0000, 0);
    assert!(pred.taken);

    let base_idx = hash_index(0xC0000, 0, 0, 0);
    assert_eq!(p.table(0).entry(base_idx).ctr, 7);
}

#[test]
fn test_history_shift_pattern() {
    let mut p = TagePredictor::new();
    p.update(0xA000, 0, true);
    p.update(0xA000, 0, false);
    p.update(0xA000, 0, true);

    assert_eq!(p.history(0), 0b101);
}

#[test]
fn test_update_never_allocates() {
    let mut p = TagePredictor::new();
    train_updates(&mut p, 0xBEEF_0000, 2, true, 50);

    for t in 1..8 {
        assert_eq!(p.table(t).valid_count(), 0);
    }
    assert_eq!(p.mispredict_count(), 0);
}

#[test]
fn test_saturated_counter_is_stable() {
    let mut p = TagePredictor::new();
    let base_idx = hash_index(0x7000, 0, 0, 0);

    train_updates(&mut p, 0x7000, 0, true, 10);
    assert_eq!(p.table(0).entry(base_idx).ctr, 7);

    // Further same-direction training is a no-op on the counter.
    p.update(0x7000, 0, true);
    assert_eq!(p.table(0).entry(base_idx).ctr, 7);
}

#[test]
fn test_update_reinforces_provider_via_scoreboard() {
    let mut p = TagePredictor::new();

    // Five mispredictions walk the allocation window onto the probe
    // index, producing a findable weak not-taken entry in table 1.
    train_mispredicts(&mut p, 0x3000, 0, false, 5);

    let pred = p.predict(0x3000, 0);
    assert!(!pred.taken);
    assert_eq!(pred.confidence, Confidence::Medium);

    // Correct predictions push the provider toward saturation and mark
    // it useful, protecting it from eviction.
    for _ in 0..4 {
        p.predict(0x3000, 0);
        p.update(0x3000, 0, false);
    }

    let idx = hash_index(0x3000, 0, 4, 1);
    let e = p.table(1).entry(idx);
    assert!(p.table(1).presence(idx));
    assert_eq!(e.ctr, 0);
    assert!(e.useful);
    assert!(!e.taken);

    let pred = p.predict(0x3000, 0);
    assert!(!pred.taken);
    assert_eq!(pred.confidence, Confidence::High);
}

#[test]
fn test_update_falls_back_to_search_without_predict() {
    let mut p = TagePredictor::new();
    train_mispredicts(&mut p, 0x3000, 0, false, 5);

    // No predict call in between: the scoreboard cannot match, so the
    // provider is found by the longest-first table search.
    p.update(0x3000, 0, false);

    let idx = hash_index(0x3000, 0, 4, 1);
    assert!(p.table(1).entry(idx).useful);
}

#[test]
fn test_stale_scoreboard_is_ignored() {
    let mut p = TagePredictor::new();
    train_mispredicts(&mut p, 0x3000, 0, false, 5);

    // Predict one branch, then train a different one; the stale slot must
    // not leak training into the wrong entry.
    p.predict(0x9000, 1);
    p.update(0x3000, 0, false);

    let idx = hash_index(0x3000, 0, 4, 1);
    assert!(p.table(1).entry(idx).useful);
}
