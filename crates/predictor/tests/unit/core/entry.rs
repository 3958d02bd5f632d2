use rstest::rstest;
use tagecore::common::constants::{MAX_COUNTER, NEUTRAL_COUNTER};
use tagecore::core::entry::TageEntry;

#[test]
fn test_default_entry_is_zeroed() {
    let e = TageEntry::default();
    assert_eq!(e.tag, 0);
    assert_eq!(e.ctr, 0);
    assert_eq!(e.ctx, 0);
    assert!(!e.useful);
    assert!(!e.taken);
    assert_eq!(e.age, 0);
}

#[test]
fn test_neutral_entry_sits_on_threshold() {
    let e = TageEntry::neutral();
    assert_eq!(e.ctr, NEUTRAL_COUNTER);
    assert!(e.predict_taken());
}

#[rstest]
#[case(0, false)]
#[case(3, false)]
#[case(4, true)]
#[case(7, true)]
fn test_predict_threshold(#[case] ctr: u8, #[case] taken: bool) {
    let e = TageEntry {
        ctr,
        ..TageEntry::default()
    };
    assert_eq!(e.predict_taken(), taken);
}

#[rstest]
#[case(4, true, 5)]
#[case(4, false, 3)]
#[case(5, true, 6)]
#[case(2, false, 1)]
// Reinforcing a near-saturated counter steps by 2.
#[case(6, true, 7)]
#[case(7, true, 7)]
#[case(1, false, 0)]
#[case(0, false, 0)]
// Opposing a near-saturated counter still steps by 1.
#[case(6, false, 5)]
#[case(1, true, 2)]
fn test_counter_hysteresis(#[case] ctr: u8, #[case] taken: bool, #[case] expect: u8) {
    let mut e = TageEntry {
        ctr,
        ..TageEntry::default()
    };
    e.adjust_counter(taken);
    assert_eq!(e.ctr, expect);
}

#[test]
fn test_packed_word_fits_twenty_four_bits() {
    let e = TageEntry {
        tag: 0x1FFF,
        ctr: 7,
        ctx: 7,
        useful: true,
        taken: true,
        age: 7,
    };
    assert_eq!(e.to_bits(), 0xFF_FFFF);
    assert_eq!(TageEntry::default().to_bits(), 0);
}

#[test]
fn test_packed_word_roundtrip() {
    let e = TageEntry {
        tag: 0x0A5A,
        ctr: 5,
        ctx: 3,
        useful: true,
        taken: false,
        age: 2,
    };
    assert_eq!(TageEntry::from_bits(e.to_bits()), e);
}

#[test]
fn test_unpack_ignores_high_bits() {
    let e = TageEntry::from_bits(0xFF00_0001);
    assert_eq!(e.tag, 1);
    assert_eq!(e.age, 0);
}

#[test]
fn test_counter_saturates_under_training_runs() {
    let mut e = TageEntry::neutral();
    for _ in 0..20 {
        e.adjust_counter(true);
    }
    assert_eq!(e.ctr, MAX_COUNTER);

    for _ in 0..20 {
        e.adjust_counter(false);
    }
    assert_eq!(e.ctr, 0);
}
