// Seeded generator sequence and helpers.

use bonsai_core::*;

/// Recover the 32-bit generator state from a unit-interval draw.
fn raw_state(v: f64) -> u32 {
    (v * 4_294_967_296.0) as u32
}

#[test]
fn lcg_sequence_matches_reference_values() {
    let mut rng = SeededRandom::new(0);
    let expected = [
        (1_013_904_223u32, 0.236_067_972_844_466_57),
        (1_196_435_762, 0.278_566_908_556_968),
        (3_519_870_697, 0.819_533_759_960_904_7),
    ];
    for (state, value) in expected {
        let v = rng.next();
        assert_eq!(raw_state(v), state);
        assert!((v - value).abs() < 1e-15, "expected {value}, got {v}");
    }
}

#[test]
fn seed_42_first_draw() {
    let mut rng = SeededRandom::new(42);
    let v = rng.next();
    assert_eq!(raw_state(v), 1_083_814_273);
    assert!((v - 0.252_345_174_783_840_8).abs() < 1e-15);
}

#[test]
fn next_stays_in_unit_interval() {
    let mut rng = SeededRandom::new(0xDEAD_BEEF);
    for _ in 0..10_000 {
        let v = rng.next();
        assert!((0.0..1.0).contains(&v), "out of range: {v}");
    }
}

#[test]
fn same_seed_same_sequence() {
    let mut a = SeededRandom::new(1234);
    let mut b = SeededRandom::new(1234);
    for _ in 0..256 {
        assert_eq!(a.next().to_bits(), b.next().to_bits());
    }
}

#[test]
fn range_respects_bounds() {
    let mut rng = SeededRandom::new(7);
    for _ in 0..5_000 {
        let v = rng.range(-3.5, 12.25);
        assert!((-3.5..=12.25).contains(&v), "range draw {v} escaped bounds");
    }
}

#[test]
fn range_consumes_exactly_one_draw() {
    let mut a = SeededRandom::new(99);
    let mut b = SeededRandom::new(99);
    a.range(0.0, 10.0);
    b.next();
    assert_eq!(a.next().to_bits(), b.next().to_bits());
}

#[test]
fn chance_above_is_strictly_greater() {
    // seed 0 first draw is ~0.236
    let mut rng = SeededRandom::new(0);
    assert!(rng.chance_above(0.2));
    let mut rng = SeededRandom::new(0);
    assert!(!rng.chance_above(0.3));
}
