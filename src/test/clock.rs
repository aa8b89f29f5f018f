use crate::sim::SimClock;

#[test]
fn clock_starts_at_given_time() {
    let c = SimClock::starting_at(42.5);
    assert_eq!(c.now(), 42.5);
}

#[test]
fn clock_advances_forward() {
    let mut c = SimClock::starting_at(10.0);
    c.advance(5.0);
    c.advance(0.5);
    assert_eq!(c.now(), 15.5);
}

#[test]
fn clock_accumulates_many_small_steps_stably() {
    // Naive f64 summation of a million 0.1 steps drifts well past 1e-7;
    // compensated summation keeps the error far below one service unit.
    let mut c = SimClock::default();
    for _ in 0..1_000_000 {
        c.advance(0.1);
    }
    assert!((c.now() - 100_000.0).abs() < 1e-6, "drift: {}", c.now());
}

#[test]
fn advance_to_snaps_exactly_to_target() {
    let mut c = SimClock::starting_at(50.0);
    c.advance(0.1);
    c.advance(0.1);
    c.advance_to(1_000.0);
    assert_eq!(c.now(), 1_000.0);
}

#[test]
#[should_panic]
fn advance_rejects_negative_step() {
    let mut c = SimClock::default();
    c.advance(-1.0);
}

#[test]
#[should_panic]
fn advance_to_rejects_past_target() {
    let mut c = SimClock::starting_at(100.0);
    c.advance_to(50.0);
}
