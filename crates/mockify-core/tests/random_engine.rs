use mockify_core::{GenerationError, RandomEngine};
use proptest::prelude::*;

fn draw(engine: &mut RandomEngine, count: usize) -> Vec<f64> {
    (0..count).map(|_| engine.random()).collect()
}

#[test]
fn same_seed_yields_identical_stream() {
    let mut first = RandomEngine::seeded(12345);
    let mut second = RandomEngine::seeded(12345);

    assert_eq!(draw(&mut first, 64), draw(&mut second, 64));
}

#[test]
fn different_seeds_diverge() {
    let mut first = RandomEngine::seeded(1);
    let mut second = RandomEngine::seeded(2);

    assert_ne!(draw(&mut first, 8), draw(&mut second, 8));
}

#[test]
fn random_stays_in_unit_interval() {
    let mut engine = RandomEngine::seeded(99);
    for value in draw(&mut engine, 10_000) {
        assert!((0.0..1.0).contains(&value), "{value} out of range");
    }
}

#[test]
fn reset_seed_rewinds_without_changing_seed() {
    let mut engine = RandomEngine::seeded(7);
    let first = draw(&mut engine, 5);

    engine.reset_seed();

    assert_eq!(engine.seed(), 7);
    assert_eq!(draw(&mut engine, 5), first);
}

#[test]
fn set_seed_records_seed_and_restarts_stream() {
    let mut engine = RandomEngine::seeded(1);
    let _ = draw(&mut engine, 3);

    engine.set_seed(42);
    let after_set = draw(&mut engine, 4);

    assert_eq!(engine.seed(), 42);
    assert_eq!(after_set, draw(&mut RandomEngine::seeded(42), 4));
}

#[test]
fn pin_restores_previous_seed_and_state() {
    let mut engine = RandomEngine::seeded(5);
    let _ = draw(&mut engine, 2);
    let before = engine.snapshot();
    let mut untouched = engine.clone();

    {
        let mut pinned = engine.pin(1000);
        assert_eq!(pinned.seed(), 1000);
        let _ = draw(&mut pinned, 10);
    }

    assert_eq!(engine.snapshot(), before);
    assert_eq!(draw(&mut engine, 5), draw(&mut untouched, 5));
}

#[test]
fn scoped_engines_do_not_share_state() {
    let mut scoped = RandomEngine::seeded(3);
    let mut other = RandomEngine::seeded(3);

    let _ = draw(&mut other, 100);

    assert_eq!(draw(&mut scoped, 3), draw(&mut RandomEngine::seeded(3), 3));
}

#[test]
fn random_pick_rejects_empty_sequence() {
    let mut engine = RandomEngine::seeded(1);
    let empty: [u8; 0] = [];

    let result = engine.random_pick(&empty);

    assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));
}

#[test]
fn random_pick_covers_every_element() {
    let mut engine = RandomEngine::seeded(11);
    let items = ["a", "b", "c", "d"];
    let mut seen = [false; 4];
    for _ in 0..500 {
        let picked = engine.random_pick(&items).unwrap();
        let index = items.iter().position(|item| item == picked).unwrap();
        seen[index] = true;
    }
    assert!(seen.iter().all(|hit| *hit));
}

#[test]
fn random_float_respects_decimal_precision() {
    let mut engine = RandomEngine::seeded(8);
    for _ in 0..200 {
        let value = engine.random_float(0.0, 100.0, 2);
        let scaled = value * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-6, "{value}");
        assert!((0.0..=100.0).contains(&value));
    }
}

#[test]
fn shuffle_is_a_permutation() {
    let mut engine = RandomEngine::seeded(21);
    let items: Vec<u32> = (0..20).collect();

    let mut shuffled = engine.shuffle(&items);
    shuffled.sort_unstable();

    assert_eq!(shuffled, items);
}

#[test]
fn pick_many_returns_distinct_elements() {
    let mut engine = RandomEngine::seeded(4);
    let items = [1, 2, 3, 4, 5];

    let mut picked = engine.pick_many(&items, 3);
    assert_eq!(picked.len(), 3);
    picked.sort_unstable();
    picked.dedup();
    assert_eq!(picked.len(), 3);

    assert_eq!(engine.pick_many(&items, 10).len(), 5);
}

proptest! {
    #[test]
    fn random_int_is_inclusive_of_bounds(seed in any::<u64>(), min in -1000_i64..1000, width in 0_i64..50) {
        let mut engine = RandomEngine::seeded(seed);
        let max = min + width;
        for _ in 0..64 {
            let value = engine.random_int(min, max);
            prop_assert!(value >= min && value <= max);
        }
    }

    #[test]
    fn any_seed_reproduces_its_stream(seed in any::<u64>()) {
        let mut first = RandomEngine::seeded(seed);
        let mut second = RandomEngine::seeded(seed);
        for _ in 0..16 {
            prop_assert_eq!(first.random_int(0, 1_000_000), second.random_int(0, 1_000_000));
        }
    }
}

#[test]
fn random_int_hits_both_ends_of_small_range() {
    let mut engine = RandomEngine::seeded(17);
    let values: Vec<i64> = (0..400).map(|_| engine.random_int(1, 3)).collect();
    assert!(values.contains(&1));
    assert!(values.contains(&3));
}
