//! Property-based tests for the scalable Bloom filter.

use crate::data_structures::scalable_bloom::{ScalableBloomFilter, FILL_RATIO_THRESHOLD};
use crate::tests::{item_strategy, items_strategy};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every added item is found, however many generations it took.
    #[test]
    fn proptest_no_false_negatives(
        items in items_strategy(500),
        hint in 1usize..50,
        r in 0.1f64..=1.0,
    ) {
        let mut filter = ScalableBloomFilter::new(hint, 0.05, r).unwrap();
        for item in &items {
            filter.add(item);
        }
        for item in &items {
            prop_assert!(filter.test(item));
        }
    }

    /// Re-adding an item never disturbs membership of anything else.
    #[test]
    fn proptest_idempotent_membership(items in items_strategy(200), repeat in item_strategy()) {
        let mut filter = ScalableBloomFilter::new(20, 0.01, 0.8).unwrap();
        for item in &items {
            filter.add(item);
            filter.add(&repeat);
        }
        filter.add(&repeat);

        prop_assert!(filter.test(&repeat));
        for item in &items {
            prop_assert!(filter.test(item));
        }
    }

    /// Capacity only moves when a generation is appended, and only upward.
    #[test]
    fn proptest_capacity_monotonic(items in items_strategy(300)) {
        let mut filter = ScalableBloomFilter::new(5, 0.1, 0.9).unwrap();
        let mut capacity = filter.capacity();
        let mut generations = filter.generation_count();

        for item in &items {
            let last_ratio = filter.generations().last().unwrap().fill_ratio();
            filter.add(item);

            let grew = filter.generation_count() > generations;
            prop_assert_eq!(grew, last_ratio >= FILL_RATIO_THRESHOLD);
            if grew {
                prop_assert!(filter.capacity() > capacity);
            } else {
                prop_assert_eq!(filter.capacity(), capacity);
            }
            capacity = filter.capacity();
            generations = filter.generation_count();
        }
    }

    /// Reset leaves one empty generation, whatever came before.
    #[test]
    fn proptest_reset_clears_all(items in items_strategy(300)) {
        let mut filter = ScalableBloomFilter::new(10, 0.01, 0.8).unwrap();
        for item in &items {
            filter.add(item);
        }
        filter.reset();

        prop_assert_eq!(filter.generation_count(), 1);
        prop_assert_eq!(filter.fill_ratio(), 0.0);
        for item in &items {
            prop_assert!(!filter.test(item));
        }
    }

    /// `test_and_add` reports the state from before the call.
    #[test]
    fn proptest_test_and_add_matches_test(items in items_strategy(100)) {
        let mut filter = ScalableBloomFilter::new(50, 0.01, 0.8).unwrap();
        for item in &items {
            let expected = filter.test(item);
            prop_assert_eq!(filter.test_and_add(item), expected);
            prop_assert!(filter.test(item));
        }
    }
}

/// The measured false positive rate stays within the compounded bound.
#[test]
fn test_false_positive_rate_bounded() {
    let fp = 0.01;
    let r = 0.8;
    let mut filter = ScalableBloomFilter::new(1_000, fp, r).unwrap();

    for i in 0..20_000 {
        filter.add(format!("member-{i}"));
    }
    assert!(filter.generation_count() > 1);

    let trials = 20_000;
    let false_positives = (0..trials)
        .filter(|i| filter.test(format!("stranger-{i}")))
        .count();
    let rate = false_positives as f64 / trials as f64;

    // Sum of fp * r^i over an infinite chain
    let bound = fp / (1.0 - r);
    assert!(rate < bound, "observed rate {rate} exceeds bound {bound}");
}

/// The filter can be shared behind an external lock.
#[test]
fn test_shared_behind_mutex() {
    use parking_lot::Mutex;
    use std::sync::{Arc, Barrier};
    use std::thread;

    let filter = Arc::new(Mutex::new(ScalableBloomFilter::new(100, 0.01, 0.8).unwrap()));
    let thread_count = 8;
    let items_per_thread = 500;
    let barrier = Arc::new(Barrier::new(thread_count));

    let handles: Vec<_> = (0..thread_count)
        .map(|t| {
            let filter = Arc::clone(&filter);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in t * items_per_thread..(t + 1) * items_per_thread {
                    filter.lock().add(i.to_string());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let filter = filter.lock();
    assert!(filter.generation_count() > 1);
    assert_eq!(filter.count(), thread_count * items_per_thread);
    for i in 0..thread_count * items_per_thread {
        assert!(filter.test(i.to_string()));
    }
}
