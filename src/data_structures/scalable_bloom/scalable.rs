// Copyright (c) 2025 Scalable Bloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Scalable Bloom Filter.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::data_structures::scalable_bloom::error::{
    check_capacity_hint, check_false_positive_rate, check_tightening_ratio, Result,
};
use crate::data_structures::scalable_bloom::hash::{FnvHashSource, HashSource};
use crate::data_structures::scalable_bloom::partitioned::PartitionedBloomFilter;

/// Capacity hint used by [`ScalableBloomFilter::new_default`].
pub const DEFAULT_CAPACITY_HINT: usize = 10_000;

/// Tightening ratio used by [`ScalableBloomFilter::new_default`].
pub const DEFAULT_TIGHTENING_RATIO: f64 = 0.8;

/// Fill ratio at which the newest generation stops accepting items.
pub const FILL_RATIO_THRESHOLD: f64 = 0.5;

/// Smallest positive subnormal `f64`, the floor for a generation's target.
const SMALLEST_FALSE_POSITIVE_RATE: f64 = 5e-324;

/// A Bloom filter that grows by appending generations.
///
/// Each generation is a [`PartitionedBloomFilter`] sized for `hint` items.
/// When the newest generation is half full, the next `add` appends a fresh
/// generation whose false positive target is the previous one multiplied by
/// the tightening ratio `r`. Generation `i` therefore targets `fp * r^i`, and
/// the compounded false positive rate stays bounded by `fp / (1 - r)` for
/// `r < 1`.
///
/// The filter has no internal locking. Wrap it in a mutex to share it
/// between threads.
///
/// # Examples
///
/// ```
/// use scalable_bloom_lib::data_structures::scalable_bloom::ScalableBloomFilter;
///
/// let mut filter = ScalableBloomFilter::new(100, 0.01, 0.8).unwrap();
///
/// filter.add("a").add("b");
/// assert!(filter.test("a"));
///
/// // `c` was never seen, `b` was
/// assert!(!filter.test_and_add("c"));
/// assert!(filter.test_and_add("b"));
/// ```
pub struct ScalableBloomFilter<H = FnvHashSource> {
    /// Generations, oldest first. Never empty.
    generations: Vec<PartitionedBloomFilter<H>>,
    hash: Arc<H>,
    hint: usize,
    false_positive_rate: f64,
    tightening_ratio: f64,
    fill_ratio_threshold: f64,
}

impl ScalableBloomFilter<FnvHashSource> {
    /// Create a filter whose generations hold `hint` items each, starting at
    /// false positive rate `fp` and tightening by `r` per generation.
    ///
    /// # Errors
    ///
    /// Fails when `fp` is outside (0, 1), `r` is outside (0, 1] or `hint` is zero.
    pub fn new(hint: usize, fp: f64, r: f64) -> Result<Self> {
        Self::with_hash_source(hint, fp, r, FnvHashSource)
    }

    /// Create a filter with a capacity hint of 10,000 and a tightening ratio of 0.8.
    pub fn new_default(fp: f64) -> Result<Self> {
        Self::new(DEFAULT_CAPACITY_HINT, fp, DEFAULT_TIGHTENING_RATIO)
    }
}

impl<H: HashSource> ScalableBloomFilter<H> {
    /// Create a filter that hashes items with `hash`.
    ///
    /// The source is shared by every generation, including those created by
    /// later growth and by [`reset`](Self::reset).
    pub fn with_hash_source(hint: usize, fp: f64, r: f64, hash: H) -> Result<Self> {
        check_capacity_hint(hint)?;
        check_false_positive_rate(fp)?;
        check_tightening_ratio(r)?;

        let hash = Arc::new(hash);
        let first = PartitionedBloomFilter::with_hash_source(hint, fp, Arc::clone(&hash))?;
        debug!(
            hint,
            fp,
            r,
            k = first.k(),
            m = first.capacity(),
            "Created scalable bloom filter"
        );

        Ok(Self {
            generations: vec![first],
            hash,
            hint,
            false_positive_rate: fp,
            tightening_ratio: r,
            fill_ratio_threshold: FILL_RATIO_THRESHOLD,
        })
    }

    /// Append a new, empty generation.
    ///
    /// Generation `i` targets `fp * r^i`. The generation is fully built before
    /// it joins the sequence.
    pub fn add_filter(&mut self) {
        let index = self.generations.len();
        // fp * r^i underflows to zero after thousands of generations, which
        // would make k infinite. Floor it at the smallest positive f64.
        let exponent = i32::try_from(index).unwrap_or(i32::MAX);
        let fp = (self.false_positive_rate * self.tightening_ratio.powi(exponent))
            .max(SMALLEST_FALSE_POSITIVE_RATE);
        let generation = self.new_generation(fp);

        debug!(
            generation = index,
            fp,
            k = generation.k(),
            m = generation.capacity(),
            "Appending bloom filter generation"
        );
        self.generations.push(generation);
    }

    /// Insert an item, growing first if the newest generation is half full.
    ///
    /// Returns the filter to allow chaining.
    pub fn add(&mut self, item: impl AsRef<[u8]>) -> &mut Self {
        if self.current().fill_ratio() >= self.fill_ratio_threshold {
            self.add_filter();
        }

        let (h1, h2) = self.hash.hash(item.as_ref());
        self.current_mut().add_hashes(h1, h2);
        self
    }

    /// Returns `true` if the item might have been added, `false` if it
    /// definitely was not.
    ///
    /// Generations are checked newest first.
    pub fn test(&self, item: impl AsRef<[u8]>) -> bool {
        let (h1, h2) = self.hash.hash(item.as_ref());
        self.generations
            .iter()
            .rev()
            .any(|generation| generation.test_hashes(h1, h2))
    }

    /// Test for membership, then add the item.
    ///
    /// Returns the membership status from before the insertion.
    pub fn test_and_add(&mut self, item: impl AsRef<[u8]>) -> bool {
        let item = item.as_ref();
        let member = self.test(item);
        self.add(item);
        member
    }

    /// Sum of the bit capacities of all generations.
    pub fn capacity(&self) -> usize {
        self.generations.iter().map(PartitionedBloomFilter::capacity).sum()
    }

    /// Unweighted mean of the generations' fill ratios.
    pub fn fill_ratio(&self) -> f64 {
        let total: f64 = self
            .generations
            .iter()
            .map(PartitionedBloomFilter::fill_ratio)
            .sum();
        total / self.generations.len() as f64
    }

    /// Hash function count of the first generation.
    ///
    /// Later generations use more hash functions when `r < 1`.
    pub fn k(&self) -> usize {
        self.generations[0].k()
    }

    /// Drop every generation and start over with a single empty one.
    pub fn reset(&mut self) -> &mut Self {
        trace!(generations = self.generations.len(), "Resetting scalable bloom filter");
        let first = self.new_generation(self.false_positive_rate);
        self.generations = vec![first];
        self
    }

    /// False positive target of the first generation.
    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    /// Number of items each generation is sized for.
    pub fn hint(&self) -> usize {
        self.hint
    }

    pub fn tightening_ratio(&self) -> f64 {
        self.tightening_ratio
    }

    pub fn fill_ratio_threshold(&self) -> f64 {
        self.fill_ratio_threshold
    }

    /// Number of generations, always at least one.
    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }

    /// Generations, oldest first.
    pub fn generations(&self) -> &[PartitionedBloomFilter<H>] {
        &self.generations
    }

    /// Number of `add` calls across all generations, duplicates included.
    pub fn count(&self) -> usize {
        self.generations.iter().map(PartitionedBloomFilter::count).sum()
    }

    fn new_generation(&self, fp: f64) -> PartitionedBloomFilter<H> {
        match PartitionedBloomFilter::with_hash_source(self.hint, fp, Arc::clone(&self.hash)) {
            Ok(generation) => generation,
            // hint and fp were validated at construction and fp stays in (0, 1)
            Err(e) => unreachable!("generation parameters were validated: {e}"),
        }
    }

    fn current(&self) -> &PartitionedBloomFilter<H> {
        &self.generations[self.generations.len() - 1]
    }

    fn current_mut(&mut self) -> &mut PartitionedBloomFilter<H> {
        let last = self.generations.len() - 1;
        &mut self.generations[last]
    }
}

impl<H> fmt::Debug for ScalableBloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalableBloomFilter")
            .field("hint", &self.hint)
            .field("false_positive_rate", &self.false_positive_rate)
            .field("tightening_ratio", &self.tightening_ratio)
            .field("generations", &self.generations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::scalable_bloom::BloomFilterError;

    #[test]
    fn test_new_default() {
        let filter = ScalableBloomFilter::new_default(0.1).unwrap();

        assert_eq!(filter.false_positive_rate(), 0.1);
        assert_eq!(filter.hint(), 10_000);
        assert_eq!(filter.tightening_ratio(), 0.8);
        assert_eq!(filter.fill_ratio_threshold(), 0.5);
        assert_eq!(filter.generation_count(), 1);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            ScalableBloomFilter::new(0, 0.1, 0.8).unwrap_err(),
            BloomFilterError::InvalidCapacityHint
        );
        assert_eq!(
            ScalableBloomFilter::new(10, 1.0, 0.8).unwrap_err(),
            BloomFilterError::InvalidFalsePositiveRate(1.0)
        );
        assert_eq!(
            ScalableBloomFilter::new(10, 0.1, 0.0).unwrap_err(),
            BloomFilterError::InvalidTighteningRatio(0.0)
        );
        assert_eq!(
            ScalableBloomFilter::new(10, 0.1, 1.5).unwrap_err(),
            BloomFilterError::InvalidTighteningRatio(1.5)
        );
        assert!(ScalableBloomFilter::new(10, 0.1, 1.0).is_ok());
    }

    #[test]
    fn test_capacity() {
        let mut filter = ScalableBloomFilter::new(1, 0.1, 1.0).unwrap();
        filter.add_filter();
        filter.add_filter();

        assert_eq!(filter.generation_count(), 3);
        assert_eq!(filter.capacity(), 15);
    }

    #[test]
    fn test_k() {
        let filter = ScalableBloomFilter::new(10, 0.1, 0.8).unwrap();
        assert_eq!(filter.k(), 4);
    }

    #[test]
    fn test_generations_tighten() {
        let mut filter = ScalableBloomFilter::new(100, 0.1, 0.5).unwrap();
        filter.add_filter();
        filter.add_filter();

        let rates: Vec<f64> = filter.generations().iter().map(|g| g.false_positive_rate()).collect();
        assert_eq!(rates, vec![0.1, 0.05, 0.025]);

        let ks: Vec<usize> = filter.generations().iter().map(|g| g.k()).collect();
        assert_eq!(ks, vec![4, 5, 6]);

        // k() reports the first generation only
        assert_eq!(filter.k(), 4);
    }

    #[test]
    fn test_test_and_add() {
        let mut filter = ScalableBloomFilter::new(100, 0.01, 0.8).unwrap();

        assert!(!filter.test("a"));

        let before: *const ScalableBloomFilter = &filter;
        let after: *const ScalableBloomFilter = filter.add("a");
        assert_eq!(before, after, "add should return the same instance");

        assert!(filter.test("a"));
        assert!(filter.test_and_add("a"));
        assert!(!filter.test_and_add("b"));
        assert!(filter.test("a"));
        assert!(filter.test("b"));
        assert!(!filter.test("c"));

        for i in 0..10_000 {
            filter.add(i.to_string());
        }

        // `x` should not be a false positive
        assert!(!filter.test("x"));
    }

    #[test]
    fn test_growth_threshold() {
        let mut filter = ScalableBloomFilter::new(10, 0.1, 0.8).unwrap();

        let mut i = 0;
        while filter.generation_count() == 1 {
            let ratio_before = filter.fill_ratio();
            filter.add(i.to_string());
            i += 1;
            if filter.generation_count() == 2 {
                assert!(ratio_before >= FILL_RATIO_THRESHOLD);
                // The item that triggered growth went into the new generation
                assert_eq!(filter.generations()[1].count(), 1);
            } else {
                assert!(ratio_before < FILL_RATIO_THRESHOLD);
            }
        }
    }

    #[test]
    fn test_new_generation_is_empty() {
        let mut filter = ScalableBloomFilter::new(10, 0.1, 0.8).unwrap();
        for i in 0..20 {
            filter.add(i.to_string());
        }
        filter.add_filter();

        let newest = filter.generations().last().unwrap();
        assert_eq!(newest.fill_ratio(), 0.0);
        assert_eq!(newest.count(), 0);
    }

    #[test]
    fn test_fill_ratio_is_unweighted_mean() {
        let mut filter = ScalableBloomFilter::new(10, 0.1, 0.5).unwrap();
        for i in 0..5 {
            filter.add(i.to_string());
        }
        let first = filter.generations()[0].fill_ratio();
        assert!(first > 0.0);

        filter.add_filter();
        assert_eq!(filter.fill_ratio(), first / 2.0);
    }

    #[test]
    fn test_reset() {
        let mut filter = ScalableBloomFilter::new(10, 0.1, 0.8).unwrap();
        for i in 0..1_000 {
            filter.add(i.to_string());
        }
        assert!(filter.generation_count() > 1);

        let before: *const ScalableBloomFilter = &filter;
        let after: *const ScalableBloomFilter = filter.reset();
        assert_eq!(before, after, "reset should return the same instance");

        assert_eq!(filter.generation_count(), 1);
        assert!(!filter.generations()[0].bits().any());
        assert_eq!(filter.fill_ratio(), 0.0);
        assert_eq!(filter.count(), 0);
        assert_eq!(filter.generations()[0].false_positive_rate(), 0.1);
    }

    #[test]
    fn test_extreme_growth_keeps_k_finite() {
        let mut filter = ScalableBloomFilter::new(1, 0.5, 0.001).unwrap();
        for _ in 0..200 {
            filter.add_filter();
        }
        let last = filter.generations().last().unwrap();
        assert_eq!(last.false_positive_rate(), SMALLEST_FALSE_POSITIVE_RATE);
        assert_eq!(last.k(), 1074);

        // Targets never loosen, even once they reach the floor
        let rates: Vec<f64> = filter.generations().iter().map(|g| g.false_positive_rate()).collect();
        assert!(rates.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_subnormal_rate_keeps_tightening() {
        let mut filter = ScalableBloomFilter::new(1, 1e-310, 0.5).unwrap();
        filter.add_filter();

        let rates: Vec<f64> = filter.generations().iter().map(|g| g.false_positive_rate()).collect();
        assert_eq!(rates, vec![1e-310, 5e-311]);
    }

    #[test]
    fn test_fill_ratio_one_item_per_generation() {
        // With a hint of 1 every generation is half full after a single item
        let mut filter = ScalableBloomFilter::new(1, 0.1, 0.8).unwrap();
        for i in 0..100 {
            filter.add(i.to_string());
        }

        assert_eq!(filter.generation_count(), 100);
        assert_eq!(filter.fill_ratio(), 0.5);
    }

    #[test]
    fn test_subnormal_false_positive_rate() {
        let mut filter = ScalableBloomFilter::new(1, 1e-310, 0.8).unwrap();
        assert_eq!(filter.k(), 1030);

        filter.add("a").add("b");
        assert!(filter.test("a"));
        assert!(filter.test("b"));
    }

    #[test]
    fn test_custom_hash_source() {
        let mut filter =
            ScalableBloomFilter::with_hash_source(100, 0.01, 0.8, |bytes: &[u8]| {
                (bytes.len() as u64, 0x9e37_79b9_7f4a_7c15)
            })
            .unwrap();

        filter.add("four");
        // Same length, same bit positions
        assert!(filter.test("five"));
        assert!(!filter.test("three"));
    }
}
