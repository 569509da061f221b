// Copyright (c) 2025 Scalable Bloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the Scalable Bloom Filter.

use crate::data_structures::scalable_bloom::error::{
    check_capacity_hint, check_false_positive_rate, check_tightening_ratio, Result,
};
use crate::data_structures::scalable_bloom::hash::HashSource;
use crate::data_structures::scalable_bloom::scalable::{
    ScalableBloomFilter, DEFAULT_CAPACITY_HINT, DEFAULT_TIGHTENING_RATIO,
};

/// Configuration for the Scalable Bloom Filter.
///
/// Values are checked when the filter is built, not when they are set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalableBloomFilterConfig {
    /// Number of items each generation is sized for
    capacity_hint: usize,

    /// False positive target of the first generation (0.0 to 1.0, exclusive)
    false_positive_rate: f64,

    /// Factor applied to the false positive target for each new generation
    tightening_ratio: f64,
}

impl ScalableBloomFilterConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - capacity_hint: 10,000
    /// - false_positive_rate: 0.01 (1%)
    /// - tightening_ratio: 0.8
    pub fn new() -> Self {
        Self {
            capacity_hint: DEFAULT_CAPACITY_HINT,
            false_positive_rate: 0.01,
            tightening_ratio: DEFAULT_TIGHTENING_RATIO,
        }
    }

    /// Set the number of items each generation is sized for.
    ///
    /// An accurate value keeps the number of generations, and so the cost of
    /// a lookup, small.
    pub fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    /// Set the false positive target of the first generation.
    pub fn with_false_positive_rate(mut self, false_positive_rate: f64) -> Self {
        self.false_positive_rate = false_positive_rate;
        self
    }

    /// Set the tightening ratio. `1.0` gives every generation the same target.
    pub fn with_tightening_ratio(mut self, tightening_ratio: f64) -> Self {
        self.tightening_ratio = tightening_ratio;
        self
    }

    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }

    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    pub fn tightening_ratio(&self) -> f64 {
        self.tightening_ratio
    }

    /// Check every value without building a filter.
    pub fn validate(&self) -> Result<()> {
        check_capacity_hint(self.capacity_hint)?;
        check_false_positive_rate(self.false_positive_rate)?;
        check_tightening_ratio(self.tightening_ratio)
    }

    /// Build a filter with the default hash source.
    pub fn build(&self) -> Result<ScalableBloomFilter> {
        ScalableBloomFilter::new(
            self.capacity_hint,
            self.false_positive_rate,
            self.tightening_ratio,
        )
    }

    /// Build a filter that hashes with `hash`.
    pub fn build_with_hash_source<H: HashSource>(&self, hash: H) -> Result<ScalableBloomFilter<H>> {
        ScalableBloomFilter::with_hash_source(
            self.capacity_hint,
            self.false_positive_rate,
            self.tightening_ratio,
            hash,
        )
    }
}

impl Default for ScalableBloomFilterConfig {
    fn default() -> Self {
        Self::new()
    }
}
