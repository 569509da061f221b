// Copyright (c) 2025 Scalable Bloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Partitioned Bloom filter: a single generation of a scalable filter.

use std::fmt;
use std::sync::Arc;

use crate::data_structures::scalable_bloom::bit_array::BitArray;
use crate::data_structures::scalable_bloom::error::{
    check_capacity_hint, check_false_positive_rate, Result,
};
use crate::data_structures::scalable_bloom::hash::{hash_offset, FnvHashSource, HashSource};

/// Optimal number of hash functions for a target false positive rate.
///
/// This uses the formula: k = ceil(log2(1/p)), never less than 1. It is
/// evaluated as `-log2(p)`, which stays finite for subnormal `p` where `1/p`
/// would overflow.
pub fn optimal_k(false_positive_rate: f64) -> usize {
    ((-false_positive_rate.log2()).ceil() as usize).max(1)
}

/// Optimal bit array size for `n` items at a target false positive rate.
///
/// This uses the formula: m = ceil(-n*ln(p)/(ln(2)^2))
pub fn optimal_m(n: usize, false_positive_rate: f64) -> usize {
    let ln2 = std::f64::consts::LN_2;
    (-(n as f64) * false_positive_rate.ln() / (ln2 * ln2)).ceil() as usize
}

/// A Bloom filter whose bit array is split into `k` equal partitions.
///
/// Every hash function indexes its own partition, so each one sets exactly
/// one bit in a region nobody else writes to. The filter's storage holds
/// `k * ceil(m / k)` bits, i.e. `m` rounded up so that partitions align.
///
/// # Examples
///
/// ```
/// use scalable_bloom_lib::data_structures::scalable_bloom::PartitionedBloomFilter;
///
/// let mut filter = PartitionedBloomFilter::new(1_000, 0.01).unwrap();
/// filter.add("hello");
///
/// assert!(filter.test("hello"));
/// assert!(!filter.test("world"));
/// assert_eq!(filter.k(), 7);
/// ```
pub struct PartitionedBloomFilter<H = FnvHashSource> {
    bits: BitArray,
    hash: Arc<H>,
    hint: usize,
    false_positive_rate: f64,
    k: usize,
    m: usize,
    partition_size: usize,
    count: usize,
}

impl PartitionedBloomFilter<FnvHashSource> {
    /// Create a filter sized for `n` items at the given false positive rate,
    /// hashing with the default FNV source.
    pub fn new(n: usize, false_positive_rate: f64) -> Result<Self> {
        Self::with_hash_source(n, false_positive_rate, Arc::new(FnvHashSource))
    }
}

impl<H: HashSource> PartitionedBloomFilter<H> {
    /// Create a filter sized for `n` items that hashes through a shared source.
    ///
    /// # Errors
    ///
    /// Fails when `false_positive_rate` is outside (0, 1) or `n` is zero.
    pub fn with_hash_source(n: usize, false_positive_rate: f64, hash: Arc<H>) -> Result<Self> {
        check_capacity_hint(n)?;
        check_false_positive_rate(false_positive_rate)?;

        let k = optimal_k(false_positive_rate);
        let m = optimal_m(n, false_positive_rate);
        let partition_size = m.div_ceil(k).max(1);

        Ok(Self {
            bits: BitArray::new(k * partition_size),
            hash,
            hint: n,
            false_positive_rate,
            k,
            m,
            partition_size,
            count: 0,
        })
    }

    /// Insert an item.
    pub fn add(&mut self, item: impl AsRef<[u8]>) {
        let (h1, h2) = self.hash.hash(item.as_ref());
        self.add_hashes(h1, h2);
    }

    /// Returns `true` if the item might be in the filter, `false` if it's
    /// definitely not.
    pub fn test(&self, item: impl AsRef<[u8]>) -> bool {
        let (h1, h2) = self.hash.hash(item.as_ref());
        self.test_hashes(h1, h2)
    }

    /// Insert an item given its precomputed base hashes.
    pub(crate) fn add_hashes(&mut self, h1: u64, h2: u64) {
        for j in 0..self.k {
            let index = j * self.partition_size + hash_offset(h1, h2, j, self.partition_size);
            self.bits.set(index);
        }
        self.count += 1;
    }

    /// Membership check given precomputed base hashes.
    pub(crate) fn test_hashes(&self, h1: u64, h2: u64) -> bool {
        (0..self.k).all(|j| {
            self.bits
                .get(j * self.partition_size + hash_offset(h1, h2, j, self.partition_size))
        })
    }

    /// Fraction of storage bits that are set, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Optimal bit count `m` this generation was sized with.
    pub fn capacity(&self) -> usize {
        self.m
    }

    /// Number of hash functions (and partitions).
    pub fn k(&self) -> usize {
        self.k
    }

    /// Target false positive rate of this generation.
    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    /// Number of items this generation was sized for.
    pub fn hint(&self) -> usize {
        self.hint
    }

    /// Number of bits in each partition.
    pub fn partition_size(&self) -> usize {
        self.partition_size
    }

    /// Number of `add` calls, duplicates included.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Read-only view of the underlying bits.
    pub fn bits(&self) -> &BitArray {
        &self.bits
    }

    /// Unset every bit and zero the item count.
    pub fn reset(&mut self) {
        self.bits.clear();
        self.count = 0;
    }
}

impl<H> fmt::Debug for PartitionedBloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionedBloomFilter")
            .field("hint", &self.hint)
            .field("false_positive_rate", &self.false_positive_rate)
            .field("k", &self.k)
            .field("m", &self.m)
            .field("partition_size", &self.partition_size)
            .field("count", &self.count)
            .field("ones", &self.bits.count_ones())
            .finish()
    }
}
