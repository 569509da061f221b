// Copyright (c) 2025 Scalable Bloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixed-length bit vector with an incrementally maintained population count.

/// A fixed-length bit vector backed by 64-bit words.
///
/// The number of set bits is tracked on every [`BitArray::set`], so
/// [`BitArray::count_ones`] is O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    words: Vec<u64>,
    len: usize,
    ones: usize,
}

impl BitArray {
    /// Create a bit array of `len` bits, all unset.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
            ones: 0,
        }
    }

    /// Set bit `index`. Returns `true` if the bit was previously unset.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set(&mut self, index: usize) -> bool {
        self.check_index(index);
        let word = &mut self.words[index / 64];
        let mask = 1u64 << (index % 64);
        if *word & mask == 0 {
            *word |= mask;
            self.ones += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether bit `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.check_index(index);
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.ones
    }

    /// Total number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if at least one bit is set.
    pub fn any(&self) -> bool {
        self.ones > 0
    }

    /// Unset every bit.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
        self.ones = 0;
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.len,
            "bit index {index} out of range for bit array of length {}",
            self.len
        );
    }
}
