// Copyright (c) 2025 Scalable Bloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hashing utilities for the Scalable Bloom Filter.
//!
//! A filter never evaluates `k` independent hash functions. Instead a
//! [`HashSource`] produces two base values per item and every bit position
//! is derived from them arithmetically (double hashing, `h1 + j * h2`).

use std::hash::Hasher;

use fnv::FnvHasher;

/// Produces the two base hash values used to derive all bit positions.
///
/// Implementations must be deterministic: the same bytes always yield the
/// same pair. Any `Fn(&[u8]) -> (u64, u64)` closure is a `HashSource`.
pub trait HashSource {
    /// Hash `bytes` into two 64-bit values.
    fn hash(&self, bytes: &[u8]) -> (u64, u64);
}

impl<F> HashSource for F
where
    F: Fn(&[u8]) -> (u64, u64),
{
    fn hash(&self, bytes: &[u8]) -> (u64, u64) {
        self(bytes)
    }
}

/// Default hash source built on 64-bit FNV-1a.
///
/// The first value is the plain FNV-1a digest. The second runs FNV-1a over
/// the same bytes again, seeded with the first digest, so the two values
/// differ even for very short inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FnvHashSource;

impl FnvHashSource {
    /// Create a new FNV hash source.
    pub fn new() -> Self {
        Self
    }
}

impl HashSource for FnvHashSource {
    fn hash(&self, bytes: &[u8]) -> (u64, u64) {
        let mut hasher = FnvHasher::default();
        hasher.write(bytes);
        let h1 = hasher.finish();

        let mut hasher = FnvHasher::with_key(h1);
        hasher.write(bytes);
        (h1, hasher.finish())
    }
}

/// Position of hash function `j` inside a partition of `partition_size` bits.
#[inline]
pub(crate) fn hash_offset(h1: u64, h2: u64, j: usize, partition_size: usize) -> usize {
    (h1.wrapping_add((j as u64).wrapping_mul(h2)) % partition_size as u64) as usize
}
