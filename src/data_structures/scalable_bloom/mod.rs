// Copyright (c) 2025 Scalable Bloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Scalable Bloom Filter for deduplication and existence checks.
//!
//! A probabilistic set that answers "have I seen this item before?" with no
//! false negatives and a tunable false positive rate, and that keeps working
//! when far more items arrive than it was provisioned for.
//!
//! # Design
//!
//! - A [`ScalableBloomFilter`] is a chain of [`PartitionedBloomFilter`]
//!   generations. Items always go into the newest generation.
//! - When the newest generation is half full, a new one is appended with a
//!   tighter false positive target (`fp * r^i`), which keeps the compounded
//!   error rate bounded no matter how many generations pile up.
//! - Each generation splits its bits into `k` partitions, one per hash function, and
//!   derives all bit positions from two base hashes supplied by a [`HashSource`].
//!
//! # Example
//!
//! ```
//! use scalable_bloom_lib::data_structures::scalable_bloom::ScalableBloomFilter;
//!
//! let mut seen = ScalableBloomFilter::new_default(0.01).unwrap();
//!
//! let urls = ["https://a.example", "https://b.example", "https://a.example"];
//! let fresh: Vec<_> = urls.iter().filter(|url| !seen.test_and_add(url)).collect();
//!
//! assert_eq!(fresh.len(), 2);
//! ```
//!
//! # Sharing between threads
//!
//! The filter has no internal synchronization. It is `Send + Sync` whenever
//! its hash source is, so wrap it in a mutex to share it:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use scalable_bloom_lib::data_structures::scalable_bloom::ScalableBloomFilter;
//!
//! let filter = Arc::new(Mutex::new(ScalableBloomFilter::new(1_000, 0.01, 0.8).unwrap()));
//! filter.lock().unwrap().add("shared");
//! assert!(filter.lock().unwrap().test("shared"));
//! ```

// Module declarations
mod bit_array;
mod config;
mod error;
mod hash;
mod partitioned;
mod scalable;

// Re-exports
pub use bit_array::BitArray;
pub use config::ScalableBloomFilterConfig;
pub use error::{BloomFilterError, Result};
pub use hash::{FnvHashSource, HashSource};
pub use partitioned::{optimal_k, optimal_m, PartitionedBloomFilter};
pub use scalable::{
    ScalableBloomFilter, DEFAULT_CAPACITY_HINT, DEFAULT_TIGHTENING_RATIO, FILL_RATIO_THRESHOLD,
};
