//! Data structures for the Scalable Bloom crate.
//!
//! This module contains the probabilistic membership structures. All
//! implementations keep to the project requirements:
//! - No unsafe code
//! - Explicit error types for invalid parameters
//! - Bounded, predictable memory per generation

pub mod scalable_bloom;

// Re-export common data structures
pub use scalable_bloom::{
    BloomFilterError, HashSource, PartitionedBloomFilter, ScalableBloomFilter,
    ScalableBloomFilterConfig,
};
