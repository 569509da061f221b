//! Test modules for the Scalable Bloom crate.
//!
//! This module contains the crate-internal testing infrastructure:
//! - Unit tests for configuration and error handling
//! - Property-based tests for the filter using proptest
//! - Test fixtures and utilities

pub mod scalable_bloom_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{item_strategy, items_strategy, TestFixture};
