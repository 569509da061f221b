// Copyright (c) 2025 Scalable Bloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Scalable Bloom Filter.

/// Errors that can occur when constructing a Bloom filter.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum BloomFilterError {
    /// The false positive rate is not strictly between 0 and 1
    #[error("False positive rate must be between 0.0 and 1.0 exclusive, got {0}")]
    InvalidFalsePositiveRate(f64),

    /// The tightening ratio is not in (0, 1]
    #[error("Tightening ratio must be in (0.0, 1.0], got {0}")]
    InvalidTighteningRatio(f64),

    /// The capacity hint is zero
    #[error("Capacity hint must be greater than 0")]
    InvalidCapacityHint,
}

/// Result type for Bloom filter operations
pub type Result<T> = std::result::Result<T, BloomFilterError>;

/// Checks that `fp` lies in the open interval (0, 1). NaN is rejected.
pub(crate) fn check_false_positive_rate(fp: f64) -> Result<()> {
    if fp > 0.0 && fp < 1.0 {
        Ok(())
    } else {
        Err(BloomFilterError::InvalidFalsePositiveRate(fp))
    }
}

/// Checks that `r` lies in the half-open interval (0, 1]. NaN is rejected.
pub(crate) fn check_tightening_ratio(r: f64) -> Result<()> {
    if r > 0.0 && r <= 1.0 {
        Ok(())
    } else {
        Err(BloomFilterError::InvalidTighteningRatio(r))
    }
}

pub(crate) fn check_capacity_hint(hint: usize) -> Result<()> {
    if hint == 0 {
        Err(BloomFilterError::InvalidCapacityHint)
    } else {
        Ok(())
    }
}
