//! Filter configuration module.
//!
//! This module defines the sizing parameters of the scalable Bloom filter as
//! they appear in configuration files.

use super::{ConfigResult, Validate};
use crate::data_structures::scalable_bloom::{
    BloomFilterError, ScalableBloomFilterConfig, DEFAULT_CAPACITY_HINT, DEFAULT_TIGHTENING_RATIO,
};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Filter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Number of items each generation is sized for
    pub capacity_hint: usize,

    /// False positive target of the first generation
    pub false_positive_rate: f64,

    /// Per-generation factor applied to the false positive target
    pub tightening_ratio: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity_hint: DEFAULT_CAPACITY_HINT,
            false_positive_rate: 0.01,
            tightening_ratio: DEFAULT_TIGHTENING_RATIO,
        }
    }
}

impl FilterConfig {
    /// Convert into the library-level filter configuration.
    pub fn to_filter_config(&self) -> ScalableBloomFilterConfig {
        ScalableBloomFilterConfig::new()
            .with_capacity_hint(self.capacity_hint)
            .with_false_positive_rate(self.false_positive_rate)
            .with_tightening_ratio(self.tightening_ratio)
    }
}

impl Validate for FilterConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.to_filter_config().validate().map_err(|e| {
            let key = match e {
                BloomFilterError::InvalidCapacityHint => "filter.capacity_hint",
                BloomFilterError::InvalidFalsePositiveRate(_) => "filter.false_positive_rate",
                BloomFilterError::InvalidTighteningRatio(_) => "filter.tightening_ratio",
            };
            ConfigError::ValueOutOfRange {
                key: key.to_string(),
                message: e.to_string(),
            }
        })
    }
}
