//! Error module for the Scalable Bloom application.
//!
//! Library code returns the narrow [`BloomFilterError`]; everything that
//! touches files, configuration, or the command line converts into
//! [`AppError`] through `?`.

use thiserror::Error;

use crate::data_structures::scalable_bloom::BloomFilterError;

pub mod config;

/// Result type alias used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// Core error enum for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid filter parameters.
    #[error("Filter error: {0}")]
    Filter(#[from] BloomFilterError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
