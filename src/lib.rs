//! Scalable Bloom Library
//!
//! This library contains a scalable Bloom filter together with the
//! configuration, error, and logging plumbing used by the `scalable_bloom`
//! binary. The binary is a thin front end; everything it does is available
//! to other projects through this crate.
//!
//! # Architecture
//!
//! - [`data_structures::scalable_bloom`] holds the filter itself and has no
//!   dependency on the rest of the crate.
//! - [`config`] loads and validates settings from defaults, files, and
//!   environment variables.
//! - [`error`] defines the application error type.
//! - [`logging`] installs the tracing subscriber.

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Scalable Bloom crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
