//! Top-level error type shared across crates.

use thiserror::Error;

/// Parse and validation errors for the fundamental types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MooError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}
