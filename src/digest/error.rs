//! Digest engine error types

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors raised by the digest engine and the candidate search built on it.
#[derive(Error, Debug)]
pub enum Error {
    /// The padded message buffer could not be allocated
    #[error("failed to allocate {requested} bytes for padded message: {source}")]
    Allocation {
        /// Number of bytes requested for the padded buffer
        requested: usize,
        /// Underlying reservation failure
        #[source]
        source: TryReserveError,
    },

    /// Message bit length does not fit the 64-bit length field
    #[error("message too long: {len} bytes overflows the 64-bit bit-length field")]
    MessageTooLong {
        /// Message length in bytes
        len: usize,
    },

    /// Text is not a 32-character hex digest
    #[error("invalid hex digest: {input:?}")]
    InvalidHex {
        /// Offending input
        input: String,
    },

    /// Search configuration rejected by validation
    #[error("invalid search config: {0}")]
    InvalidConfig(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
