//! md5-engine - from-scratch RFC 1321 message digest for brute-force searches
//!
//! The engine maps any byte sequence to a 128-bit [`Digest`]. It is a pure
//! function of its input: no global state, no content-dependent branches,
//! and every call owns its own running state and padding buffer.
//!
//! # Quick Start
//!
//! ```rust
//! let digest = md5_engine::digest(b"abc")?;
//! assert_eq!(digest.to_string(), "900150983cd24fb0d6963f7d28e17f72");
//! # Ok::<(), md5_engine::Error>(())
//! ```
//!
//! Salted searches hash `salt ++ decimal(index)` until enough digests with a
//! zero prefix turn up:
//!
//! ```rust,no_run
//! use md5_engine::search::{SearchConfig, ZeroPrefixSearch};
//!
//! let config = SearchConfig::with_salt("abc");
//! let password: String = ZeroPrefixSearch::new(&config)?
//!     .take(8)
//!     .map(|hit| hit.map(|hit| format!("{:x}", hit.digest.nibble(5).unwrap_or(0))))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(password, "18f47a30");
//! # Ok::<(), md5_engine::Error>(())
//! ```
//!
//! # Security
//!
//! MD5 is broken as a cryptographic hash. This crate exists for its bit
//! distribution in legacy puzzle-style searches, not for integrity or
//! authentication.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod digest;
pub mod search;

pub use digest::{BLOCK_LEN, DIGEST_LEN, Digest, Error, Framer, Result, State, compress};

/// Compute the 16-byte digest of `message`.
///
/// Total over all byte sequences, including empty input, embedded NUL bytes
/// and non-UTF-8 data. The only failure is being unable to allocate the
/// padded buffer.
pub fn digest(message: &[u8]) -> Result<Digest> {
    digest::hash(message)
}
