//! RFC 1321 digest engine
//!
//! [`compress`] folds one 512-bit block into a 128-bit running state; the
//! framer pads a message to whole blocks and folds them in order.

mod block;
mod error;
mod framer;
mod output;

pub use block::{State, compress, decode_block};
pub use error::{Error, Result};
pub use framer::{Framer, hash, pad, padded_len};
pub use output::{Digest, HEX_LEN};

/// Digest size in bytes
pub const DIGEST_LEN: usize = 16;

/// Block size in bytes (512 bits)
pub const BLOCK_LEN: usize = 64;

/// Words per block
pub const BLOCK_WORDS: usize = BLOCK_LEN / 4;

/// Words of running state
pub const STATE_WORDS: usize = 4;

/// Size of the trailing bit-length field in bytes
pub const LENGTH_FIELD_LEN: usize = 8;
