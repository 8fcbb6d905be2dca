//! Message framing: padding, block split, and the sequential fold over blocks.

use super::block::{State, compress, decode_block};
use super::error::{Error, Result};
use super::output::Digest;
use super::{BLOCK_LEN, LENGTH_FIELD_LEN};

const TERMINATOR: u8 = 0x80;

/// Total padded length for a message of `message_len` bytes.
///
/// Always a positive multiple of [`BLOCK_LEN`] with room for at least the
/// terminator byte and the 8-byte length field, or `None` when that size
/// does not fit in `usize`.
#[must_use]
pub const fn padded_len(message_len: usize) -> Option<usize> {
    match message_len.checked_add(1 + LENGTH_FIELD_LEN) {
        Some(with_suffix) => with_suffix.div_ceil(BLOCK_LEN).checked_mul(BLOCK_LEN),
        None => None,
    }
}

fn reserve_padded(out: &mut Vec<u8>, message_len: usize) -> Result<usize> {
    let total = padded_len(message_len).ok_or(Error::MessageTooLong { len: message_len })?;
    out.try_reserve_exact(total.saturating_sub(out.len()))
        .map_err(|source| Error::Allocation {
            requested: total,
            source,
        })?;
    Ok(total)
}

fn bit_length(message_len: usize) -> Result<u64> {
    u64::try_from(message_len)
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or(Error::MessageTooLong { len: message_len })
}

/// Append the padded form of `message` to the empty buffer `out`.
fn pad_into(message: &[u8], out: &mut Vec<u8>) -> Result<()> {
    let bits = bit_length(message.len())?;
    out.clear();
    let total = reserve_padded(out, message.len())?;

    out.extend_from_slice(message);
    out.push(TERMINATOR);
    out.resize(total - LENGTH_FIELD_LEN, 0);
    out.extend_from_slice(&bits.to_le_bytes());
    debug_assert_eq!(out.len() % BLOCK_LEN, 0);
    Ok(())
}

/// Pad `message` to a whole number of blocks.
pub fn pad(message: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    pad_into(message, &mut out)?;
    Ok(out)
}

fn fold(padded: &[u8]) -> Digest {
    let state = padded
        .chunks_exact(BLOCK_LEN)
        .fold(State::INITIAL, |state, chunk| {
            let mut block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            compress(state, &decode_block(&block))
        });
    Digest::from(state.to_bytes())
}

/// Compute the digest of `message`.
pub fn hash(message: &[u8]) -> Result<Digest> {
    let padded = pad(message)?;
    Ok(fold(&padded))
}

/// Digest computation that reuses one padding buffer across calls.
///
/// Hashing takes `&mut self`, so a `Framer` belongs to one thread at a time;
/// give each worker its own.
#[derive(Debug, Default, Clone)]
pub struct Framer {
    scratch: Vec<u8>,
}

impl Framer {
    /// Create a framer with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a framer whose scratch buffer already fits messages up to
    /// `message_len` bytes.
    pub fn with_capacity(message_len: usize) -> Result<Self> {
        let mut scratch = Vec::new();
        reserve_padded(&mut scratch, message_len)?;
        Ok(Self { scratch })
    }

    /// Compute the digest of `message`.
    pub fn hash(&mut self, message: &[u8]) -> Result<Digest> {
        pad_into(message, &mut self.scratch)?;
        Ok(fold(&self.scratch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_len_boundaries() {
        assert_eq!(padded_len(0), Some(64));
        assert_eq!(padded_len(55), Some(64));
        assert_eq!(padded_len(56), Some(128));
        assert_eq!(padded_len(63), Some(128));
        assert_eq!(padded_len(64), Some(128));
        assert_eq!(padded_len(119), Some(128));
        assert_eq!(padded_len(120), Some(192));
    }

    #[test]
    fn padded_len_near_usize_max() {
        assert_eq!(padded_len(usize::MAX), None);
        assert_eq!(padded_len(usize::MAX - 3), None);
        assert_eq!(padded_len(usize::MAX - 8), None);
        let largest = usize::MAX - LENGTH_FIELD_LEN - BLOCK_LEN;
        let padded = padded_len(largest).unwrap();
        assert_eq!(padded % BLOCK_LEN, 0);
        assert!(padded > largest);
    }

    #[test]
    fn with_capacity_reports_allocation_failure() {
        assert!(matches!(
            Framer::with_capacity(usize::MAX / 2),
            Err(Error::Allocation { .. })
        ));
        assert!(matches!(
            Framer::with_capacity(usize::MAX),
            Err(Error::MessageTooLong { .. })
        ));
    }

    #[test]
    fn with_capacity_presizes_scratch() {
        let framer = Framer::with_capacity(100).unwrap();
        assert!(framer.scratch.capacity() >= 128);
    }

    #[test]
    fn pad_layout_for_abc() {
        let padded = pad(b"abc").unwrap();
        assert_eq!(padded.len(), 64);
        assert_eq!(&padded[..3], b"abc");
        assert_eq!(padded[3], 0x80);
        assert!(padded[4..56].iter().all(|b| *b == 0));
        assert_eq!(&padded[56..], &24u64.to_le_bytes());
    }

    #[test]
    fn pad_fifty_six_bytes_spills_into_second_block() {
        let message = [b'x'; 56];
        let padded = pad(&message).unwrap();
        assert_eq!(padded.len(), 128);
        assert_eq!(padded[56], 0x80);
        assert!(padded[57..120].iter().all(|b| *b == 0));
        assert_eq!(&padded[120..], &448u64.to_le_bytes());
    }

    #[test]
    fn pad_keeps_embedded_nul_bytes() {
        let padded = pad(&[0, 0, 0xFF, 0]).unwrap();
        assert_eq!(&padded[..5], &[0, 0, 0xFF, 0, 0x80]);
        assert_eq!(&padded[56..], &32u64.to_le_bytes());
    }

    #[test]
    fn framer_matches_free_function_across_reuse() {
        let mut framer = Framer::with_capacity(8).unwrap();
        for message in [&b"a much longer message that spans two blocks of input....."[..], b"", b"abc"] {
            assert_eq!(framer.hash(message).unwrap(), hash(message).unwrap());
        }
    }

    #[test]
    fn bit_length_of_small_message() {
        assert_eq!(bit_length(0).unwrap(), 0);
        assert_eq!(bit_length(64).unwrap(), 512);
    }
}
