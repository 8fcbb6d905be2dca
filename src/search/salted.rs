//! Candidate construction: `salt ++ decimal(index)`, optionally key-stretched.

use crate::digest::{Digest, Framer, Result};

const MAX_DECIMAL_DIGITS: usize = 20;

// `value % 10` always fits in a digit.
#[allow(clippy::cast_possible_truncation)]
fn push_decimal(out: &mut Vec<u8>, mut value: u64) {
    let mut digits = [0u8; MAX_DECIMAL_DIGITS];
    let mut pos = digits.len();
    loop {
        pos -= 1;
        digits[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    out.extend_from_slice(&digits[pos..]);
}

/// Re-hash the lowercase hex rendering of `digest` `rounds` times.
pub fn stretch(digest: Digest, rounds: u32) -> Result<Digest> {
    let mut framer = Framer::new();
    stretch_with(&mut framer, digest, rounds)
}

fn stretch_with(framer: &mut Framer, mut digest: Digest, rounds: u32) -> Result<Digest> {
    for _ in 0..rounds {
        digest = framer.hash(&digest.to_hex_bytes())?;
    }
    Ok(digest)
}

/// Hashes salted candidates, reusing its candidate and padding buffers.
#[derive(Debug, Clone)]
pub struct SaltedHasher {
    salt_len: usize,
    candidate: Vec<u8>,
    framer: Framer,
}

impl SaltedHasher {
    /// Create a hasher for `salt`.
    #[must_use]
    pub fn new(salt: impl AsRef<[u8]>) -> Self {
        let salt = salt.as_ref();
        let mut candidate = Vec::with_capacity(salt.len() + MAX_DECIMAL_DIGITS);
        candidate.extend_from_slice(salt);
        Self {
            salt_len: salt.len(),
            candidate,
            framer: Framer::new(),
        }
    }

    /// The salt every candidate starts with.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.candidate[..self.salt_len]
    }

    /// Build the candidate bytes for `index`.
    pub fn candidate(&mut self, index: u64) -> &[u8] {
        self.candidate.truncate(self.salt_len);
        push_decimal(&mut self.candidate, index);
        &self.candidate
    }

    /// Digest of the candidate for `index`.
    pub fn hash_index(&mut self, index: u64) -> Result<Digest> {
        self.candidate(index);
        self.framer.hash(&self.candidate)
    }

    /// Digest of the candidate for `index`, re-hashed `rounds` more times.
    pub fn hash_stretched(&mut self, index: u64, rounds: u32) -> Result<Digest> {
        let digest = self.hash_index(index)?;
        stretch_with(&mut self.framer, digest, rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_appends_decimal_index() {
        let mut hasher = SaltedHasher::new("abc");
        assert_eq!(hasher.candidate(0), b"abc0");
        assert_eq!(hasher.candidate(3_231_929), b"abc3231929");
        assert_eq!(hasher.candidate(7), b"abc7");
        assert_eq!(hasher.candidate(u64::MAX), b"abc18446744073709551615");
        assert_eq!(hasher.salt(), b"abc");
    }

    #[test]
    fn push_decimal_writes_every_digit() {
        let mut out = Vec::new();
        push_decimal(&mut out, 0);
        push_decimal(&mut out, 9);
        push_decimal(&mut out, 1_234_567_890);
        assert_eq!(out, b"091234567890");
    }

    #[test]
    fn hash_index_matches_direct_digest() {
        let mut hasher = SaltedHasher::new("abc");
        let digest = hasher.hash_index(18).unwrap();
        assert_eq!(digest, Digest::compute(b"abc18").unwrap());
        assert_eq!(digest.to_hex(), "0034e0923cc38887a57bd7b1d4f953df");
    }

    #[test]
    fn zero_rounds_is_identity() {
        let digest = Digest::compute(b"abc0").unwrap();
        assert_eq!(stretch(digest, 0).unwrap(), digest);
    }

    #[test]
    fn one_round_hashes_hex_text() {
        let digest = Digest::compute(b"abc0").unwrap();
        let expected = Digest::compute(digest.to_hex().as_bytes()).unwrap();
        assert_eq!(stretch(digest, 1).unwrap(), expected);
    }

    #[test]
    fn stretched_index_finds_triple() {
        let mut hasher = SaltedHasher::new("abc");
        let digest = hasher.hash_stretched(5, 2016).unwrap();
        assert_eq!(digest.to_hex(), "953a419067abb0b5e142680d73522236");
        assert_eq!(digest.first_run(3), Some(2));
    }

    #[test]
    fn stretched_index_zero() {
        let mut hasher = SaltedHasher::new("abc");
        let digest = hasher.hash_stretched(0, 2016).unwrap();
        assert_eq!(digest.to_hex(), "a107ff634856bb300138cac6568c0f24");
    }
}
