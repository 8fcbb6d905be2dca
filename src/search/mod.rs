//! Salted brute-force candidate search
//!
//! Callers hash `salt ++ decimal(index)` for ascending indices.
//! [`ZeroPrefixSearch`] keeps the digests with a run of leading zero hex
//! digits; [`KeySearch`] keeps the one-time-pad keys. Both walk indices
//! lazily, so dropping the iterator cancels between candidates.

mod config;
mod keys;
mod salted;

pub use config::SearchConfig;
pub use keys::{Key, KeySearch};
pub use salted::{SaltedHasher, stretch};

use tracing::{debug, instrument, trace};

use crate::digest::{Digest, Result};

/// A candidate index whose digest met the zero-prefix requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Candidate index appended to the salt.
    pub index: u64,
    /// Digest of the candidate (after stretching, if configured).
    pub digest: Digest,
}

impl Hit {
    /// First hex digit after the required zero prefix.
    #[must_use]
    pub fn digit_after_prefix(&self, zero_nibbles: usize) -> Option<u8> {
        self.digest.nibble(zero_nibbles)
    }
}

/// Lazy iterator over search hits in ascending index order.
#[derive(Debug)]
pub struct ZeroPrefixSearch {
    hasher: SaltedHasher,
    next: Option<u64>,
    end: Option<u64>,
    zero_nibbles: usize,
    stretch_rounds: u32,
    hashed: u64,
}

impl ZeroPrefixSearch {
    /// Start a search from `config`.
    #[instrument(level = "trace", skip(config), fields(start = config.start, zero_nibbles = config.zero_nibbles))]
    pub fn new(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            hasher: SaltedHasher::new(&config.salt),
            next: Some(config.start),
            end: config.limit.map(|limit| config.start.saturating_add(limit)),
            zero_nibbles: config.zero_nibbles,
            stretch_rounds: config.stretch_rounds,
            hashed: 0,
        })
    }

    /// Number of candidates hashed so far.
    #[must_use]
    pub fn hashed(&self) -> u64 {
        self.hashed
    }

    /// Index the next call to `next` will hash first, if any remain.
    #[must_use]
    pub fn next_index(&self) -> Option<u64> {
        self.next.filter(|index| self.end.is_none_or(|end| *index < end))
    }

    fn digest_at(&mut self, index: u64) -> Result<Digest> {
        self.hashed += 1;
        if self.stretch_rounds == 0 {
            self.hasher.hash_index(index)
        } else {
            self.hasher.hash_stretched(index, self.stretch_rounds)
        }
    }
}

impl Iterator for ZeroPrefixSearch {
    type Item = Result<Hit>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.next_index() {
            self.next = index.checked_add(1);
            let digest = match self.digest_at(index) {
                Ok(digest) => digest,
                Err(err) => {
                    debug!(index, error = %err, "search aborted");
                    self.next = None;
                    return Some(Err(err));
                }
            };
            if digest.leading_zero_nibbles() >= self.zero_nibbles {
                trace!(index, %digest, "search hit");
                return Some(Ok(Hit { index, digest }));
            }
        }
        debug!(hashed = self.hashed, "search exhausted");
        None
    }
}
