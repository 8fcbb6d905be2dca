//! One-time-pad key search: a candidate whose first run of digits is echoed
//! by a longer run of the same digit shortly after it.

use std::collections::VecDeque;

use tracing::{debug, instrument, trace};

use super::config::SearchConfig;
use super::salted::SaltedHasher;
use crate::digest::{Digest, Result};

/// A confirmed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    /// Candidate index of the key.
    pub index: u64,
    /// Digest of the key candidate.
    pub digest: Digest,
    /// Hex digit of the key's first run.
    pub digit: u8,
    /// First later index whose digest confirmed the key.
    pub confirmed_by: u64,
}

/// Lazy iterator over keys in ascending index order.
///
/// Digests inside the confirmation window are cached, so every index is
/// hashed (and stretched) once.
#[derive(Debug)]
pub struct KeySearch {
    hasher: SaltedHasher,
    next: Option<u64>,
    end: Option<u64>,
    stretch_rounds: u32,
    run_len: usize,
    confirm_run_len: usize,
    window: u64,
    base: u64,
    lookahead: VecDeque<Digest>,
    hashed: u64,
}

impl KeySearch {
    /// Start a key search from `config`.
    #[instrument(level = "trace", skip(config), fields(start = config.start, stretch_rounds = config.stretch_rounds))]
    pub fn new(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            hasher: SaltedHasher::new(&config.salt),
            next: Some(config.start),
            end: config.limit.map(|limit| config.start.saturating_add(limit)),
            stretch_rounds: config.stretch_rounds,
            run_len: config.run_len,
            confirm_run_len: config.confirm_run_len,
            window: config.window,
            base: config.start,
            lookahead: VecDeque::new(),
            hashed: 0,
        })
    }

    /// Number of distinct indices hashed so far, lookahead included.
    #[must_use]
    pub fn hashed(&self) -> u64 {
        self.hashed
    }

    /// Candidate index the next call to `next` will examine first, if any remain.
    #[must_use]
    pub fn next_index(&self) -> Option<u64> {
        self.next.filter(|index| self.end.is_none_or(|end| *index < end))
    }

    fn discard_before(&mut self, index: u64) {
        while self.base < index {
            if self.lookahead.pop_front().is_none() {
                self.base = index;
                break;
            }
            self.base += 1;
        }
    }

    // Offsets stay within the window, which is far below `usize::MAX`.
    #[allow(clippy::cast_possible_truncation)]
    fn digest_at(&mut self, index: u64) -> Result<Digest> {
        let offset = (index - self.base) as usize;
        while self.lookahead.len() <= offset {
            let next = self.base + self.lookahead.len() as u64;
            let digest = if self.stretch_rounds == 0 {
                self.hasher.hash_index(next)?
            } else {
                self.hasher.hash_stretched(next, self.stretch_rounds)?
            };
            self.hashed += 1;
            self.lookahead.push_back(digest);
        }
        Ok(self.lookahead[offset])
    }

    fn confirmation(&mut self, index: u64, digit: u8) -> Result<Option<u64>> {
        for step in 1..=self.window {
            let Some(ahead) = index.checked_add(step) else {
                break;
            };
            if self.digest_at(ahead)?.has_run(digit, self.confirm_run_len) {
                return Ok(Some(ahead));
            }
        }
        Ok(None)
    }

    fn examine(&mut self, index: u64) -> Result<Option<Key>> {
        self.discard_before(index);
        let digest = self.digest_at(index)?;
        let Some(digit) = digest.first_run(self.run_len) else {
            return Ok(None);
        };
        Ok(self.confirmation(index, digit)?.map(|confirmed_by| Key {
            index,
            digest,
            digit,
            confirmed_by,
        }))
    }
}

impl Iterator for KeySearch {
    type Item = Result<Key>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.next_index() {
            self.next = index.checked_add(1);
            match self.examine(index) {
                Ok(Some(key)) => {
                    trace!(index, digit = key.digit, confirmed_by = key.confirmed_by, "key found");
                    return Some(Ok(key));
                }
                Ok(None) => {}
                Err(err) => {
                    debug!(index, error = %err, "key search aborted");
                    self.next = None;
                    return Some(Err(err));
                }
            }
        }
        debug!(hashed = self.hashed, "key search exhausted");
        None
    }
}
