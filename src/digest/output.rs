//! The 128-bit digest value and its hex rendering.

use std::fmt;
use std::str::FromStr;

use super::DIGEST_LEN;
use super::error::{Error, Result};
use super::framer;

/// Length of the hex rendering of a digest
pub const HEX_LEN: usize = DIGEST_LEN * 2;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A finished 128-bit digest.
///
/// Byte 0 renders first, so `Display` gives the conventional 32-digit
/// lowercase form (`d41d8cd98f00b204e9800998ecf8427e` for empty input).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Hash `message`. Equivalent to [`crate::digest`].
    pub fn compute(message: &[u8]) -> Result<Self> {
        framer::hash(message)
    }

    /// Borrow the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Consume into the raw digest bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Render as 32 lowercase hex digits.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }

    /// Render as 32 lowercase ASCII hex digits without allocating.
    #[must_use]
    pub fn to_hex_bytes(&self) -> [u8; HEX_LEN] {
        let mut out = [0u8; HEX_LEN];
        for (slot, nibble) in out.iter_mut().zip(self.nibbles()) {
            *slot = HEX_DIGITS[usize::from(nibble)];
        }
        out
    }

    /// Hex digits in rendering order, each as a value in `0..=15`.
    pub fn nibbles(&self) -> impl Iterator<Item = u8> + use<> {
        let bytes = self.0;
        bytes.into_iter().flat_map(|byte| [byte >> 4, byte & 0x0F])
    }

    /// The hex digit at `index` (0 is the first rendered digit).
    #[must_use]
    pub fn nibble(&self, index: usize) -> Option<u8> {
        let byte = *self.0.get(index / 2)?;
        Some(if index % 2 == 0 { byte >> 4 } else { byte & 0x0F })
    }

    /// Number of leading `0` hex digits.
    #[must_use]
    pub fn leading_zero_nibbles(&self) -> usize {
        self.nibbles().take_while(|nibble| *nibble == 0).count()
    }

    /// Digit of the first run of at least `len` identical consecutive hex digits.
    #[must_use]
    pub fn first_run(&self, len: usize) -> Option<u8> {
        if len == 0 {
            return None;
        }
        let mut current = None;
        let mut run = 0;
        for nibble in self.nibbles() {
            if current == Some(nibble) {
                run += 1;
            } else {
                current = Some(nibble);
                run = 1;
            }
            if run == len {
                return current;
            }
        }
        None
    }

    /// Whether `digit` appears at least `len` times in a row.
    ///
    /// Longer runs match too: a run of six `7`s contains a run of five.
    #[must_use]
    pub fn has_run(&self, digit: u8, len: usize) -> bool {
        if len == 0 {
            return true;
        }
        let mut run = 0;
        for nibble in self.nibbles() {
            run = if nibble == digit { run + 1 } else { 0 };
            if run >= len {
                return true;
            }
        }
        false
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self:x})")
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidHex {
            input: s.to_owned(),
        };
        if s.len() != HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut bytes = [0u8; DIGEST_LEN];
        for (idx, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[idx * 2..idx * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
