//! Search configuration

use crate::digest::{Error, HEX_LEN, Result};

/// Options for a salted zero-prefix search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Bytes prepended to every decimal candidate index.
    pub salt: Vec<u8>,
    /// First candidate index to hash.
    pub start: u64,
    /// Minimum number of leading zero hex digits for a hit.
    pub zero_nibbles: usize,
    /// Extra re-hashes of the lowercase hex text applied to every candidate.
    pub stretch_rounds: u32,
    /// Maximum number of candidate indices to examine.
    pub limit: Option<u64>,
    /// Key search: length of the run that makes a candidate.
    pub run_len: usize,
    /// Key search: length of the same-digit run that confirms a candidate.
    pub confirm_run_len: usize,
    /// Key search: how many following indices may confirm a candidate.
    pub window: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            salt: Vec::new(),
            start: 0,
            zero_nibbles: 5,
            stretch_rounds: 0,
            limit: None,
            run_len: 3,
            confirm_run_len: 5,
            window: 1000,
        }
    }
}

impl SearchConfig {
    /// Default configuration with the given salt.
    #[must_use]
    pub fn with_salt(salt: impl Into<Vec<u8>>) -> Self {
        Self {
            salt: salt.into(),
            ..Self::default()
        }
    }

    /// Check the configuration before a search starts.
    pub fn validate(&self) -> Result<()> {
        if self.zero_nibbles > HEX_LEN {
            return Err(Error::InvalidConfig(format!(
                "zero_nibbles is {} but a digest has only {HEX_LEN} hex digits",
                self.zero_nibbles
            )));
        }
        for (name, len) in [("run_len", self.run_len), ("confirm_run_len", self.confirm_run_len)] {
            if len == 0 || len > HEX_LEN {
                return Err(Error::InvalidConfig(format!(
                    "{name} is {len} but must be between 1 and {HEX_LEN}"
                )));
            }
        }
        if self.window == 0 {
            return Err(Error::InvalidConfig("window must be at least 1".to_owned()));
        }
        Ok(())
    }
}
