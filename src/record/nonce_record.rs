//! Nonce rows (as parsed) and nonce records (after provenance tagging)

use serde::{Deserialize, Serialize};

use super::{parse_int, RecordSchema};
use crate::source::Source;
use crate::Result;

/// A single nonce value as read from a nonce file. Carries no source label;
/// the label comes from which file it was read from (see [`crate::merge`]).
///
/// Stored as `i128` so that both the full `u64` range written by the miner
/// and negative values from other producers parse exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonceRow {
    nonce: i128,
}

impl NonceRow {
    /// Wrap a raw nonce value.
    #[must_use]
    pub const fn new(nonce: i128) -> Self {
        Self { nonce }
    }

    /// Get the nonce value.
    #[must_use]
    pub const fn nonce(&self) -> i128 {
        self.nonce
    }
}

impl From<i128> for NonceRow {
    fn from(nonce: i128) -> Self {
        Self::new(nonce)
    }
}

impl RecordSchema for NonceRow {
    const FIELDS: &'static [&'static str] = &["nonce"];

    fn from_fields(line: usize, fields: &[&str]) -> Result<Self> {
        parse_int(line, "nonce", fields[0]).map(Self::new)
    }
}

/// A nonce tagged with the arm that generated it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonceRecord {
    nonce: i128,
    source: Source,
}

impl NonceRecord {
    /// Create a tagged nonce record.
    #[must_use]
    pub fn new(nonce: i128, source: impl Into<Source>) -> Self {
        Self {
            nonce,
            source: source.into(),
        }
    }

    /// Get the nonce value.
    #[must_use]
    pub const fn nonce(&self) -> i128 {
        self.nonce
    }

    /// Get the source label.
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }
}
