//! Provenance tagging and ordered merge of nonce datasets
//!
//! Nonce files carry no label: the label is decided by which file a value was
//! read from. Tagging never looks at the nonce values, and merging is a plain
//! concatenation (first dataset in order, then the second in order).
//!
//! ```rust
//! use pow_analytics::merge::merge_tagged;
//! use pow_analytics::record::NonceRow;
//! use pow_analytics::source::Source;
//!
//! let quantum = vec![NonceRow::new(5), NonceRow::new(7)];
//! let classical = vec![NonceRow::new(9)];
//!
//! let merged = merge_tagged(quantum, classical);
//! assert_eq!(merged.len(), 3);
//! assert_eq!(merged[2].source(), &Source::Classical);
//! ```

use crate::record::{NonceRecord, NonceRow};
use crate::source::Source;
use crate::{Error, Result};

/// A parsed nonce dataset together with its provenance label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedDataset {
    source: Source,
    records: Vec<NonceRecord>,
}

impl TaggedDataset {
    /// Tag every row with `source`.
    #[must_use]
    pub fn new(source: impl Into<Source>, rows: Vec<NonceRow>) -> Self {
        let source = source.into();
        let records = tag(rows, &source);
        Self { source, records }
    }

    /// Provenance label shared by every record
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// Tagged records, in input order
    #[must_use]
    pub fn records(&self) -> &[NonceRecord] {
        &self.records
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Attach `source` to each row, preserving order.
#[must_use]
pub fn tag(rows: Vec<NonceRow>, source: &Source) -> Vec<NonceRecord> {
    rows.into_iter()
        .map(|row| NonceRecord::new(row.nonce(), source.clone()))
        .collect()
}

/// Concatenate two label-disjoint datasets: all of `first`, then all of
/// `second`, each in original order.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if both datasets carry the same label.
pub fn merge(first: TaggedDataset, second: TaggedDataset) -> Result<Vec<NonceRecord>> {
    if first.source == second.source {
        return Err(Error::InvalidInput(format!(
            "cannot merge two datasets labelled {}",
            first.source
        )));
    }

    tracing::debug!(
        first = %first.source,
        first_len = first.len(),
        second = %second.source,
        second_len = second.len(),
        "merging nonce datasets"
    );

    let mut merged = first.records;
    merged.extend(second.records);
    Ok(merged)
}

/// Tag quantum and classical rows and merge them, quantum first.
#[must_use]
pub fn merge_tagged(quantum: Vec<NonceRow>, classical: Vec<NonceRow>) -> Vec<NonceRecord> {
    let mut merged = tag(quantum, &Source::Quantum);
    merged.extend(tag(classical, &Source::Classical));
    merged
}
