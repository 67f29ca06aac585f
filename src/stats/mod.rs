//! Aggregation: whole-dataset and per-source descriptive statistics
//!
//! Records expose their numeric columns through the [`Tabular`] trait. A
//! column value of `None` (the not-available marker) is skipped for that
//! column only: the record still counts toward every other column and still
//! belongs to its group.
//!
//! Groups are ordered by first appearance in the input, not sorted.
//! [`describe_grouped_with`] additionally takes the groups the caller expects,
//! so a source with no records still reports a count of 0.
//!
//! Statistics are computed in `f64`. Integer columns above 2^53 (nonces
//! spanning the `u64` range, for instance) are rounded to the nearest
//! representable value before aggregation, which can shift min, max and the
//! quartiles by up to one unit in the last place.
//!
//! ```rust
//! use pow_analytics::record::MetricRecord;
//! use pow_analytics::source::Source;
//! use pow_analytics::stats::{describe_grouped, MetricField};
//!
//! let records = vec![
//!     MetricRecord::new(0, "Quantum", 100, "12.5ms"),
//!     MetricRecord::new(1, "Classical", 80, "9.0ms"),
//! ];
//!
//! let grouped = describe_grouped(&records, &[MetricField::Iterations]);
//! let quantum = grouped.get(&Source::Quantum).unwrap();
//! assert_eq!(quantum.get("Iterations").unwrap().mean, Some(100.0));
//! ```

mod summary;

pub use summary::{describe, percentile, Summary};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::{MetricRecord, NonceRecord};
use crate::source::Source;

/// A record type with named numeric columns and a grouping key.
pub trait Tabular {
    /// Column selector
    type Field: Copy + fmt::Display;

    /// Numeric value of `field`, `None` if not available.
    fn value(&self, field: Self::Field) -> Option<f64>;

    /// Grouping key
    fn group_key(&self) -> &Source;
}

/// Numeric columns of [`MetricRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    /// Block index
    BlockIndex,
    /// Proof-of-work iterations
    Iterations,
    /// Normalized duration in milliseconds
    DurationMs,
}

impl MetricField {
    /// Every metric column, in file order
    pub const ALL: [Self; 3] = [Self::BlockIndex, Self::Iterations, Self::DurationMs];

    /// Column name used in tables
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BlockIndex => "Block Index",
            Self::Iterations => "Iterations",
            Self::DurationMs => "Duration",
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric columns of [`NonceRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonceField {
    /// Nonce value, widened to `f64` (inexact above 2^53)
    Nonce,
}

impl NonceField {
    /// Every nonce column
    pub const ALL: [Self; 1] = [Self::Nonce];
}

impl fmt::Display for NonceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Nonce")
    }
}

#[allow(clippy::cast_precision_loss)]
impl Tabular for MetricRecord {
    type Field = MetricField;

    fn value(&self, field: MetricField) -> Option<f64> {
        match field {
            MetricField::BlockIndex => Some(self.block_index() as f64),
            MetricField::Iterations => Some(self.iterations() as f64),
            MetricField::DurationMs => self.duration_ms(),
        }
    }

    fn group_key(&self) -> &Source {
        self.source()
    }
}

#[allow(clippy::cast_precision_loss)]
impl Tabular for NonceRecord {
    type Field = NonceField;

    fn value(&self, field: NonceField) -> Option<f64> {
        match field {
            NonceField::Nonce => Some(self.nonce() as f64),
        }
    }

    fn group_key(&self) -> &Source {
        self.source()
    }
}

/// Summary of one named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name
    pub field: String,
    /// Statistics over the column's available values
    pub summary: Summary,
}

/// One summary per requested column, in request order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescribeTable {
    columns: Vec<ColumnSummary>,
}

impl DescribeTable {
    /// Columns in request order
    #[must_use]
    pub fn columns(&self) -> &[ColumnSummary] {
        &self.columns
    }

    /// Summary for a column by name
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Summary> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| &c.summary)
    }
}

/// Statistics for one source group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group key
    pub source: Source,
    /// Records in the group, regardless of value availability
    pub rows: usize,
    /// Per-column statistics
    pub table: DescribeTable,
}

/// Per-source statistics, groups in first-appearance order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedDescribe {
    groups: Vec<GroupSummary>,
}

impl GroupedDescribe {
    /// Groups in first-appearance order
    #[must_use]
    pub fn groups(&self) -> &[GroupSummary] {
        &self.groups
    }

    /// Table for one source, `None` if the source never appeared
    #[must_use]
    pub fn get(&self, source: &Source) -> Option<&DescribeTable> {
        self.groups
            .iter()
            .find(|g| &g.source == source)
            .map(|g| &g.table)
    }

    /// Group keys in first-appearance order
    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.groups.iter().map(|g| &g.source)
    }
}

fn table_of<R: Tabular>(records: &[&R], fields: &[R::Field]) -> DescribeTable {
    let columns = fields
        .iter()
        .map(|&field| {
            let values: Vec<f64> = records.iter().filter_map(|r| r.value(field)).collect();
            ColumnSummary {
                field: field.to_string(),
                summary: describe(&values),
            }
        })
        .collect();

    DescribeTable { columns }
}

/// Whole-dataset statistics for `fields`.
#[must_use]
pub fn describe_table<R: Tabular>(records: &[R], fields: &[R::Field]) -> DescribeTable {
    let refs: Vec<&R> = records.iter().collect();
    table_of(&refs, fields)
}

/// Per-source statistics for `fields`, groups in first-appearance order.
#[must_use]
pub fn describe_grouped<R: Tabular>(records: &[R], fields: &[R::Field]) -> GroupedDescribe {
    describe_grouped_with(records, fields, &[])
}

/// Per-source statistics with a fixed set of expected groups.
///
/// The `expected` sources come first, in the given order, and are reported
/// even when no record carries them (every column then has count 0). Sources
/// found in `records` but not listed follow in first-appearance order.
#[must_use]
pub fn describe_grouped_with<R: Tabular>(
    records: &[R],
    fields: &[R::Field],
    expected: &[Source],
) -> GroupedDescribe {
    let mut index: FxHashMap<&Source, usize> = FxHashMap::default();
    let mut buckets: Vec<(&Source, Vec<&R>)> = Vec::new();

    for key in expected.iter().chain(records.iter().map(R::group_key)) {
        index.entry(key).or_insert_with(|| {
            buckets.push((key, Vec::new()));
            buckets.len() - 1
        });
    }
    for record in records {
        let slot = index[record.group_key()];
        buckets[slot].1.push(record);
    }

    tracing::debug!(records = records.len(), groups = buckets.len(), "grouped describe");

    let groups = buckets
        .into_iter()
        .map(|(source, members)| GroupSummary {
            source: source.clone(),
            rows: members.len(),
            table: table_of(&members, fields),
        })
        .collect();

    GroupedDescribe { groups }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &DescribeTable) -> fmt::Result {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| c.field.len().max(12) + 2)
        .collect();

    write!(f, "{:<6}", "")?;
    for (column, width) in table.columns.iter().zip(&widths) {
        write!(f, "{:>width$}", column.field, width = *width)?;
    }
    writeln!(f)?;

    for row in 0..8 {
        let label = Summary::empty().rows()[row].0;
        write!(f, "{label:<6}")?;
        for (column, width) in table.columns.iter().zip(&widths) {
            match column.summary.rows()[row].1 {
                Some(value) => write!(f, "{value:>width$.6}", width = *width)?,
                None => write!(f, "{:>width$}", "NaN", width = *width)?,
            }
        }
        writeln!(f)?;
    }

    Ok(())
}

impl fmt::Display for DescribeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, self)
    }
}

impl fmt::Display for GroupedDescribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, group) in self.groups.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Source: {}", group.source)?;
            write_table(f, &group.table)?;
        }
        Ok(())
    }
}
