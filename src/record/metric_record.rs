//! Metric Record - per-block mining metrics

use serde::{Deserialize, Serialize};

use super::{parse_int, RecordSchema};
use crate::source::Source;
use crate::{Error, Result};

/// One mined block: which arm mined it, how many hashing attempts it took and
/// how long it ran.
///
/// `duration_raw` is the text exactly as found in the file. `duration_ms` is
/// filled in by [`crate::normalize`]; `None` is the not-available marker and
/// is never conflated with zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRecord {
    block_index: u64,
    source: Source,
    iterations: u64,
    duration_raw: String,
    duration_ms: Option<f64>,
}

impl MetricRecord {
    /// Create a record with a not-yet-normalized duration.
    #[must_use]
    pub fn new(
        block_index: u64,
        source: impl Into<Source>,
        iterations: u64,
        duration_raw: impl Into<String>,
    ) -> Self {
        Self {
            block_index,
            source: source.into(),
            iterations,
            duration_raw: duration_raw.into(),
            duration_ms: None,
        }
    }

    /// Get the block index.
    #[must_use]
    pub const fn block_index(&self) -> u64 {
        self.block_index
    }

    /// Get the source label.
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// Get the number of proof-of-work iterations.
    #[must_use]
    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Get the duration text as it appeared in the input.
    #[must_use]
    pub fn duration_raw(&self) -> &str {
        &self.duration_raw
    }

    /// Get the normalized duration in milliseconds, `None` if not available.
    #[must_use]
    pub const fn duration_ms(&self) -> Option<f64> {
        self.duration_ms
    }

    pub(crate) fn set_duration_ms(&mut self, duration_ms: Option<f64>) {
        self.duration_ms = duration_ms;
    }
}

impl RecordSchema for MetricRecord {
    const FIELDS: &'static [&'static str] = &["block_index", "source", "iterations", "duration"];

    fn from_fields(line: usize, fields: &[&str]) -> Result<Self> {
        let block_index = parse_int(line, "block_index", fields[0])?;

        let source = fields[1];
        if source.is_empty() {
            return Err(Error::Parse {
                line,
                field: "source",
                value: String::new(),
            });
        }

        let iterations = parse_int(line, "iterations", fields[2])?;

        Ok(Self::new(block_index, source, iterations, fields[3]))
    }
}
