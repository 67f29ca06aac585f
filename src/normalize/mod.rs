//! Duration field normalization
//!
//! The metrics file stores durations as a number immediately followed by a
//! unit suffix (`"123.4ms"`). The normalizer splits the trailing unit from the
//! numeric prefix with an explicit tokenizer and parses the prefix.
//!
//! Unlike the structural fields, duration is optional enrichment: a value that
//! cannot be normalized becomes the not-available marker (`None`) and is
//! logged, never returned as an error.
//!
//! ```rust
//! use pow_analytics::normalize::DurationNormalizer;
//!
//! let normalizer = DurationNormalizer::new();
//! assert_eq!(normalizer.normalize_value("1500ms"), Some(1500.0));
//! assert_eq!(normalizer.normalize_value("abcms"), None);
//! assert_eq!(normalizer.normalize_value(""), None);
//! ```

use serde::{Deserialize, Serialize};

use crate::record::MetricRecord;

/// Default duration unit suffix
pub const DEFAULT_SUFFIX: &str = "ms";

/// How units other than the configured suffix are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPolicy {
    /// Only the configured suffix (or no suffix) is accepted
    #[default]
    Strict,
    /// `ns`, `µs`/`us`, `ms` and `s` are converted to milliseconds
    Convert,
}

/// Counts produced by one normalization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOutcome {
    /// Records whose duration parsed to a finite number
    pub normalized: usize,
    /// Records marked not-available
    pub not_available: usize,
}

impl NormalizeOutcome {
    /// Total records visited
    #[must_use]
    pub const fn total(&self) -> usize {
        self.normalized + self.not_available
    }
}

/// Split `raw` into `(numeric_prefix, unit)`.
///
/// The unit is the trailing run of characters that are neither ASCII digits
/// nor `.`; the prefix is everything before it. A value without any digit is
/// all unit.
#[must_use]
pub fn split_unit(raw: &str) -> (&str, &str) {
    let cut = raw
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_ascii_digit() || *ch == '.')
        .map_or(0, |(idx, ch)| idx + ch.len_utf8());

    raw.split_at(cut)
}

/// Duration normalizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationNormalizer {
    suffix: String,
    policy: UnitPolicy,
}

impl Default for DurationNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DurationNormalizer {
    /// Strict normalizer for the `ms` suffix
    #[must_use]
    pub fn new() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            policy: UnitPolicy::Strict,
        }
    }

    /// Use a different fixed suffix (strict mode only)
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the unit policy
    #[must_use]
    pub const fn policy(mut self, policy: UnitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Normalize a single raw duration.
    ///
    /// Returns `None` (not available) for empty text, an unexpected unit, a
    /// prefix that is not a number, or a non-finite number.
    #[must_use]
    pub fn normalize_value(&self, raw: &str) -> Option<f64> {
        let (number, unit) = split_unit(raw.trim());
        let (mul, div) = self.scale_for(unit)?;

        let value = number.parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }

        Some(value * mul / div)
    }

    /// `(multiplier, divisor)` from `unit` to the output unit, `None` if the
    /// unit is not accepted.
    fn scale_for(&self, unit: &str) -> Option<(f64, f64)> {
        match self.policy {
            UnitPolicy::Strict => (unit.is_empty() || unit == self.suffix).then_some((1.0, 1.0)),
            UnitPolicy::Convert => match unit {
                "" | "ms" => Some((1.0, 1.0)),
                "ns" => Some((1.0, 1_000_000.0)),
                "µs" | "us" => Some((1.0, 1_000.0)),
                "s" => Some((1_000.0, 1.0)),
                _ => None,
            },
        }
    }

    /// Normalize every record's duration in place.
    ///
    /// Only `duration_ms` is written; record order and count are untouched.
    pub fn normalize(&self, records: &mut [MetricRecord]) -> NormalizeOutcome {
        let mut outcome = NormalizeOutcome::default();

        for record in records.iter_mut() {
            let value = self.normalize_value(record.duration_raw());
            if value.is_some() {
                outcome.normalized += 1;
            } else {
                outcome.not_available += 1;
                tracing::warn!(
                    block_index = record.block_index(),
                    source = %record.source(),
                    raw = record.duration_raw(),
                    "duration not available"
                );
            }
            record.set_duration_ms(value);
        }

        tracing::debug!(
            normalized = outcome.normalized,
            not_available = outcome.not_available,
            "normalized durations"
        );
        outcome
    }
}
