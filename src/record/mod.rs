//! Record parsing: delimited text lines into typed rows
//!
//! ## Schemas
//!
//! ```text
//! metrics file:  block_index,source,iterations,duration_raw   -> MetricRecord
//! nonce file:    nonce                                         -> NonceRow
//! ```
//!
//! Parsing is strict (Poka-Yoke): a wrong field count or a non-numeric
//! integer column aborts the whole load with the offending line number and
//! field name. There is no skip-and-continue mode.
//!
//! ## Usage
//!
//! ```rust
//! use pow_analytics::record::{MetricRecord, NonceRow, RecordParser};
//!
//! let parser = RecordParser::new();
//! let metrics: Vec<MetricRecord> = parser.parse_str("0,Quantum,100,\"12.5ms\"\n")?;
//! assert_eq!(metrics[0].iterations(), 100);
//!
//! let nonces: Vec<NonceRow> = parser.parse_str("5\n7\n")?;
//! assert_eq!(nonces.len(), 2);
//! # Ok::<(), pow_analytics::Error>(())
//! ```

mod metric_record;
mod nonce_record;

pub use metric_record::MetricRecord;
pub use nonce_record::{NonceRecord, NonceRow};

use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// A fixed column layout that one input line is parsed into.
pub trait RecordSchema: Sized {
    /// Field names, in column order. Used for field-count checks and errors.
    const FIELDS: &'static [&'static str];

    /// Build a row from exactly `FIELDS.len()` cleaned fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if a required field cannot be coerced.
    fn from_fields(line: usize, fields: &[&str]) -> Result<Self>;
}

/// Parse an integer column, reporting the line and field on failure.
///
/// The target type decides the accepted range: `u64` columns reject a sign,
/// signed columns accept one.
///
/// # Errors
///
/// Returns [`Error::Parse`] for empty, out-of-range, fractional or
/// non-numeric text.
pub fn parse_int<T: FromStr>(line: usize, field: &'static str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| Error::Parse {
        line,
        field,
        value: value.to_string(),
    })
}

/// Parser options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    delimiter: char,
    has_header: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: false,
        }
    }
}

impl ParseOptions {
    /// Set the field delimiter (default `,`)
    #[must_use]
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Declare that the first non-blank line is a header and must be skipped
    #[must_use]
    pub const fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Configured delimiter
    #[must_use]
    pub const fn delimiter_char(&self) -> char {
        self.delimiter
    }

    /// Whether a header line is skipped
    #[must_use]
    pub const fn header(&self) -> bool {
        self.has_header
    }
}

/// Line-oriented record parser
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser {
    options: ParseOptions,
}

impl RecordParser {
    /// Create a parser with default options (comma-delimited, no header)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit options
    #[must_use]
    pub const fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse every data line of `reader` into `S`, preserving input order.
    ///
    /// Blank lines are skipped but still count toward line numbers, so errors
    /// point at the physical line in the file.
    ///
    /// # Errors
    ///
    /// - [`Error::FieldCount`] if a line has the wrong number of fields
    /// - [`Error::Parse`] if a required field cannot be coerced
    /// - [`Error::Io`] if reading fails
    pub fn parse_reader<S, R>(&self, reader: R) -> Result<Vec<S>>
    where
        S: RecordSchema,
        R: BufRead,
    {
        let mut rows = Vec::new();
        let mut header_pending = self.options.has_header;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            if line.trim().is_empty() {
                continue;
            }
            if header_pending {
                header_pending = false;
                tracing::debug!(line = line_no, header = %line, "skipping declared header");
                continue;
            }

            let fields = split_fields(&line, self.options.delimiter);
            if fields.len() != S::FIELDS.len() {
                return Err(Error::FieldCount {
                    line: line_no,
                    expected: S::FIELDS.len(),
                    found: fields.len(),
                });
            }

            rows.push(S::from_fields(line_no, &fields)?);
        }

        Ok(rows)
    }

    /// Parse an in-memory string
    ///
    /// # Errors
    ///
    /// Same as [`parse_reader`](Self::parse_reader)
    pub fn parse_str<S: RecordSchema>(&self, text: &str) -> Result<Vec<S>> {
        self.parse_reader(text.as_bytes())
    }

    /// Parse a whole file
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageError`] if the file cannot be opened, otherwise
    /// the same errors as [`parse_reader`](Self::parse_reader)
    pub fn parse_file<S, P>(&self, path: P) -> Result<Vec<S>>
    where
        S: RecordSchema,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::StorageError(format!("Failed to open {}: {e}", path.display()))
        })?;

        let rows = self.parse_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "parsed input file");
        Ok(rows)
    }
}

/// Split a line on `delimiter`, ignoring delimiters inside double quotes.
fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (idx, ch) in line.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(clean_field(&line[start..idx]));
            start = idx + ch.len_utf8();
        }
    }
    fields.push(clean_field(&line[start..]));

    fields
}

/// Trim whitespace and drop one layer of surrounding double quotes.
fn clean_field(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map_or(trimmed, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;

    #[test]
    fn test_split_fields_plain() {
        assert_eq!(split_fields("0,Quantum,100,12.5ms", ','), vec!["0", "Quantum", "100", "12.5ms"]);
    }

    #[test]
    fn test_split_fields_quoted() {
        assert_eq!(
            split_fields("0, Quantum ,100,\"12.5ms\"", ','),
            vec!["0", "Quantum", "100", "12.5ms"]
        );
        assert_eq!(split_fields("\"a,b\",c", ','), vec!["a,b", "c"]);
    }

    #[test]
    fn test_split_fields_empty_trailing() {
        assert_eq!(split_fields("1,Classical,80,", ','), vec!["1", "Classical", "80", ""]);
    }

    #[test]
    fn test_parse_metrics_preserves_order() {
        let text = "0,Quantum,100,\"12.5ms\"\n1,Classical,80,\"9.0ms\"\n";
        let rows: Vec<MetricRecord> = RecordParser::new().parse_str(text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].block_index(), 0);
        assert_eq!(rows[0].source(), &Source::Quantum);
        assert_eq!(rows[0].iterations(), 100);
        assert_eq!(rows[0].duration_raw(), "12.5ms");
        assert_eq!(rows[1].block_index(), 1);
        assert_eq!(rows[1].source(), &Source::Classical);
    }

    #[test]
    fn test_parse_skips_blank_lines_but_counts_them() {
        let text = "5\n\n7\n\nx\n";
        let err = RecordParser::new().parse_str::<NonceRow>(text).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 5, field: "nonce", .. }));
    }

    #[test]
    fn test_parse_crlf_terminators() {
        let rows: Vec<NonceRow> = RecordParser::new().parse_str("5\r\n7\r\n").unwrap();
        assert_eq!(rows.iter().map(NonceRow::nonce).collect::<Vec<_>>(), vec![5, 7]);
    }

    #[test]
    fn test_parse_negative_nonces() {
        let rows: Vec<NonceRow> = RecordParser::new().parse_str("-5\n7\n").unwrap();
        assert_eq!(rows.iter().map(NonceRow::nonce).collect::<Vec<_>>(), vec![-5, 7]);
    }

    #[test]
    fn test_wrong_field_count_is_fatal() {
        let text = "0,Quantum,100,12.5ms\n1,Classical,80\n";
        let err = RecordParser::new().parse_str::<MetricRecord>(text).unwrap_err();
        match err {
            Error::FieldCount { line, expected, found } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_iterations_is_fatal() {
        let err = RecordParser::new()
            .parse_str::<MetricRecord>("0,Quantum,many,12.5ms\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, field: "iterations", .. }));
    }

    #[test]
    fn test_undeclared_header_fails_at_line_one() {
        let text = "block_index,source,iterations,duration\n0,Quantum,100,12.5ms\n";
        let err = RecordParser::new().parse_str::<MetricRecord>(text).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, field: "block_index", .. }));
    }

    #[test]
    fn test_declared_header_is_skipped() {
        let text = "block_index,source,iterations,duration\n0,Quantum,100,12.5ms\n";
        let parser = RecordParser::with_options(ParseOptions::default().has_header(true));
        let rows: Vec<MetricRecord> = parser.parse_str(text).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = RecordParser::with_options(ParseOptions::default().delimiter(';'));
        let rows: Vec<MetricRecord> = parser.parse_str("3;Classical;12;4ms\n").unwrap();
        assert_eq!(rows[0].block_index(), 3);
        assert_eq!(rows[0].duration_raw(), "4ms");
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        let rows: Vec<NonceRow> = RecordParser::new().parse_str("").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        let err = RecordParser::new()
            .parse_file::<NonceRow, _>("/nonexistent/pow-analytics/nonces.csv")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
