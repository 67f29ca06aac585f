//! Columnar views of the normalized tables (Arrow)
//!
//! The pipeline works on typed records; downstream consumers that want plain
//! columns (chart renderers, notebooks, Parquet writers) get an Arrow
//! [`RecordBatch`] per table. The not-available duration marker becomes an
//! Arrow null, so it is never confused with zero.
//!
//! ```text
//! metrics:  block_index UInt64 | source Utf8 | iterations UInt64 | duration_ms Float64 (nullable)
//! nonces:   nonce Decimal128(38, 0) | source Utf8
//! ```

use arrow::array::{ArrayRef, Decimal128Array, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::record::{MetricRecord, NonceRecord};
use crate::Result;

/// Schema of the metrics batch
#[must_use]
pub fn metrics_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("block_index", DataType::UInt64, false),
        Field::new("source", DataType::Utf8, false),
        Field::new("iterations", DataType::UInt64, false),
        Field::new("duration_ms", DataType::Float64, true),
    ]))
}

/// Precision of the nonce column; 38 digits hold any `i128`.
const NONCE_PRECISION: u8 = 38;

/// Schema of the nonce batch. Nonces span the full `u64` range and may be
/// negative, so the column is an integer-valued decimal.
#[must_use]
pub fn nonces_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("nonce", DataType::Decimal128(NONCE_PRECISION, 0), false),
        Field::new("source", DataType::Utf8, false),
    ]))
}

/// Convert normalized metric records to a single batch, preserving order.
///
/// # Errors
///
/// Returns [`crate::Error::Arrow`] if the batch cannot be assembled
pub fn metrics_batch(records: &[MetricRecord]) -> Result<RecordBatch> {
    let block_index = UInt64Array::from_iter_values(records.iter().map(MetricRecord::block_index));
    let source = StringArray::from_iter_values(records.iter().map(|r| r.source().as_str()));
    let iterations = UInt64Array::from_iter_values(records.iter().map(MetricRecord::iterations));
    let duration = records
        .iter()
        .map(MetricRecord::duration_ms)
        .collect::<Float64Array>();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(block_index),
        Arc::new(source),
        Arc::new(iterations),
        Arc::new(duration),
    ];

    Ok(RecordBatch::try_new(metrics_schema(), columns)?)
}

/// Convert merged nonce records to a single batch, preserving order.
///
/// # Errors
///
/// Returns [`crate::Error::Arrow`] if the batch cannot be assembled
pub fn nonces_batch(records: &[NonceRecord]) -> Result<RecordBatch> {
    let nonce = Decimal128Array::from_iter_values(records.iter().map(NonceRecord::nonce))
        .with_precision_and_scale(NONCE_PRECISION, 0)?;
    let source = StringArray::from_iter_values(records.iter().map(|r| r.source().as_str()));

    let columns: Vec<ArrayRef> = vec![Arc::new(nonce), Arc::new(source)];

    Ok(RecordBatch::try_new(nonces_schema(), columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::DurationNormalizer;
    use crate::source::Source;
    use arrow::array::Array;

    #[test]
    fn test_metrics_batch_nulls_for_not_available() {
        let mut records = vec![
            MetricRecord::new(0, "Quantum", 100, "12.5ms"),
            MetricRecord::new(1, "Classical", 80, "abcms"),
        ];
        DurationNormalizer::new().normalize(&mut records);

        let batch = metrics_batch(&records).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 4);

        let duration = batch
            .column(3)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert!((duration.value(0) - 12.5).abs() < f64::EPSILON);
        assert!(duration.is_null(1));
        assert_eq!(duration.null_count(), 1);

        let source = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(source.value(1), "Classical");
    }

    #[test]
    fn test_nonces_batch_preserves_order() {
        let records = vec![
            NonceRecord::new(5, Source::Quantum),
            NonceRecord::new(-9, Source::Classical),
            NonceRecord::new(i128::from(u64::MAX), Source::Classical),
        ];
        let batch = nonces_batch(&records).unwrap();

        let nonce = batch
            .column(0)
            .as_any()
            .downcast_ref::<Decimal128Array>()
            .unwrap();
        assert_eq!(nonce.values().to_vec(), vec![5, -9, i128::from(u64::MAX)]);
    }

    #[test]
    fn test_empty_batches() {
        assert_eq!(metrics_batch(&[]).unwrap().num_rows(), 0);
        assert_eq!(nonces_batch(&[]).unwrap().num_rows(), 0);
    }
}
