//! Batch analysis pipeline
//!
//! ```text
//! metrics.csv ──parse──> MetricRecord ──normalize──> describe + describe by source
//! quantum_nonces.csv ──parse──┐
//!                             ├──tag + merge──> NonceRecord ──> describe by source
//! classical_nonces.csv ─parse─┘
//! ```
//!
//! Single-shot and synchronous: every file is read completely before any
//! statistics are computed, and any structural parse error aborts the run.

mod config;

pub use config::{AnalysisConfig, AnalysisConfigBuilder};

use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::fmt;

use crate::merge::{merge, TaggedDataset};
use crate::normalize::NormalizeOutcome;
use crate::presentation::{build_charts, present, Chart, Presenter};
use crate::record::{MetricRecord, NonceRecord, NonceRow};
use crate::source::Source;
use crate::stats::{
    describe_grouped, describe_grouped_with, describe_table, DescribeTable, GroupedDescribe,
    MetricField, NonceField,
};
use crate::{storage, Result};

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    metrics: Vec<MetricRecord>,
    nonces: Vec<NonceRecord>,
    normalization: NormalizeOutcome,
    metrics_summary: DescribeTable,
    metrics_by_source: GroupedDescribe,
    nonces_by_source: GroupedDescribe,
}

impl AnalysisReport {
    /// Aggregate already-loaded, normalized data.
    #[must_use]
    pub fn from_records(
        metrics: Vec<MetricRecord>,
        nonces: Vec<NonceRecord>,
        normalization: NormalizeOutcome,
    ) -> Self {
        let metrics_summary = describe_table(&metrics, &MetricField::ALL);
        let metrics_by_source = describe_grouped(&metrics, &MetricField::ALL);
        // both arms are always reported, even from an empty nonce file
        let nonces_by_source = describe_grouped_with(
            &nonces,
            &NonceField::ALL,
            &[Source::Quantum, Source::Classical],
        );

        Self {
            metrics,
            nonces,
            normalization,
            metrics_summary,
            metrics_by_source,
            nonces_by_source,
        }
    }

    /// Normalized metric records, in file order
    #[must_use]
    pub fn metrics(&self) -> &[MetricRecord] {
        &self.metrics
    }

    /// Merged nonce records (quantum first, then classical)
    #[must_use]
    pub fn nonces(&self) -> &[NonceRecord] {
        &self.nonces
    }

    /// Duration normalization counts
    #[must_use]
    pub const fn normalization(&self) -> NormalizeOutcome {
        self.normalization
    }

    /// Whole-dataset metric statistics
    #[must_use]
    pub const fn metrics_summary(&self) -> &DescribeTable {
        &self.metrics_summary
    }

    /// Metric statistics per source
    #[must_use]
    pub const fn metrics_by_source(&self) -> &GroupedDescribe {
        &self.metrics_by_source
    }

    /// Nonce statistics per source
    #[must_use]
    pub const fn nonces_by_source(&self) -> &GroupedDescribe {
        &self.nonces_by_source
    }

    /// The four comparison charts
    #[must_use]
    pub fn charts(&self, bins: usize) -> Vec<Chart> {
        build_charts(&self.metrics, &self.nonces, bins)
    }

    /// Hand the comparison charts to a renderer
    ///
    /// # Errors
    ///
    /// Returns the presenter's error
    pub fn present<P: Presenter + ?Sized>(&self, bins: usize, presenter: &mut P) -> Result<()> {
        present(&self.charts(bins), presenter)
    }

    /// Metrics as an Arrow batch
    ///
    /// # Errors
    ///
    /// Returns error if the batch cannot be assembled
    pub fn metrics_batch(&self) -> Result<RecordBatch> {
        storage::metrics_batch(&self.metrics)
    }

    /// Nonces as an Arrow batch
    ///
    /// # Errors
    ///
    /// Returns error if the batch cannot be assembled
    pub fn nonces_batch(&self) -> Result<RecordBatch> {
        storage::nonces_batch(&self.nonces)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metrics Analysis:")?;
        write!(f, "{}", self.metrics_summary)?;
        if self.normalization.not_available > 0 {
            writeln!(
                f,
                "({} of {} durations not available)",
                self.normalization.not_available,
                self.normalization.total()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Metrics by Source:")?;
        write!(f, "{}", self.metrics_by_source)?;
        writeln!(f)?;
        writeln!(f, "Nonce Analysis:")?;
        write!(f, "{}", self.nonces_by_source)
    }
}

/// File-backed pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    /// Create a pipeline for a config
    #[must_use]
    pub const fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The pipeline's config
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse and normalize the metrics file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or has a structural error
    pub fn load_metrics(&self) -> Result<(Vec<MetricRecord>, NormalizeOutcome)> {
        let mut metrics: Vec<MetricRecord> =
            self.config.parser().parse_file(&self.config.metrics_path)?;
        let outcome = self.config.normalizer().normalize(&mut metrics);

        tracing::info!(
            path = %self.config.metrics_path.display(),
            records = metrics.len(),
            not_available = outcome.not_available,
            "loaded metrics"
        );
        Ok((metrics, outcome))
    }

    /// Parse both nonce files, tag them by provenance and merge them
    ///
    /// # Errors
    ///
    /// Returns error if either file cannot be read or has a structural error
    pub fn load_nonces(&self) -> Result<Vec<NonceRecord>> {
        let parser = self.config.parser();
        let quantum: Vec<NonceRow> = parser.parse_file(&self.config.quantum_path)?;
        let classical: Vec<NonceRow> = parser.parse_file(&self.config.classical_path)?;

        tracing::info!(
            quantum = quantum.len(),
            classical = classical.len(),
            "loaded nonces"
        );

        merge(
            TaggedDataset::new(Source::Quantum, quantum),
            TaggedDataset::new(Source::Classical, classical),
        )
    }

    /// Load every input and compute all summaries
    ///
    /// # Errors
    ///
    /// Returns the first load error; there is no partial report
    pub fn run(&self) -> Result<AnalysisReport> {
        let (metrics, normalization) = self.load_metrics()?;
        let nonces = self.load_nonces()?;
        Ok(AnalysisReport::from_records(metrics, nonces, normalization))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge_tagged;
    use crate::normalize::DurationNormalizer;

    fn report() -> AnalysisReport {
        let mut metrics = vec![
            MetricRecord::new(0, "Quantum", 100, "12.5ms"),
            MetricRecord::new(1, "Classical", 80, "9.0ms"),
        ];
        let outcome = DurationNormalizer::new().normalize(&mut metrics);
        let nonces = merge_tagged(
            vec![NonceRow::new(5), NonceRow::new(7), NonceRow::new(5)],
            vec![NonceRow::new(9)],
        );
        AnalysisReport::from_records(metrics, nonces, outcome)
    }

    #[test]
    fn test_report_summaries() {
        let report = report();

        let overall = report.metrics_summary().get("Iterations").unwrap();
        assert_eq!(overall.count, 2);
        assert_eq!(overall.mean, Some(90.0));

        let nonces = report.nonces_by_source();
        assert_eq!(nonces.get(&Source::Quantum).unwrap().get("Nonce").unwrap().count, 3);
        assert_eq!(nonces.get(&Source::Classical).unwrap().get("Nonce").unwrap().count, 1);
    }

    #[test]
    fn test_report_keeps_empty_nonce_arm() {
        let nonces = merge_tagged(vec![NonceRow::new(5)], Vec::new());
        let report = AnalysisReport::from_records(Vec::new(), nonces, NormalizeOutcome::default());

        let groups = report.nonces_by_source();
        assert_eq!(groups.groups().len(), 2);
        let classical = groups.get(&Source::Classical).unwrap().get("Nonce").unwrap();
        assert_eq!(classical.count, 0);
    }

    #[test]
    fn test_report_display_sections() {
        let text = report().to_string();
        assert!(text.starts_with("Metrics Analysis:"));
        assert!(text.contains("Metrics by Source:"));
        assert!(text.contains("Nonce Analysis:"));
        assert!(!text.contains("not available"));
    }

    #[test]
    fn test_report_batches() {
        let report = report();
        assert_eq!(report.metrics_batch().unwrap().num_rows(), 2);
        assert_eq!(report.nonces_batch().unwrap().num_rows(), 4);
    }

    #[test]
    fn test_report_charts() {
        let charts = report().charts(30);
        assert_eq!(charts.len(), 4);
        assert_eq!(charts[0].series[0].len(), 3);
    }
}
