//! Pipeline configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::normalize::{DurationNormalizer, UnitPolicy, DEFAULT_SUFFIX};
use crate::presentation::DEFAULT_BINS;
use crate::record::{ParseOptions, RecordParser};
use crate::{Error, Result};

/// Input locations and parsing knobs for one analysis run.
///
/// Missing keys in a JSON config file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Metrics file (`block_index,source,iterations,duration`)
    pub metrics_path: PathBuf,
    /// Quantum nonce file (one nonce per line)
    pub quantum_path: PathBuf,
    /// Classical nonce file (one nonce per line)
    pub classical_path: PathBuf,
    /// Duration unit suffix
    pub duration_suffix: String,
    /// Handling of other duration units
    pub unit_policy: UnitPolicy,
    /// Whether every input file starts with a header line
    pub has_header: bool,
    /// Histogram bins for the nonce distribution chart
    pub histogram_bins: usize,
    /// Where the binary writes chart payloads (JSON lines), if anywhere
    pub chart_output: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            metrics_path: PathBuf::from("metrics.csv"),
            quantum_path: PathBuf::from("quantum_nonces.csv"),
            classical_path: PathBuf::from("classical_nonces.csv"),
            duration_suffix: DEFAULT_SUFFIX.to_string(),
            unit_policy: UnitPolicy::Strict,
            has_header: false,
            histogram_bins: DEFAULT_BINS,
            chart_output: None,
        }
    }
}

impl AnalysisConfig {
    /// Create a config builder starting from the defaults
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or fails
    /// [`validate`](Self::validate)
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::StorageError(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that cannot be expressed by the types alone
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty suffix or zero bins
    pub fn validate(&self) -> Result<()> {
        if self.duration_suffix.is_empty() {
            return Err(Error::InvalidInput("duration_suffix must not be empty".to_string()));
        }
        if self.histogram_bins == 0 {
            return Err(Error::InvalidInput("histogram_bins must be positive".to_string()));
        }
        Ok(())
    }

    /// Record parser for these settings
    #[must_use]
    pub fn parser(&self) -> RecordParser {
        RecordParser::with_options(ParseOptions::default().has_header(self.has_header))
    }

    /// Duration normalizer for these settings
    #[must_use]
    pub fn normalizer(&self) -> DurationNormalizer {
        DurationNormalizer::new()
            .suffix(self.duration_suffix.clone())
            .policy(self.unit_policy)
    }
}

/// Builder for `AnalysisConfig`
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Set the metrics file
    #[must_use]
    pub fn metrics_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.metrics_path = path.into();
        self
    }

    /// Set the quantum nonce file
    #[must_use]
    pub fn quantum_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.quantum_path = path.into();
        self
    }

    /// Set the classical nonce file
    #[must_use]
    pub fn classical_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.classical_path = path.into();
        self
    }

    /// Set the duration unit suffix
    #[must_use]
    pub fn duration_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.duration_suffix = suffix.into();
        self
    }

    /// Set the duration unit policy
    #[must_use]
    pub const fn unit_policy(mut self, policy: UnitPolicy) -> Self {
        self.config.unit_policy = policy;
        self
    }

    /// Declare header lines in the input files
    #[must_use]
    pub const fn has_header(mut self, has_header: bool) -> Self {
        self.config.has_header = has_header;
        self
    }

    /// Set the nonce histogram bin count
    #[must_use]
    pub const fn histogram_bins(mut self, bins: usize) -> Self {
        self.config.histogram_bins = bins;
        self
    }

    /// Set the chart payload output file
    #[must_use]
    pub fn chart_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.chart_output = Some(path.into());
        self
    }

    /// Build the config
    ///
    /// # Errors
    ///
    /// Returns error if [`AnalysisConfig::validate`] fails
    pub fn build(self) -> Result<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_experiment_layout() {
        let config = AnalysisConfig::default();
        assert_eq!(config.metrics_path, PathBuf::from("metrics.csv"));
        assert_eq!(config.quantum_path, PathBuf::from("quantum_nonces.csv"));
        assert_eq!(config.classical_path, PathBuf::from("classical_nonces.csv"));
        assert_eq!(config.duration_suffix, "ms");
        assert_eq!(config.histogram_bins, 30);
        assert!(!config.has_header);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AnalysisConfig::builder()
            .metrics_path("/data/m.csv")
            .unit_policy(UnitPolicy::Convert)
            .histogram_bins(10)
            .build()
            .unwrap();
        assert_eq!(config.metrics_path, PathBuf::from("/data/m.csv"));
        assert_eq!(config.unit_policy, UnitPolicy::Convert);
        assert_eq!(config.histogram_bins, 10);
    }

    #[test]
    fn test_builder_rejects_zero_bins() {
        let result = AnalysisConfig::builder().histogram_bins(0).build();
        assert!(result.unwrap_err().to_string().contains("histogram_bins"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"metrics_path": "run1/metrics.csv", "unit_policy": "convert"}"#)
                .unwrap();
        assert_eq!(config.metrics_path, PathBuf::from("run1/metrics.csv"));
        assert_eq!(config.unit_policy, UnitPolicy::Convert);
        assert_eq!(config.quantum_path, PathBuf::from("quantum_nonces.csv"));
    }

    #[test]
    fn test_normalizer_follows_config() {
        let config = AnalysisConfig::builder().duration_suffix("s").build().unwrap();
        assert_eq!(config.normalizer().normalize_value("3s"), Some(3.0));
    }
}
