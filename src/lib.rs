//! # pow-analytics: Quantum vs Classical Proof-of-Work Analytics
//!
//! **Version**: 0.1.0
//!
//! Batch analytics over the output of a proof-of-work mining experiment in
//! which nonces come either from a quantum random number generator or from a
//! classical pseudo-random generator.
//!
//! ## Pipeline
//!
//! - **Parse**: strict typed records from delimited text ([`record`])
//! - **Normalize**: unit-suffixed durations to milliseconds, tolerant of bad
//!   values ([`normalize`])
//! - **Tag + merge**: provenance labels for the two nonce files ([`merge`])
//! - **Aggregate**: count / mean / std / quartiles, overall and per source
//!   ([`stats`])
//! - **Hand off**: chart series for an external renderer ([`presentation`]) and
//!   Arrow batches ([`storage`])
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pow_analytics::pipeline::{AnalysisConfig, Pipeline};
//!
//! let config = AnalysisConfig::builder()
//!     .metrics_path("metrics.csv")
//!     .quantum_path("quantum_nonces.csv")
//!     .classical_path("classical_nonces.csv")
//!     .build()?;
//!
//! let report = Pipeline::new(config).run()?;
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod presentation;
pub mod record;
pub mod source;
pub mod stats;
pub mod storage;

pub use error::{Error, Result};
pub use pipeline::{AnalysisConfig, AnalysisReport, Pipeline};
pub use source::Source;
