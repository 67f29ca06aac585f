//! Print the metrics and nonce summaries for one experiment run.
//!
//! Usage: `pow-report [CONFIG]` (see `pow-report --help`)
//!
//! Without a config file the inputs are read from `metrics.csv`,
//! `quantum_nonces.csv` and `classical_nonces.csv` in the working directory.
//! Set `RUST_LOG` to adjust log output (default `info`).

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pow_analytics::presentation::JsonLinesPresenter;
use pow_analytics::{AnalysisConfig, Pipeline};

#[derive(Debug, Parser)]
#[command(name = "pow-report")]
#[command(about = "Summarize quantum vs classical proof-of-work mining metrics and nonces")]
#[command(version)]
struct Cli {
    /// JSON config file (input paths, duration suffix, unit policy, header, bins, chart output)
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let report = Pipeline::new(config.clone())
        .run()
        .context("analysis failed")?;

    println!("{report}");

    if let Some(path) = &config.chart_output {
        let file = File::create(path)
            .with_context(|| format!("creating chart output {}", path.display()))?;
        let mut presenter = JsonLinesPresenter::new(BufWriter::new(file));
        report.present(config.histogram_bins, &mut presenter)?;
        presenter.into_inner().flush()?;
        tracing::info!(path = %path.display(), "wrote chart series");
    }

    Ok(())
}
