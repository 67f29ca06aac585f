//! Hand-off to an external chart renderer
//!
//! The crate does not draw anything. It builds the four comparison charts as
//! plain numeric series with category labels and passes them to a
//! [`Presenter`], which owns all layout and rendering.
//!
//! | Chart | Kind | x | y |
//! |---|---|---|---|
//! | Nonce Distribution | histogram | nonce | - |
//! | Mining Iterations per Block | bar | block index | iterations |
//! | Mining Duration per Block | bar | block index | duration (ms) |
//! | Iterations vs Duration | scatter | iterations | duration (ms) |
//!
//! Points whose duration is not available are left out of the duration
//! charts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::record::{MetricRecord, NonceRecord};
use crate::source::Source;
use crate::Result;

/// Default histogram bin count for the nonce distribution
pub const DEFAULT_BINS: usize = 30;

/// How a chart's series should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// `x` values are binned; `y` is empty
    Histogram,
    /// One bar per `(x, y)` pair
    Bar,
    /// One point per `(x, y)` pair
    Scatter,
}

/// One labelled series of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Category label (legend entry)
    pub source: Source,
    /// X values
    pub x: Vec<f64>,
    /// Y values (same length as `x`, empty for histograms)
    pub y: Vec<f64>,
}

impl Series {
    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// A chart ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Drawing style
    pub kind: ChartKind,
    /// Chart title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Histogram bin count (histograms only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<usize>,
    /// Series in first-appearance order of their source
    pub series: Vec<Series>,
}

/// External renderer for prepared charts.
pub trait Presenter {
    /// Render one chart.
    ///
    /// # Errors
    ///
    /// Implementation defined (I/O, encoding, ...)
    fn draw(&mut self, chart: &Chart) -> Result<()>;
}

/// Split `(source, x, y)` triples into per-source series, first-appearance order.
fn group_series<'a, I>(points: I) -> Vec<Series>
where
    I: IntoIterator<Item = (&'a Source, f64, Option<f64>)>,
{
    let mut index: FxHashMap<&Source, usize> = FxHashMap::default();
    let mut series: Vec<Series> = Vec::new();

    for (source, x, y) in points {
        let slot = *index.entry(source).or_insert_with(|| {
            series.push(Series {
                source: source.clone(),
                x: Vec::new(),
                y: Vec::new(),
            });
            series.len() - 1
        });
        series[slot].x.push(x);
        if let Some(y) = y {
            series[slot].y.push(y);
        }
    }

    series
}

/// Histogram of nonce values per source.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn nonce_distribution(nonces: &[NonceRecord], bins: usize) -> Chart {
    Chart {
        kind: ChartKind::Histogram,
        title: "Nonce Distribution: Quantum vs Classical".to_string(),
        x_label: "Nonce".to_string(),
        y_label: "Frequency".to_string(),
        bins: Some(bins),
        series: group_series(nonces.iter().map(|r| (r.source(), r.nonce() as f64, None))),
    }
}

/// Iterations of each block, per source.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn iterations_per_block(metrics: &[MetricRecord]) -> Chart {
    Chart {
        kind: ChartKind::Bar,
        title: "Mining Iterations per Block".to_string(),
        x_label: "Block Index".to_string(),
        y_label: "Iterations".to_string(),
        bins: None,
        series: group_series(
            metrics
                .iter()
                .map(|r| (r.source(), r.block_index() as f64, Some(r.iterations() as f64))),
        ),
    }
}

/// Duration of each block, per source. Not-available durations are dropped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn duration_per_block(metrics: &[MetricRecord]) -> Chart {
    Chart {
        kind: ChartKind::Bar,
        title: "Mining Duration per Block".to_string(),
        x_label: "Block Index".to_string(),
        y_label: "Duration (ms)".to_string(),
        bins: None,
        series: group_series(metrics.iter().filter_map(|r| {
            r.duration_ms()
                .map(|d| (r.source(), r.block_index() as f64, Some(d)))
        })),
    }
}

/// Iterations against duration, per source. Not-available durations are dropped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn iterations_vs_duration(metrics: &[MetricRecord]) -> Chart {
    Chart {
        kind: ChartKind::Scatter,
        title: "Iterations vs Duration".to_string(),
        x_label: "Iterations".to_string(),
        y_label: "Duration (ms)".to_string(),
        bins: None,
        series: group_series(metrics.iter().filter_map(|r| {
            r.duration_ms()
                .map(|d| (r.source(), r.iterations() as f64, Some(d)))
        })),
    }
}

/// All four comparison charts, in presentation order.
#[must_use]
pub fn build_charts(metrics: &[MetricRecord], nonces: &[NonceRecord], bins: usize) -> Vec<Chart> {
    vec![
        nonce_distribution(nonces, bins),
        iterations_per_block(metrics),
        duration_per_block(metrics),
        iterations_vs_duration(metrics),
    ]
}

/// Pass every chart to `presenter`, stopping at the first failure.
///
/// # Errors
///
/// Returns the presenter's error
pub fn present<P: Presenter + ?Sized>(charts: &[Chart], presenter: &mut P) -> Result<()> {
    for chart in charts {
        tracing::debug!(title = %chart.title, series = chart.series.len(), "presenting chart");
        presenter.draw(chart)?;
    }
    Ok(())
}

/// Writes each chart as one JSON line, for an external plotting tool.
#[derive(Debug)]
pub struct JsonLinesPresenter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesPresenter<W> {
    /// Wrap a writer
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for JsonLinesPresenter<W> {
    fn draw(&mut self, chart: &Chart) -> Result<()> {
        serde_json::to_writer(&mut self.writer, chart)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
