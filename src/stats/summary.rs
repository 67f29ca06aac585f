//! Descriptive statistics over a single numeric series

use serde::{Deserialize, Serialize};

/// Count / mean / std / quartile bundle for one numeric series.
///
/// All statistics other than `count` are `None` when they are undefined:
/// every one of them for an empty series, and `std` for a single value
/// (sample standard deviation divides by `n - 1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of eligible (available) values
    pub count: usize,
    /// Arithmetic mean
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator)
    pub std: Option<f64>,
    /// Minimum
    pub min: Option<f64>,
    /// 25th percentile
    pub p25: Option<f64>,
    /// Median
    pub p50: Option<f64>,
    /// 75th percentile
    pub p75: Option<f64>,
    /// Maximum
    pub max: Option<f64>,
}

impl Summary {
    /// Summary of an empty series
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            p25: None,
            p50: None,
            p75: None,
            max: None,
        }
    }

    /// Whether no values contributed to this summary
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Statistics in `describe` row order, paired with their row labels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Describe a series of finite values.
///
/// The input order does not matter; values are sorted internally.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn describe(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary::empty();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let sum_sq: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (n - 1) as f64).sqrt()
    });

    Summary {
        count: n,
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        p25: percentile(&sorted, 0.25),
        p50: percentile(&sorted, 0.50),
        p75: percentile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Percentile of an ascending-sorted series, `q` in `[0, 1]`.
///
/// Linear interpolation between the order statistics around position
/// `(n - 1) * q`. Returns `None` for an empty series.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = last as f64 * q.clamp(0.0, 1.0);

    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
