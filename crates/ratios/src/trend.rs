//! Trend classification of ratio series.
//!
//! A series is classified by the relative change between its first and last
//! defined values. Undefined cells are skipped, and series with fewer than two
//! defined values are left unclassified.

use crate::table::{RatioSeries, RatioTable};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Default relative-change threshold separating a trend from noise.
pub const DEFAULT_THRESHOLD: f64 = 0.10;

/// Direction of a ratio series over the analysis window.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Relative change above the threshold
    #[display("improving")]
    Improving,
    /// Relative change below the negative threshold
    #[display("declining")]
    Declining,
    /// Within the threshold band
    #[display("stable")]
    Stable,
}

/// Relative change from `first` to `last`: `(last - first) / |first|`.
///
/// A zero baseline yields 0, so such a series is classified as stable.
pub fn relative_change(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        0.0
    } else {
        (last - first) / first.abs()
    }
}

/// Classify a series, or `None` if it has fewer than two defined values.
pub fn classify(series: &RatioSeries, threshold: f64) -> Option<Trend> {
    let mut defined = series.defined_values();
    let first = defined.next()?;
    let last = defined.last()?;

    let change = relative_change(first, last);
    Some(if change > threshold {
        Trend::Improving
    } else if change < -threshold {
        Trend::Declining
    } else {
        Trend::Stable
    })
}

/// Series names grouped by trend.
///
/// Names are qualified by table, e.g. `profitability.ROE_%`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrendReport {
    /// Series with a relative change above the threshold
    pub improving: Vec<String>,
    /// Series with a relative change below the negative threshold
    pub declining: Vec<String>,
    /// Series within the threshold band
    pub stable: Vec<String>,
}

impl TrendReport {
    /// Classify every series of the given tables, in table then column order.
    pub fn from_tables<'a>(tables: impl IntoIterator<Item = &'a RatioTable>, threshold: f64) -> Self {
        let mut report = Self::default();
        for table in tables {
            for series in table.series() {
                let Some(trend) = classify(series, threshold) else {
                    tracing::debug!(
                        table = table.name(),
                        series = %series.name,
                        "skipping trend: fewer than two defined values"
                    );
                    continue;
                };
                let qualified = format!("{}.{}", table.name(), series.name);
                match trend {
                    Trend::Improving => report.improving.push(qualified),
                    Trend::Declining => report.declining.push(qualified),
                    Trend::Stable => report.stable.push(qualified),
                }
            }
        }
        report
    }

    /// Series names with the given trend.
    pub fn get(&self, trend: Trend) -> &[String] {
        match trend {
            Trend::Improving => &self.improving,
            Trend::Declining => &self.declining,
            Trend::Stable => &self.stable,
        }
    }

    /// Trend of a qualified series name, if it was classified.
    pub fn trend_of(&self, qualified: &str) -> Option<Trend> {
        [Trend::Improving, Trend::Declining, Trend::Stable]
            .into_iter()
            .find(|t| self.get(*t).iter().any(|n| n == qualified))
    }

    /// Number of classified series.
    pub fn len(&self) -> usize {
        self.improving.len() + self.declining.len() + self.stable.len()
    }

    /// True when no series was classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
