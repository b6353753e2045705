//! Comparison of ratios against industry benchmarks.

use crate::{Result, statements::YEAR, table::RatioTable};
use derive_more::Display;
use polars::prelude::*;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use std::fmt;

/// Ratio name to benchmark value, in insertion order.
///
/// (De)serializes as a flat JSON object, e.g. `{"ROE_%": 12.0}`, keeping the
/// document order so comparisons come out in the order the caller wrote them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Benchmarks(Vec<(String, f64)>);

impl Benchmarks {
    /// Create an empty benchmark set.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Typical values for the UK retail sector.
    pub fn uk_retail() -> Self {
        [
            ("Gross_Margin_%", 35.0),
            ("EBIT_Margin_%", 5.0),
            ("ROE_%", 12.0),
            ("Current_Ratio", 1.5),
            ("Debt_to_Equity", 1.0),
            ("Asset_Turnover", 1.2),
        ]
        .into_iter()
        .collect()
    }

    /// Add a benchmark, or replace an existing one in place.
    ///
    /// Returns the previous value for `ratio`, if any.
    pub fn insert(&mut self, ratio: impl Into<String>, value: f64) -> Option<f64> {
        let ratio = ratio.into();
        match self.0.iter_mut().find(|(name, _)| *name == ratio) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.0.push((ratio, value));
                None
            }
        }
    }

    /// Benchmark value for a ratio.
    pub fn get(&self, ratio: &str) -> Option<f64> {
        self.0.iter().find(|(name, _)| name == ratio).map(|(_, v)| *v)
    }

    /// Iterate benchmarks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of benchmarks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no benchmark is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Benchmarks {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut benchmarks = Self::new();
        for (ratio, value) in iter {
            benchmarks.insert(ratio, value);
        }
        benchmarks
    }
}

impl Serialize for Benchmarks {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (ratio, value) in self.iter() {
            map.serialize_entry(ratio, &value)?;
        }
        map.end()
    }
}

struct BenchmarksVisitor;

impl<'de> Visitor<'de> for BenchmarksVisitor {
    type Value = Benchmarks;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of ratio names to benchmark values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Benchmarks, A::Error> {
        let mut benchmarks = Benchmarks::new();
        while let Some((ratio, value)) = access.next_entry::<String, f64>()? {
            benchmarks.insert(ratio, value);
        }
        Ok(benchmarks)
    }
}

impl<'de> Deserialize<'de> for Benchmarks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(BenchmarksVisitor)
    }
}

/// Position of an actual value relative to its benchmark.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Performance {
    /// Strictly above the benchmark
    Above,
    /// At or below the benchmark, or undefined
    Below,
}

impl Performance {
    /// Above only for a strictly positive variance.
    pub fn from_variance(variance: Option<f64>) -> Self {
        match variance {
            Some(v) if v > 0.0 => Self::Above,
            _ => Self::Below,
        }
    }
}

/// Per-year comparison of one ratio against its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    /// Ratio name
    pub metric: String,
    /// Benchmark value
    pub benchmark: f64,
    /// Actual minus benchmark, per year
    pub variance: Vec<Option<f64>>,
    /// Performance label, per year
    pub performance: Vec<Performance>,
}

/// Benchmark comparison across all benchmarked ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    /// Years in increasing order
    pub years: Vec<i32>,
    /// One entry per benchmarked ratio found in the tables
    pub metrics: Vec<MetricComparison>,
}

impl BenchmarkComparison {
    /// Compare the series of `tables` against `benchmarks`.
    ///
    /// Benchmarks naming a ratio absent from every table are skipped. An
    /// empty benchmark set falls back to [`Benchmarks::uk_retail`].
    pub fn compare<'a>(
        tables: impl IntoIterator<Item = &'a RatioTable> + Clone,
        years: &[i32],
        benchmarks: &Benchmarks,
    ) -> Self {
        let defaults;
        let benchmarks = if benchmarks.is_empty() {
            tracing::debug!("no benchmarks supplied, using UK retail defaults");
            defaults = Benchmarks::uk_retail();
            &defaults
        } else {
            benchmarks
        };

        let metrics = benchmarks
            .iter()
            .filter_map(|(metric, benchmark)| {
                let Some(series) = tables.clone().into_iter().find_map(|t| t.get(metric)) else {
                    tracing::debug!(metric, "benchmark names an unknown ratio, skipping");
                    return None;
                };
                let variance: Vec<_> = series
                    .values
                    .iter()
                    .map(|v| v.map(|v| v - benchmark))
                    .collect();
                let performance = variance.iter().map(|v| Performance::from_variance(*v)).collect();
                Some(MetricComparison {
                    metric: metric.to_string(),
                    benchmark,
                    variance,
                    performance,
                })
            })
            .collect();

        Self {
            years: years.to_vec(),
            metrics,
        }
    }

    /// Comparison for one ratio.
    pub fn get(&self, metric: &str) -> Option<&MetricComparison> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    /// Convert to a DataFrame with `{metric}_vs_Industry` and
    /// `{metric}_Performance` columns per metric.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = vec![Column::new(YEAR.into(), self.years.clone())];
        for m in &self.metrics {
            columns.push(Column::new(
                format!("{}_vs_Industry", m.metric).into(),
                m.variance.clone(),
            ));
            columns.push(Column::new(
                format!("{}_Performance", m.metric).into(),
                m.performance.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            ));
        }
        Ok(DataFrame::new(columns)?)
    }
}
