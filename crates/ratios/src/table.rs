//! Immutable per-year ratio tables.

use crate::{RatioError, Result, formula::defined, statements::YEAR};
use polars::prelude::*;
use serde::Serialize;

/// A named per-year series. `None` marks an undefined cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioSeries {
    /// Series name, e.g. `ROE_%`
    pub name: String,
    /// One value per year, aligned with the owning table's years
    pub values: Vec<Option<f64>>,
}

impl RatioSeries {
    /// Defined values in year order, skipping undefined cells.
    pub fn defined_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }
}

/// A named collection of ratio series sharing one year axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioTable {
    name: String,
    years: Vec<i32>,
    series: Vec<RatioSeries>,
}

impl RatioTable {
    /// Extract the given float columns from a frame that also holds [`YEAR`].
    ///
    /// Non-finite values are stored as undefined.
    pub fn from_frame(name: impl Into<String>, frame: &DataFrame, columns: &[&str]) -> Result<Self> {
        let years = frame
            .column(YEAR)
            .map_err(|_| RatioError::MissingColumn(YEAR.to_string()))?
            .i32()?
            .into_iter()
            .map(|y| y.ok_or_else(|| RatioError::MissingColumn(YEAR.to_string())))
            .collect::<Result<Vec<_>>>()?;

        let series = columns
            .iter()
            .map(|column| {
                let values = frame
                    .column(column)
                    .map_err(|_| RatioError::MissingColumn((*column).to_string()))?
                    .f64()?
                    .into_iter()
                    .map(defined)
                    .collect();
                Ok(RatioSeries {
                    name: (*column).to_string(),
                    values,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.into(),
            years,
            series,
        })
    }

    /// Table name, e.g. `profitability`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Years in increasing order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// All series in column order.
    pub fn series(&self) -> &[RatioSeries] {
        &self.series
    }

    /// Look up a series by name.
    pub fn get(&self, name: &str) -> Option<&RatioSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Value of a series for a given year.
    pub fn value(&self, name: &str, year: i32) -> Option<f64> {
        let idx = self.years.iter().position(|y| *y == year)?;
        self.get(name)?.values.get(idx).copied().flatten()
    }

    /// Build a table from already-extracted series, selecting by name.
    ///
    /// Used to assemble cross-category views such as the key-ratio summary.
    pub(crate) fn select<'a>(
        name: impl Into<String>,
        years: Vec<i32>,
        sources: impl IntoIterator<Item = &'a Self> + Clone,
        columns: &[&str],
    ) -> Result<Self> {
        let series = columns
            .iter()
            .map(|column| {
                sources
                    .clone()
                    .into_iter()
                    .find_map(|table| table.get(column))
                    .cloned()
                    .ok_or_else(|| RatioError::NotFound((*column).to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.into(),
            years,
            series,
        })
    }

    /// Convert to a DataFrame with a `year` column followed by one column per series.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.series.len() + 1);
        columns.push(Column::new(YEAR.into(), self.years.clone()));
        for s in &self.series {
            columns.push(Column::new(s.name.as_str().into(), s.values.clone()));
        }
        Ok(DataFrame::new(columns)?)
    }
}
