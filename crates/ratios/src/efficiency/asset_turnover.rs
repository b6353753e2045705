//! Asset turnover ratios.
//!
//! Asset turnover is the only ratio with a cross-year companion: its
//! year-over-year change depends on row order, which validated statements
//! guarantee to be increasing by year.

use crate::{
    formula::{pct_change, safe_div},
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

fn asset_turnover() -> Expr {
    safe_div(col("revenue"), col("total_assets"))
}

/// Asset Turnover.
///
/// ```text
/// Asset Turnover = Revenue / Total Assets
/// ```
///
/// The asset-efficiency factor of the DuPont decomposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetTurnover;

impl Ratio for AssetTurnover {
    fn name(&self) -> &str {
        "Asset_Turnover"
    }

    fn description(&self) -> &str {
        "Asset Turnover - revenue divided by total assets"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Efficiency
    }

    fn required_columns(&self) -> &[&str] {
        &["revenue", "total_assets"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Multiple
    }

    fn expr(&self) -> Expr {
        asset_turnover()
    }
}

/// Fixed Asset Turnover.
///
/// ```text
/// Fixed Asset Turnover = Revenue / Fixed Assets
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAssetTurnover;

impl Ratio for FixedAssetTurnover {
    fn name(&self) -> &str {
        "Fixed_Asset_Turnover"
    }

    fn description(&self) -> &str {
        "Fixed Asset Turnover - revenue divided by fixed assets"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Efficiency
    }

    fn required_columns(&self) -> &[&str] {
        &["revenue", "fixed_assets"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Multiple
    }

    fn expr(&self) -> Expr {
        safe_div(col("revenue"), col("fixed_assets"))
    }
}

/// Year-over-year change in Asset Turnover.
///
/// ```text
/// Asset Turnover Change % = (AT_t / AT_{t-1} - 1) * 100
/// ```
///
/// Undefined for the first year and whenever the prior year's turnover is
/// undefined or zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetTurnoverChange;

impl Ratio for AssetTurnoverChange {
    fn name(&self) -> &str {
        "Asset_Turnover_Change_%"
    }

    fn description(&self) -> &str {
        "Asset Turnover Change - percent change in asset turnover from the prior year"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Efficiency
    }

    fn required_columns(&self) -> &[&str] {
        &["revenue", "total_assets"]
    }

    fn lookback(&self) -> usize {
        2
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Percent
    }

    fn expr(&self) -> Expr {
        pct_change(asset_turnover())
    }
}
