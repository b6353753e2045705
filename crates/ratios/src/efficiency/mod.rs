//! Efficiency ratios - how hard the asset base works
//!
//! Turnover ratios relate revenue to the assets that generate it.

pub mod asset_turnover;

pub use asset_turnover::{AssetTurnover, AssetTurnoverChange, FixedAssetTurnover};
