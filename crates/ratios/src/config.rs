//! Engine configuration.

use crate::{RatioError, Result};
use serde::{Deserialize, Serialize};

/// Tunable thresholds for the ratio engine.
///
/// Deserializes from JSON; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Relative tolerance for the DuPont cross-check.
    pub dupont_tolerance: f64,
    /// Relative change beyond which a series counts as improving or declining.
    pub trend_threshold: f64,
    /// Absolute tolerance for `assets = liabilities + equity`.
    pub balance_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dupont_tolerance: 1e-6,
            trend_threshold: crate::trend::DEFAULT_THRESHOLD,
            balance_tolerance: 1.0,
        }
    }
}

impl EngineConfig {
    /// Reject negative or non-finite thresholds.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("dupont_tolerance", self.dupont_tolerance),
            ("trend_threshold", self.trend_threshold),
            ("balance_tolerance", self.balance_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RatioError::Config(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
