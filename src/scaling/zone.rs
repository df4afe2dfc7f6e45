//! Zone classification of a split relative to the optimum.

use serde::{Deserialize, Serialize};

use super::budget::ResourcePoint;
use crate::error::{DomainError, Result};

/// Where a split sits relative to the compute-optimal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Model too small for the budget
    Underparameterized,
    /// Close enough to the optimum
    Optimal,
    /// Model too large; not enough data to feed it
    Overparameterized,
}

impl Zone {
    /// Short title.
    pub fn title(self) -> &'static str {
        match self {
            Zone::Underparameterized => "Parameter bottleneck (under-parameterized)",
            Zone::Optimal => "Compute-optimal zone",
            Zone::Overparameterized => "Data bottleneck (over-parameterized)",
        }
    }

    /// One-paragraph explanation.
    pub fn description(self) -> &'static str {
        match self {
            Zone::Underparameterized => {
                "The model is too small: more data cannot help once its capacity is full, so loss stays high."
            }
            Zone::Optimal => {
                "Model size and data are balanced; this is the best loss the budget can buy."
            }
            Zone::Overparameterized => {
                "The model is too large for the data it sees; much of the compute is wasted on an underfed network."
            }
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Underparameterized => "underparameterized",
            Zone::Optimal => "optimal",
            Zone::Overparameterized => "overparameterized",
        };
        write!(f, "{name}")
    }
}

/// Multiples of the optimal N that bound the optimal zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoneThresholds {
    /// Below `N_opt · low_factor` is under-parameterized (< 1)
    pub low_factor: f64,
    /// Above `N_opt · high_factor` is over-parameterized (> 1)
    pub high_factor: f64,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self { low_factor: 0.6, high_factor: 1.5 }
    }
}

impl ZoneThresholds {
    /// Create validated thresholds.
    pub fn new(low_factor: f64, high_factor: f64) -> Result<Self> {
        let thresholds = Self { low_factor, high_factor };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Require `0 < low < 1 < high`.
    pub fn validate(&self) -> Result<()> {
        let ok = self.low_factor > 0.0
            && self.low_factor < 1.0
            && self.high_factor > 1.0
            && self.high_factor.is_finite();
        if ok {
            Ok(())
        } else {
            Err(DomainError::InvalidZoneThresholds { low: self.low_factor, high: self.high_factor })
        }
    }
}

/// Classify `point` against `optimal`. Total: every N maps to one zone.
pub fn classify(point: &ResourcePoint, optimal: &ResourcePoint, thresholds: &ZoneThresholds) -> Zone {
    if point.params < optimal.params * thresholds.low_factor {
        Zone::Underparameterized
    } else if point.params > optimal.params * thresholds.high_factor {
        Zone::Overparameterized
    } else {
        Zone::Optimal
    }
}
