//! YAML schema for the engine configuration.
//!
//! Every section is optional; a missing section takes its defaults, so an
//! empty file is a valid configuration.
//!
//! ```yaml
//! model:
//!   a: 400.0
//!   b: 400.0
//!   alpha: 0.34
//!   beta: 0.28
//!   irreducible: 0.0
//! search:
//!   sample_count: 100
//!   spacing: geometric
//!   n_range:
//!     kind: around_reference
//!     below: 1000.0
//!     above: 1000.0
//! zones:
//!   low_factor: 0.6
//!   high_factor: 1.5
//! slider:
//!   min_ratio: 1.0
//!   max_ratio: 400.0
//! scoring:
//!   optimal_ratio: 20.0
//!   sensitivity: 40.0
//! ```

use serde::{Deserialize, Serialize};

use crate::scaling::{LossModelParameters, ScoringConfig, SearchConfig, SliderConfig, ZoneThresholds};

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Loss model constants
    pub model: LossModelParameters,

    /// Grid search over the iso-FLOP curve
    pub search: SearchConfig,

    /// Zone classification thresholds
    pub zones: ZoneThresholds,

    /// Slider ratio bounds
    pub slider: SliderConfig,

    /// Efficiency scoring
    pub scoring: ScoringConfig,
}

impl EngineConfig {
    /// Override the number of search samples.
    pub fn with_samples(mut self, sample_count: usize) -> Self {
        self.search.sample_count = sample_count;
        self
    }
}
