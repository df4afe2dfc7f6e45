//! Validation error types
//!
//! One variant per configuration section, plus cross-section checks.

use crate::error::DomainError;

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("model: {0}")]
    Model(DomainError),

    #[error("search: {0}")]
    Search(DomainError),

    #[error("zones: {0}")]
    Zones(DomainError),

    #[error("slider: {0}")]
    Slider(DomainError),

    #[error("scoring: {0}")]
    Scoring(DomainError),

    #[error("Slider bounds are inverted: min_ratio {min} > max_ratio {max}")]
    InvertedSliderBounds { min: f64, max: f64 },

    #[error("Optimal ratio {ratio} is unreachable with slider bounds [{min}, {max}]")]
    OptimalRatioOutsideSlider { ratio: f64, min: f64, max: f64 },
}

impl ValidationError {
    /// Underlying engine error, when the failure is a single-field check.
    pub fn domain_error(&self) -> Option<&DomainError> {
        match self {
            Self::Model(e) | Self::Search(e) | Self::Zones(e) | Self::Slider(e) | Self::Scoring(e) => {
                Some(e)
            }
            Self::InvertedSliderBounds { .. } | Self::OptimalRatioOutsideSlider { .. } => None,
        }
    }
}
