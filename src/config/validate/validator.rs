//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::EngineConfig;
use crate::scaling::{NRange, Spacing};

/// Widest N range (max / min) that linear spacing covers evenly enough.
const LINEAR_SPAN_LIMIT: f64 = 10.0;

/// Validate an engine configuration
///
/// Checks:
/// - Every section against the engine's own preconditions
/// - Slider bounds are ordered
/// - The optimal ratio can be reached with the slider
pub fn validate_config(config: &EngineConfig) -> Result<(), ValidationError> {
    config.model.validate().map_err(ValidationError::Model)?;
    config.search.validate().map_err(ValidationError::Search)?;
    config.zones.validate().map_err(ValidationError::Zones)?;
    config.slider.validate().map_err(ValidationError::Slider)?;
    config.scoring.validate().map_err(ValidationError::Scoring)?;

    let (min, max) = (config.slider.min_ratio, config.slider.max_ratio);
    if min > max {
        return Err(ValidationError::InvertedSliderBounds { min, max });
    }

    let ratio = config.scoring.optimal_ratio;
    if ratio < min || ratio > max {
        return Err(ValidationError::OptimalRatioOutsideSlider { ratio, min, max });
    }

    Ok(())
}

/// Non-fatal observations about a valid configuration.
pub fn validation_notes(config: &EngineConfig) -> Vec<String> {
    let mut notes = Vec::new();

    let midpoint = config.slider.midpoint_ratio();
    let optimal = config.scoring.optimal_ratio;
    if (midpoint / optimal - 1.0).abs() > 1e-6 {
        notes.push(format!(
            "Slider midpoint maps to ratio {midpoint:.2}, not the optimal ratio {optimal}; bounds are not symmetric around it"
        ));
    }

    if (config.search.reference_ratio - optimal).abs() > f64::EPSILON * optimal {
        notes.push(format!(
            "Search window is centered on ratio {}, scoring on {optimal}",
            config.search.reference_ratio
        ));
    }

    let search = &config.search;
    let span = match search.n_range {
        NRange::Absolute { min, max } => max / min,
        NRange::AroundReference { below, above } => below * above,
    };
    if search.spacing == Spacing::Linear && span > LINEAR_SPAN_LIMIT {
        notes.push(format!(
            "Linear spacing over a {span:.0}x N range leaves the lowest decade with few samples; use spacing: geometric"
        ));
    }

    if config.search.sample_count > 1_000_000 {
        notes.push(format!(
            "sample_count {} is large; each request scans every sample",
            config.search.sample_count
        ));
    }

    notes
}
