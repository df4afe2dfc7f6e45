//! Allocation scoring: slider → ratio → split → efficiency.
//!
//! The slider is logarithmic so equal movement gives equal multiplicative
//! change in the tokens-per-parameter ratio. Position 0 is the data-heavy end
//! (`max_ratio`), 100 the parameter-heavy end (`min_ratio`), and 50 the
//! geometric mean of the bounds.

use serde::{Deserialize, Serialize};

use super::budget::{
    check_compute_constant, check_ratio, ComputeBudget, ResourcePoint, DEFAULT_OPTIMAL_RATIO,
};
use crate::error::{DomainError, Result};

/// Score sensitivity: points lost per unit of `|ln(ratio / optimal)|`.
pub const DEFAULT_SENSITIVITY: f64 = 40.0;

/// Score above which a split counts as compute-optimal.
pub const OPTIMAL_SCORE_THRESHOLD: f64 = 90.0;

/// Ratio bounds mapped onto the slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderConfig {
    /// Ratio at position 100
    pub min_ratio: f64,
    /// Ratio at position 0
    pub max_ratio: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self { min_ratio: 1.0, max_ratio: 400.0 }
    }
}

impl SliderConfig {
    /// Check both bounds are positive.
    pub fn validate(&self) -> Result<()> {
        for (bound, value) in [("min_ratio", self.min_ratio), ("max_ratio", self.max_ratio)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DomainError::InvalidRatioBound { bound, value });
            }
        }
        Ok(())
    }

    /// Ratio at the slider midpoint.
    pub fn midpoint_ratio(&self) -> f64 {
        (self.min_ratio * self.max_ratio).sqrt()
    }
}

/// Scoring constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Ratio that scores 100
    pub optimal_ratio: f64,
    /// Points lost per unit of log-ratio deviation
    pub sensitivity: f64,
    /// Score a split must exceed to count as compute-optimal
    pub optimal_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            optimal_ratio: DEFAULT_OPTIMAL_RATIO,
            sensitivity: DEFAULT_SENSITIVITY,
            optimal_threshold: OPTIMAL_SCORE_THRESHOLD,
        }
    }
}

impl ScoringConfig {
    /// Check the constants.
    pub fn validate(&self) -> Result<()> {
        check_ratio(self.optimal_ratio)?;
        check_sensitivity(self.sensitivity)?;
        if !(0.0..=100.0).contains(&self.optimal_threshold) {
            return Err(DomainError::InvalidScoreThreshold(self.optimal_threshold));
        }
        Ok(())
    }
}

fn check_sensitivity(sensitivity: f64) -> Result<()> {
    if sensitivity.is_finite() && sensitivity >= 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidSensitivity(sensitivity))
    }
}

/// Grade in `[0, 100]` of how close a ratio is to the optimal one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct EfficiencyScore(f64);

impl EfficiencyScore {
    /// Wrap a score, rejecting values outside `[0, 100]`.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::ScoreOutOfRange(value))
        }
    }

    /// Score value in `[0, 100]`.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Strictly above `threshold`.
    pub fn is_compute_optimal(self, threshold: f64) -> bool {
        self.0 > threshold
    }
}

impl TryFrom<f64> for EfficiencyScore {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EfficiencyScore> for f64 {
    fn from(score: EfficiencyScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for EfficiencyScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Map a slider position in `[0, 100]` to a tokens-per-parameter ratio.
pub fn ratio_from_slider(position: f64, slider: &SliderConfig) -> Result<f64> {
    if !(0.0..=100.0).contains(&position) {
        return Err(DomainError::SliderOutOfRange(position));
    }
    slider.validate()?;

    let (ln_min, ln_max) = (slider.min_ratio.ln(), slider.max_ratio.ln());
    Ok((ln_max - (position / 100.0) * (ln_max - ln_min)).exp())
}

/// Inverse of [`ratio_from_slider`].
pub fn slider_from_ratio(ratio: f64, slider: &SliderConfig) -> Result<f64> {
    check_ratio(ratio)?;
    slider.validate()?;
    let (ln_min, ln_max) = (slider.min_ratio.ln(), slider.max_ratio.ln());
    if ln_max == ln_min {
        return Ok(50.0);
    }
    Ok(100.0 * (ln_max - ratio.ln()) / (ln_max - ln_min))
}

/// Split `budget` at `ratio` tokens per parameter.
///
/// `N = sqrt(C / (k·ratio))`, `D = ratio·N`, so `k·N·D = C` up to rounding.
pub fn derive_resource_point(
    budget: ComputeBudget,
    ratio: f64,
    compute_constant: f64,
) -> Result<ResourcePoint> {
    check_ratio(ratio)?;
    check_compute_constant(compute_constant)?;

    let n = (budget.flops() / (compute_constant * ratio)).sqrt();
    ResourcePoint::new(n, n * ratio)
}

/// Efficiency of `ratio` relative to `optimal_ratio`.
///
/// `max(0, 100 - sensitivity · |ln ratio - ln optimal|)`.
pub fn score(ratio: f64, optimal_ratio: f64, sensitivity: f64) -> Result<EfficiencyScore> {
    check_ratio(ratio)?;
    check_ratio(optimal_ratio)?;
    check_sensitivity(sensitivity)?;

    let deviation = (ratio.ln() - optimal_ratio.ln()).abs();
    Ok(EfficiencyScore((100.0 - sensitivity * deviation).max(0.0)))
}

/// Advice for a chosen ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioAdvice {
    /// Small model fed far more tokens than it can absorb
    DataHeavy,
    /// Large model starved of data
    ParameterHeavy,
    /// Neither extreme
    Balanced,
}

impl RatioAdvice {
    /// Ratio above which a split is data-heavy.
    pub const DATA_HEAVY_ABOVE: f64 = 50.0;
    /// Ratio below which a split is parameter-heavy.
    pub const PARAMETER_HEAVY_BELOW: f64 = 5.0;

    /// Classify a ratio.
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio > Self::DATA_HEAVY_ABOVE {
            RatioAdvice::DataHeavy
        } else if ratio < Self::PARAMETER_HEAVY_BELOW {
            RatioAdvice::ParameterHeavy
        } else {
            RatioAdvice::Balanced
        }
    }

    /// One-line explanation.
    pub fn message(self) -> &'static str {
        match self {
            RatioAdvice::DataHeavy => {
                "Warning: a small model reading too much data; it cannot retain all of it."
            }
            RatioAdvice::ParameterHeavy => {
                "Warning: a huge model trained on too little data; its capacity is wasted."
            }
            RatioAdvice::Balanced => "Model size and data are in a workable balance.",
        }
    }
}

/// Whether `ratio` falls in the 15–25 tokens-per-parameter band around 20.
pub fn in_sweet_spot(ratio: f64) -> bool {
    (15.0..=25.0).contains(&ratio)
}
