//! Grid search for the loss minimum along an iso-FLOP curve.
//!
//! For a fixed budget `C` every admissible split satisfies `C = k·N·D`, so the
//! curve is parameterized by `N` alone with `D = C / (k·N)`. The search samples
//! `N` over a range and keeps the sample with the lowest loss. No closed form
//! is assumed, so any exponent pair works.
//!
//! # Resolution
//!
//! Sample `i` of `n` sits at `t = i / (n - 1)` along the range. Two grids over
//! the same range nest when `(fine - 1)` is a multiple of `(coarse - 1)`
//! (100 and 10 000 samples, for instance): every coarse sample is also a fine
//! sample with bit-identical `N`, so the finer grid never returns a larger
//! loss. `refinement_rounds` zooms into the bracket around the best sample and
//! only accepts strictly lower losses, so it never makes the answer worse either.
//!
//! Grids that do not nest (101 and 102 samples) place their samples at
//! different points, and the larger one can land a slightly higher loss. What
//! does hold for every sample count is the precision bound: along the curve the
//! loss is convex in `ln N`, so the minimizer over the range lies between the
//! neighbours of the best sample. [`Optimum::bracket`] reports those
//! neighbours. With geometric spacing its half-width in `ln N` is one grid step,
//! `ln(max / min) / (n - 1)`, which shrinks strictly as `n` grows.

use serde::{Deserialize, Serialize};

use super::budget::{
    check_compute_constant, check_ratio, ComputeBudget, ResourcePoint, DEFAULT_COMPUTE_CONSTANT,
    DEFAULT_OPTIMAL_RATIO,
};
use super::closed_form;
use super::loss::{LossModel, LossModelParameters};
use crate::error::{DomainError, Result};

/// How samples are placed across the N range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Equal additive steps
    Linear,
    /// Equal multiplicative steps
    #[default]
    Geometric,
}

impl std::str::FromStr for Spacing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" | "lin" => Ok(Spacing::Linear),
            "geometric" | "geo" | "log" => Ok(Spacing::Geometric),
            _ => Err(format!("Unknown spacing: {s}. Valid spacings: linear, geometric")),
        }
    }
}

/// Span of N scanned by the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NRange {
    /// Fixed bounds in parameters.
    Absolute { min: f64, max: f64 },
    /// Window around the closed-form reference `N_ref = sqrt(C / (k·ratio))`:
    /// `[N_ref / below, N_ref · above]`. Scales with the budget.
    AroundReference { below: f64, above: f64 },
}

impl Default for NRange {
    fn default() -> Self {
        NRange::AroundReference { below: 1000.0, above: 1000.0 }
    }
}

impl NRange {
    fn validate(&self) -> Result<()> {
        match *self {
            NRange::Absolute { min, max } => {
                if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
                    return Err(DomainError::InvalidSearch {
                        message: format!("absolute N range [{min}, {max}] is empty or non-positive"),
                        suggestion: "use 0 < min < max, e.g. min: 1e6, max: 1e13",
                    });
                }
            }
            NRange::AroundReference { below, above } => {
                let ok = below.is_finite() && above.is_finite() && below >= 1.0 && above >= 1.0;
                if !ok || (below == 1.0 && above == 1.0) {
                    return Err(DomainError::InvalidSearch {
                        message: format!("reference window factors below={below}, above={above}"),
                        suggestion: "factors must be >= 1 and span a non-empty window (default 1000)",
                    });
                }
            }
        }
        Ok(())
    }
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Number of grid samples (>= 2)
    pub sample_count: usize,
    /// Scanned span of N
    pub n_range: NRange,
    /// Sample placement
    pub spacing: Spacing,
    /// `k` in `C = k·N·D`
    pub compute_constant: f64,
    /// Ratio that centers [`NRange::AroundReference`]
    pub reference_ratio: f64,
    /// Zoom-in passes around the best sample
    pub refinement_rounds: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sample_count: 100,
            n_range: NRange::default(),
            spacing: Spacing::default(),
            compute_constant: DEFAULT_COMPUTE_CONSTANT,
            reference_ratio: DEFAULT_OPTIMAL_RATIO,
            refinement_rounds: 0,
        }
    }
}

impl SearchConfig {
    /// Set the number of samples.
    pub fn with_samples(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Scan a fixed N range.
    pub fn with_absolute_range(mut self, min: f64, max: f64) -> Self {
        self.n_range = NRange::Absolute { min, max };
        self
    }

    /// Set the N range.
    pub fn with_range(mut self, n_range: NRange) -> Self {
        self.n_range = n_range;
        self
    }

    /// Set sample placement.
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the number of refinement passes.
    pub fn with_refinement(mut self, rounds: usize) -> Self {
        self.refinement_rounds = rounds;
        self
    }

    /// Set the compute constant `k`.
    pub fn with_compute_constant(mut self, k: f64) -> Self {
        self.compute_constant = k;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.sample_count < 2 {
            return Err(DomainError::InvalidSearch {
                message: format!("sample_count {} is below 2", self.sample_count),
                suggestion: "use at least 2 samples (default 100)",
            });
        }
        check_compute_constant(self.compute_constant)?;
        check_ratio(self.reference_ratio)?;
        self.n_range.validate()
    }

    /// Concrete `(min, max)` bounds of N for a budget.
    ///
    /// Fails when either end of the range would give a token count that is not
    /// a finite positive number.
    pub fn resolve_range(&self, budget: ComputeBudget) -> Result<(f64, f64)> {
        self.validate()?;
        let (min, max) = self.bounds(budget)?;
        let (most, fewest) = (
            budget.flops() / (self.compute_constant * min),
            budget.flops() / (self.compute_constant * max),
        );
        if most.is_finite() && fewest > 0.0 {
            Ok((min, max))
        } else {
            Err(DomainError::InvalidSearch {
                message: format!(
                    "N range [{min:e}, {max:e}] gives token counts [{fewest:e}, {most:e}] for this budget"
                ),
                suggestion: "raise min (or lower max) so that D = C / (k·N) stays finite and positive",
            })
        }
    }

    fn bounds(&self, budget: ComputeBudget) -> Result<(f64, f64)> {
        match self.n_range {
            NRange::Absolute { min, max } => Ok((min, max)),
            NRange::AroundReference { below, above } => {
                let reference = closed_form::reference_point(
                    budget,
                    self.reference_ratio,
                    self.compute_constant,
                )?;
                let (min, max) = (reference.params / below, reference.params * above);
                if min > 0.0 && max.is_finite() && min < max {
                    Ok((min, max))
                } else {
                    Err(DomainError::InvalidSearch {
                        message: format!("reference window [{min}, {max}] is not representable"),
                        suggestion: "narrow the reference window or use an absolute range",
                    })
                }
            }
        }
    }
}

/// One sample of the iso-FLOP curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Parameter count N
    pub params: f64,
    /// Token count D = C / (k·N)
    pub tokens: f64,
    /// Loss at (N, D)
    pub loss: f64,
    /// Tokens per parameter
    pub ratio: f64,
}

/// Minimum found by the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Optimum {
    /// Loss-minimizing split
    pub point: ResourcePoint,
    /// Loss at `point`
    pub loss: f64,
    /// Index of the best sample on the initial grid
    pub sample_index: usize,
    /// Refinement passes that improved the answer
    pub refinements: usize,
    /// Neighbouring samples of the final grid around `point`. The exact
    /// minimizer over the range lies in `[bracket.0, bracket.1]`.
    pub bracket: (f64, f64),
}

impl Optimum {
    /// Tokens per parameter at the optimum.
    pub fn ratio(&self) -> f64 {
        self.point.ratio()
    }

    /// Largest distance in `ln N` from `point` to either end of the bracket.
    ///
    /// The searched N is within a factor `exp(log_tolerance())` of the exact
    /// minimizer.
    pub fn log_tolerance(&self) -> f64 {
        let n = self.point.params;
        (n / self.bracket.0).ln().max((self.bracket.1 / n).ln())
    }
}

/// Position of sample `i` of `count` in `[min, max]`. Endpoints are exact.
fn sample_at(spacing: Spacing, min: f64, max: f64, i: usize, count: usize) -> f64 {
    if i == 0 {
        return min;
    }
    if i + 1 >= count {
        return max;
    }
    let t = i as f64 / (count - 1) as f64;
    let n = match spacing {
        Spacing::Linear => min + t * (max - min),
        Spacing::Geometric => min * (max / min).powf(t),
    };
    n.clamp(min, max)
}

struct Best {
    index: usize,
    params: f64,
    tokens: f64,
    loss: f64,
}

/// Argmin over one grid. Strict `<` keeps the lowest index on ties.
fn scan(
    model: &LossModel,
    flops: f64,
    config: &SearchConfig,
    min: f64,
    max: f64,
) -> Result<Best> {
    let mut best: Option<Best> = None;
    for i in 0..config.sample_count {
        let n = sample_at(config.spacing, min, max, i, config.sample_count);
        let d = flops / (config.compute_constant * n);
        let loss = model.evaluate(n, d)?;
        if best.as_ref().map_or(true, |b| loss < b.loss) {
            best = Some(Best { index: i, params: n, tokens: d, loss });
        }
    }
    best.ok_or_else(|| DomainError::InvalidSearch {
        message: "grid produced no samples".into(),
        suggestion: "use at least 2 samples (default 100)",
    })
}

/// Sample the iso-FLOP curve of `budget` on the configured grid.
pub fn iso_flop_curve(
    budget: ComputeBudget,
    params: &LossModelParameters,
    config: &SearchConfig,
) -> Result<Vec<CurvePoint>> {
    let model = LossModel::new(*params)?;
    let (min, max) = config.resolve_range(budget)?;

    (0..config.sample_count)
        .map(|i| {
            let n = sample_at(config.spacing, min, max, i, config.sample_count);
            let d = budget.flops() / (config.compute_constant * n);
            let loss = model.evaluate(n, d)?;
            Ok(CurvePoint { params: n, tokens: d, loss, ratio: d / n })
        })
        .collect()
}

/// Find the loss-minimizing split of `budget`.
///
/// The returned `N` lies in the resolved range and its loss is `<=` every
/// sampled loss. The exact minimizer over the range lies in
/// [`Optimum::bracket`]. Cost is `O(sample_count · (1 + refinement_rounds))`.
pub fn find_optimal(
    budget: ComputeBudget,
    params: &LossModelParameters,
    config: &SearchConfig,
) -> Result<Optimum> {
    let model = LossModel::new(*params)?;
    let (min, max) = config.resolve_range(budget)?;
    let flops = budget.flops();

    let mut best = scan(&model, flops, config, min, max)?;
    let sample_index = best.index;
    let mut refinements = 0;
    let (mut lo, mut hi) = (min, max);

    for _ in 0..config.refinement_rounds {
        let count = config.sample_count;
        let left = sample_at(config.spacing, lo, hi, best.index.saturating_sub(1), count);
        let right = sample_at(config.spacing, lo, hi, (best.index + 1).min(count - 1), count);
        if right <= left {
            break;
        }
        let candidate = scan(&model, flops, config, left, right)?;
        if candidate.loss >= best.loss {
            break;
        }
        best = candidate;
        lo = left;
        hi = right;
        refinements += 1;
    }

    let count = config.sample_count;
    let bracket = (
        sample_at(config.spacing, lo, hi, best.index.saturating_sub(1), count),
        sample_at(config.spacing, lo, hi, (best.index + 1).min(count - 1), count),
    );

    Ok(Optimum {
        point: ResourcePoint { params: best.params, tokens: best.tokens },
        loss: best.loss,
        sample_index,
        refinements,
        bracket,
    })
}
