//! Closed-form shortcuts and their cross-check against the search.
//!
//! Two shortcuts exist:
//!
//! - [`reference_point`] pins the ratio (20 tokens per parameter by default),
//!   so `C = k·N·(ratio·N)` gives `N = sqrt(C / (k·ratio))`; at the defaults
//!   that is `N = sqrt(C / 120)`. This is the budget planner's rule of thumb.
//! - [`stationary_point`] solves `dL/dN = 0` along the iso-FLOP curve for the
//!   two-term power law.
//!
//! Neither replaces [`find_optimal`](super::search::find_optimal). With the
//! default exponents the loss minimum sits at a different ratio than 20, so
//! [`compare`] reports how far the rule of thumb is from the searched optimum
//! instead of assuming they agree.

use serde::{Deserialize, Serialize};

use super::budget::{check_compute_constant, ComputeBudget, ResourcePoint};
use super::loss::{LossModel, LossModelParameters};
use super::scorer::derive_resource_point;
use super::search::{find_optimal, Optimum, SearchConfig};
use crate::error::Result;

/// Split with the ratio pinned at `optimal_ratio`.
pub fn reference_point(
    budget: ComputeBudget,
    optimal_ratio: f64,
    compute_constant: f64,
) -> Result<ResourcePoint> {
    derive_resource_point(budget, optimal_ratio, compute_constant)
}

/// Exact minimizer of `A/N^alpha + B/D^beta` subject to `k·N·D = C`.
///
/// ```text
/// N* = (alpha·A / (beta·B))^(1/(alpha+beta)) · (C/k)^(beta/(alpha+beta))
/// ```
///
/// Only valid for this loss form; used to validate the grid search.
pub fn stationary_point(
    budget: ComputeBudget,
    params: &LossModelParameters,
    compute_constant: f64,
) -> Result<ResourcePoint> {
    params.validate()?;
    check_compute_constant(compute_constant)?;
    let per_step = budget.flops() / compute_constant;
    let sum = params.alpha + params.beta;
    let ln_n = ((params.alpha * params.a) / (params.beta * params.b)).ln() / sum
        + per_step.ln() * params.beta / sum;
    let n = ln_n.exp();
    ResourcePoint::new(n, per_step / n)
}

/// Rule of thumb versus searched optimum for one budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceComparison {
    /// Closed-form split at the pinned ratio
    pub reference: ResourcePoint,
    /// Loss at the closed-form split
    pub reference_loss: f64,
    /// Split returned by the grid search
    pub searched: ResourcePoint,
    /// Loss at the searched split
    pub searched_loss: f64,
    /// `|log10(N_ref) - log10(N_search)|`
    pub params_log10_gap: f64,
}

impl ReferenceComparison {
    /// Whether both splits agree on N within `decades` orders of magnitude.
    pub fn agrees_within(&self, decades: f64) -> bool {
        self.params_log10_gap <= decades
    }

    /// Extra loss paid by following the rule of thumb.
    pub fn excess_loss(&self) -> f64 {
        self.reference_loss - self.searched_loss
    }
}

/// Run the rule of thumb and the search side by side.
pub fn compare(
    budget: ComputeBudget,
    params: &LossModelParameters,
    optimal_ratio: f64,
    search: &SearchConfig,
) -> Result<ReferenceComparison> {
    let optimum = find_optimal(budget, params, search)?;
    compare_with_optimum(budget, params, optimal_ratio, search.compute_constant, &optimum)
}

/// Compare the rule of thumb against an optimum that was already searched.
pub fn compare_with_optimum(
    budget: ComputeBudget,
    params: &LossModelParameters,
    optimal_ratio: f64,
    compute_constant: f64,
    optimum: &Optimum,
) -> Result<ReferenceComparison> {
    let model = LossModel::new(*params)?;
    let reference = reference_point(budget, optimal_ratio, compute_constant)?;

    Ok(ReferenceComparison {
        reference,
        reference_loss: model.evaluate_point(&reference)?,
        searched: optimum.point,
        searched_loss: optimum.loss,
        params_log10_gap: (reference.params.log10() - optimum.point.params.log10()).abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_point_matches_rule_of_thumb() {
        let budget = ComputeBudget::new(1e23).unwrap();
        let point = reference_point(budget, 20.0, 6.0).unwrap();
        assert_relative_eq!(point.params, (1e23f64 / 120.0).sqrt(), max_relative = 1e-12);
        assert_relative_eq!(point.tokens, 20.0 * point.params, max_relative = 1e-12);
    }

    #[test]
    fn test_stationary_point_on_budget() {
        let budget = ComputeBudget::new(5e21).unwrap();
        let point = stationary_point(budget, &LossModelParameters::default(), 6.0).unwrap();
        assert_relative_eq!(point.flops(6.0), 5e21, max_relative = 1e-9);
    }

    #[test]
    fn test_stationary_point_is_a_minimum() {
        let budget = ComputeBudget::new(1e22).unwrap();
        let params = LossModelParameters::default();
        let model = LossModel::new(params).unwrap();
        let point = stationary_point(budget, &params, 6.0).unwrap();
        let at = model.evaluate_point(&point).unwrap();

        for factor in [0.9, 1.1] {
            let n = point.params * factor;
            let d = 1e22 / (6.0 * n);
            assert!(model.evaluate(n, d).unwrap() > at);
        }
    }

    #[test]
    fn test_search_tracks_stationary_point() {
        let budget = ComputeBudget::new(1e23).unwrap();
        let params = LossModelParameters::default();
        let exact = stationary_point(budget, &params, 6.0).unwrap();
        let optimum =
            find_optimal(budget, &params, &SearchConfig::default().with_samples(10_000)).unwrap();
        // Geometric step over six decades with 10 000 samples is ~0.14%.
        assert_relative_eq!(optimum.point.params, exact.params, max_relative = 2e-3);
    }

    #[test]
    fn test_compare_reports_gap_without_assuming_equivalence() {
        let budget = ComputeBudget::new(1e23).unwrap();
        let cmp = compare(budget, &LossModelParameters::default(), 20.0, &SearchConfig::default())
            .unwrap();
        assert!(cmp.agrees_within(1.0));
        assert!(cmp.params_log10_gap > 0.0);
        assert!(cmp.excess_loss() >= 0.0);
    }
}
