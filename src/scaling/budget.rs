//! Compute budgets and resource points.
//!
//! A training run with `N` parameters on `D` tokens costs roughly
//! `k · N · D` FLOPs, with `k = 6` (forward + backward pass).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// FLOPs per parameter per token in `C ≈ k · N · D`.
pub const DEFAULT_COMPUTE_CONSTANT: f64 = 6.0;

/// Budget-invariant tokens-per-parameter ratio at the optimum.
pub const DEFAULT_OPTIMAL_RATIO: f64 = 20.0;

/// Total floating-point operations available for one training run.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ComputeBudget(f64);

impl ComputeBudget {
    /// Create a budget, rejecting non-positive or non-finite values.
    pub fn new(flops: f64) -> Result<Self> {
        if flops.is_finite() && flops > 0.0 {
            Ok(Self(flops))
        } else {
            Err(DomainError::NonPositiveBudget(flops))
        }
    }

    /// Budget of `10^exponent` FLOPs.
    pub fn from_exponent(exponent: f64) -> Result<Self> {
        Self::new(10f64.powf(exponent))
    }

    /// Raw FLOP count.
    pub fn flops(self) -> f64 {
        self.0
    }

    /// Base-10 exponent of the budget.
    pub fn exponent(self) -> f64 {
        self.0.log10()
    }
}

impl TryFrom<f64> for ComputeBudget {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ComputeBudget> for f64 {
    fn from(budget: ComputeBudget) -> Self {
        budget.0
    }
}

impl std::fmt::Display for ComputeBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2e} FLOPs", self.0)
    }
}

/// A `(N, D)` pair: parameter count and training-token count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResourcePoint")]
pub struct ResourcePoint {
    /// Parameter count N
    pub params: f64,
    /// Training-token count D
    pub tokens: f64,
}

impl ResourcePoint {
    /// Create a point, rejecting non-positive coordinates.
    pub fn new(params: f64, tokens: f64) -> Result<Self> {
        check_params(params)?;
        check_tokens(tokens)?;
        Ok(Self { params, tokens })
    }

    /// Tokens per parameter, `D / N`.
    pub fn ratio(&self) -> f64 {
        self.tokens / self.params
    }

    /// Compute consumed by this point, `k · N · D`.
    pub fn flops(&self, compute_constant: f64) -> f64 {
        compute_constant * self.params * self.tokens
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResourcePoint {
    params: f64,
    tokens: f64,
}

impl TryFrom<RawResourcePoint> for ResourcePoint {
    type Error = DomainError;

    fn try_from(raw: RawResourcePoint) -> Result<Self> {
        Self::new(raw.params, raw.tokens)
    }
}

pub(crate) fn check_params(n: f64) -> Result<()> {
    if n.is_finite() && n > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositiveParams(n))
    }
}

pub(crate) fn check_tokens(d: f64) -> Result<()> {
    if d.is_finite() && d > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositiveTokens(d))
    }
}

pub(crate) fn check_ratio(ratio: f64) -> Result<()> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositiveRatio(ratio))
    }
}

pub(crate) fn check_compute_constant(k: f64) -> Result<()> {
    if k.is_finite() && k > 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidComputeConstant(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_rejects_non_positive() {
        assert!(matches!(ComputeBudget::new(0.0), Err(DomainError::NonPositiveBudget(_))));
        assert!(ComputeBudget::new(-1e20).is_err());
        assert!(ComputeBudget::new(f64::NAN).is_err());
        assert!(ComputeBudget::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_budget_from_exponent() {
        let budget = ComputeBudget::from_exponent(23.0).unwrap();
        assert!((budget.flops() / 1e23 - 1.0).abs() < 1e-12);
        assert!((budget.exponent() - 23.0).abs() < 1e-12);
    }

    #[test]
    fn test_budget_deserialize_validates() {
        let ok: ComputeBudget = serde_json::from_str("1e21").unwrap();
        assert_eq!(ok.flops(), 1e21);
        assert!(serde_json::from_str::<ComputeBudget>("-5.0").is_err());
    }

    #[test]
    fn test_resource_point_ratio_and_flops() {
        let point = ResourcePoint::new(1e9, 2e10).unwrap();
        assert!((point.ratio() - 20.0).abs() < 1e-12);
        assert!((point.flops(6.0) - 1.2e20).abs() / 1.2e20 < 1e-12);
    }

    #[test]
    fn test_resource_point_rejects_zero() {
        assert!(matches!(ResourcePoint::new(0.0, 5.0), Err(DomainError::NonPositiveParams(_))));
        assert!(matches!(ResourcePoint::new(5.0, 0.0), Err(DomainError::NonPositiveTokens(_))));
    }

    #[test]
    fn test_resource_point_deserialize_validates() {
        let point: ResourcePoint =
            serde_json::from_str(r#"{"params": 1e9, "tokens": 2e10}"#).unwrap();
        assert_eq!(point, ResourcePoint::new(1e9, 2e10).unwrap());

        let err = serde_json::from_str::<ResourcePoint>(r#"{"params": 0.0, "tokens": 5.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid parameter count"));
        assert!(serde_json::from_str::<ResourcePoint>(r#"{"params": 5.0, "tokens": -1.0}"#).is_err());
    }

    #[test]
    fn test_budget_display() {
        let budget = ComputeBudget::new(1e23).unwrap();
        assert_eq!(budget.to_string(), "1.00e23 FLOPs");
    }
}
