//! Two-term power-law loss model.
//!
//! ```text
//! L(N, D) = E + A / N^alpha + B / D^beta
//! ```
//!
//! The first term is the penalty for a model that is too small, the second
//! the penalty for too little data, and `E` the irreducible floor.

use serde::{Deserialize, Serialize};

use super::budget::{check_params, check_tokens, ResourcePoint};
use crate::error::{DomainError, Result};

/// Constants of the loss model.
///
/// Illustrative values, not a fit to any published run. Swappable through
/// configuration so alternative exponents can be explored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LossModelParameters {
    /// Scale of the parameter term
    pub a: f64,
    /// Scale of the data term
    pub b: f64,
    /// Parameter exponent
    pub alpha: f64,
    /// Data exponent
    pub beta: f64,
    /// Irreducible loss
    pub irreducible: f64,
}

impl Default for LossModelParameters {
    fn default() -> Self {
        Self { a: 400.0, b: 400.0, alpha: 0.34, beta: 0.28, irreducible: 0.0 }
    }
}

impl LossModelParameters {
    /// Create and validate a parameter set.
    pub fn new(a: f64, b: f64, alpha: f64, beta: f64, irreducible: f64) -> Result<Self> {
        let params = Self { a, b, alpha, beta, irreducible };
        params.validate()?;
        Ok(params)
    }

    /// Same constants with a different exponent pair.
    pub fn with_exponents(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Check every constant against its domain.
    pub fn validate(&self) -> Result<()> {
        positive("A", self.a)?;
        positive("B", self.b)?;
        positive("alpha", self.alpha)?;
        positive("beta", self.beta)?;
        if !(self.irreducible.is_finite() && self.irreducible >= 0.0) {
            return Err(DomainError::InvalidModelParameter {
                name: "E",
                value: self.irreducible,
                requirement: "the irreducible loss E must be >= 0",
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidModelParameter {
            name,
            value,
            requirement: "scale constants and exponents must be > 0",
        })
    }
}

/// Evaluate the loss at `(n, d)`.
///
/// # Errors
///
/// [`DomainError`] when `n` or `d` is not positive, or `params` is invalid.
pub fn evaluate(n: f64, d: f64, params: &LossModelParameters) -> Result<f64> {
    check_params(n)?;
    check_tokens(d)?;
    params.validate()?;
    Ok(raw_loss(n, d, params))
}

/// Loss without input checks; callers guarantee the preconditions.
#[inline]
pub(crate) fn raw_loss(n: f64, d: f64, params: &LossModelParameters) -> f64 {
    params.irreducible + params.a / n.powf(params.alpha) + params.b / d.powf(params.beta)
}

/// Loss model bound to a validated parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossModel {
    params: LossModelParameters,
}

impl LossModel {
    /// Bind a parameter set after validating it.
    pub fn new(params: LossModelParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters this model evaluates with.
    pub fn params(&self) -> &LossModelParameters {
        &self.params
    }

    /// Loss at `(n, d)`.
    pub fn evaluate(&self, n: f64, d: f64) -> Result<f64> {
        check_params(n)?;
        check_tokens(d)?;
        Ok(raw_loss(n, d, &self.params))
    }

    /// Loss at a resource point.
    pub fn evaluate_point(&self, point: &ResourcePoint) -> Result<f64> {
        self.evaluate(point.params, point.tokens)
    }

    /// Split of the loss into its three terms `(E, A/N^alpha, B/D^beta)`.
    pub fn terms(&self, n: f64, d: f64) -> Result<(f64, f64, f64)> {
        check_params(n)?;
        check_tokens(d)?;
        Ok((
            self.params.irreducible,
            self.params.a / n.powf(self.params.alpha),
            self.params.b / d.powf(self.params.beta),
        ))
    }
}

impl Default for LossModel {
    fn default() -> Self {
        Self { params: LossModelParameters::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_matches_formula() {
        let params = LossModelParameters::default();
        let loss = evaluate(1e9, 2e10, &params).unwrap();
        let expected = 400.0 / 1e9f64.powf(0.34) + 400.0 / 2e10f64.powf(0.28);
        assert_relative_eq!(loss, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_evaluate_includes_irreducible_floor() {
        let params = LossModelParameters { irreducible: 1.69, ..Default::default() };
        let base = evaluate(1e6, 1e6, &LossModelParameters::default()).unwrap();
        let floored = evaluate(1e6, 1e6, &params).unwrap();
        assert_relative_eq!(floored - base, 1.69, max_relative = 1e-9);
    }

    #[test]
    fn test_evaluate_rejects_zero_params() {
        let err = evaluate(0.0, 5.0, &LossModelParameters::default()).unwrap_err();
        assert!(matches!(err, DomainError::NonPositiveParams(n) if n == 0.0));
    }

    #[test]
    fn test_evaluate_rejects_negative_tokens() {
        let err = evaluate(5.0, -1.0, &LossModelParameters::default()).unwrap_err();
        assert!(matches!(err, DomainError::NonPositiveTokens(_)));
    }

    #[test]
    fn test_evaluate_rejects_invalid_exponent() {
        let params = LossModelParameters::default().with_exponents(0.0, 0.28);
        let err = evaluate(5.0, 5.0, &params).unwrap_err();
        assert!(matches!(err, DomainError::InvalidModelParameter { name: "alpha", .. }));
    }

    #[test]
    fn test_negative_irreducible_rejected() {
        assert!(LossModelParameters::new(400.0, 400.0, 0.34, 0.28, -0.1).is_err());
        assert!(LossModelParameters::new(400.0, 400.0, 0.34, 0.28, 0.0).is_ok());
    }

    #[test]
    fn test_loss_decreases_with_more_resources() {
        let model = LossModel::default();
        let small = model.evaluate(1e8, 1e9).unwrap();
        let more_params = model.evaluate(1e9, 1e9).unwrap();
        let more_tokens = model.evaluate(1e8, 1e10).unwrap();
        assert!(more_params < small);
        assert!(more_tokens < small);
    }

    #[test]
    fn test_terms_sum_to_loss() {
        let model = LossModel::new(LossModelParameters { irreducible: 1.5, ..Default::default() })
            .unwrap();
        let (e, n_term, d_term) = model.terms(3e9, 7e10).unwrap();
        assert_relative_eq!(e + n_term + d_term, model.evaluate(3e9, 7e10).unwrap());
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: LossModelParameters = serde_yaml::from_str("alpha: 0.5\nbeta: 0.5\n").unwrap();
        assert_eq!(params.alpha, 0.5);
        assert_eq!(params.a, 400.0);
        assert_eq!(params.irreducible, 0.0);
    }
}
