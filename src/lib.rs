//! Compute-optimal scaling-law engine.
//!
//! This crate provides:
//! - A parametric loss model `L(N, D) = E + A/N^α + B/D^β`
//! - A grid search for the loss-minimizing split of a compute budget
//! - Scoring of a user-chosen split against the optimal tokens-per-parameter ratio
//! - A YAML-configured CLI for simulating and planning training runs
//!
//! # Example
//!
//! ```
//! use chinchilla::config::EngineConfig;
//! use chinchilla::scaling::{simulate, ComputeBudget, SimulationRequest};
//!
//! let budget = ComputeBudget::from_exponent(23.0).unwrap();
//! let request = SimulationRequest::new(budget).with_slider(50.0);
//! let report = simulate(&request, &EngineConfig::default()).unwrap();
//!
//! let chosen = report.chosen.unwrap();
//! assert!(chosen.compute_optimal);
//! assert!(report.optimum.loss <= chosen.loss);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod scaling;

pub use error::{DomainError, Error, Result};
