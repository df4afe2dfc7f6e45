//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! chinchilla simulate --budget 1e23 --slider 50
//! chinchilla curve --exponent 21 --format json
//! chinchilla plan --preset gopher
//! chinchilla levels --slider 40
//! chinchilla validate engine.yaml --detailed
//! ```

mod core;
mod types;

pub use core::{
    apply_overrides, parse_args, BudgetArgs, Cli, Command, CurveArgs, EngineArgs, LevelsArgs,
    PlanArgs, SimulateArgs, ValidateArgs,
};
pub use types::OutputFormat;
