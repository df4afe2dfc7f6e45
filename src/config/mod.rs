//! Declarative engine configuration
//!
//! YAML schema, loading, validation and command-line parsing.

mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, BudgetArgs, Cli, Command, CurveArgs, EngineArgs, LevelsArgs,
    OutputFormat, PlanArgs, SimulateArgs, ValidateArgs,
};
pub use loader::{load_config, load_or_default};
pub use schema::EngineConfig;
pub use validate::{validate_config, validation_notes, ValidationError};
