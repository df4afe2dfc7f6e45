//! Core CLI types - Cli, Command, and argument structs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::error::Error;
use crate::scaling::{find_preset, ComputeBudget, BUDGET_PRESETS};

/// Chinchilla: compute-optimal scaling-law engine
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "chinchilla")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Find the compute-optimal split between model size and training tokens")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Find the optimal split for a budget and optionally score a slider choice
    Simulate(SimulateArgs),

    /// Print the iso-FLOP loss curve for a budget
    Curve(CurveArgs),

    /// Compare the 20-tokens-per-parameter rule of thumb with the searched optimum
    Plan(PlanArgs),

    /// Score one slider choice on every training level
    Levels(LevelsArgs),

    /// Validate an engine configuration file
    Validate(ValidateArgs),
}

/// Budget selection: exactly one of raw FLOPs, a power of ten or a preset
#[derive(Args, Debug, Clone, PartialEq)]
#[group(required = true, multiple = false)]
pub struct BudgetArgs {
    /// Compute budget in FLOPs (e.g. 1e23)
    #[arg(long, value_name = "FLOPS")]
    pub budget: Option<f64>,

    /// Compute budget as a power of ten (e.g. 23 for 10^23 FLOPs)
    #[arg(long, value_name = "EXP")]
    pub exponent: Option<f64>,

    /// Named budget preset (gpt3, gopher, llama3)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,
}

impl BudgetArgs {
    /// Resolve to a validated budget.
    pub fn resolve(&self) -> Result<ComputeBudget, Error> {
        if let Some(flops) = self.budget {
            return Ok(ComputeBudget::new(flops)?);
        }
        if let Some(exponent) = self.exponent {
            return Ok(ComputeBudget::from_exponent(exponent)?);
        }
        if let Some(name) = &self.preset {
            let preset = find_preset(name).ok_or_else(|| {
                let known: Vec<_> = BUDGET_PRESETS.iter().map(|p| p.key).collect();
                Error::Config(format!("Unknown preset: {name}. Valid presets: {}", known.join(", ")))
            })?;
            return Ok(preset.budget()?);
        }
        Err(Error::Config("No budget given\n  → Use --budget, --exponent or --preset".into()))
    }
}

/// Engine configuration shared by every computing command
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct EngineArgs {
    /// Path to YAML engine configuration
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the number of grid samples
    #[arg(long)]
    pub samples: Option<usize>,

    /// Override the number of refinement rounds
    #[arg(long)]
    pub refine: Option<usize>,
}

/// Arguments for the simulate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub budget: BudgetArgs,

    /// Allocation slider position (0 = data-heavy, 100 = parameter-heavy)
    #[arg(long)]
    pub slider: Option<f64>,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the curve command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CurveArgs {
    #[command(flatten)]
    pub budget: BudgetArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the plan command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PlanArgs {
    #[command(flatten)]
    pub budget: BudgetArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the levels command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct LevelsArgs {
    /// Allocation slider position (0 = data-heavy, 100 = parameter-heavy)
    #[arg(long, default_value = "50")]
    pub slider: f64,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML engine configuration
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to an engine configuration
pub fn apply_overrides(config: &mut crate::config::EngineConfig, args: &EngineArgs) {
    if let Some(samples) = args.samples {
        config.search.sample_count = samples;
    }
    if let Some(rounds) = args.refine {
        config.search.refinement_rounds = rounds;
    }
}
