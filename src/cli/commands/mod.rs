//! CLI command implementations

mod curve;
mod levels;
mod plan;
mod simulate;
mod validate;


use serde::Serialize;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{
    apply_overrides, load_or_default, validate_config, Cli, Command, EngineArgs, EngineConfig,
    OutputFormat,
};
use crate::error::Error;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Simulate(args) => simulate::run_simulate(args, log_level),
        Command::Curve(args) => curve::run_curve(args, log_level),
        Command::Plan(args) => plan::run_plan(args, log_level),
        Command::Levels(args) => levels::run_levels(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    }
}

/// Load the engine configuration and apply command-line overrides.
pub(crate) fn load_engine(args: &EngineArgs, level: LogLevel) -> Result<EngineConfig, String> {
    if let Some(path) = &args.config {
        log(level, LogLevel::Verbose, &format!("Loading config: {}", path.display()));
    }
    let mut config =
        load_or_default(args.config.as_deref()).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut config, args);
    validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Search: {} samples, {:?} spacing, {} refinement round(s)",
            config.search.sample_count, config.search.spacing, config.search.refinement_rounds
        ),
    );
    Ok(config)
}

/// Serialize `value` for the structured formats; `None` means plain text.
pub(crate) fn render_structured<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<Option<String>, String> {
    let rendered = match format {
        OutputFormat::Text => return Ok(None),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| Error::Serialization(format!("JSON: {e}"))),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| Error::Serialization(format!("YAML: {e}")))
        }
    };
    rendered.map(Some).map_err(|e| e.to_string())
}
