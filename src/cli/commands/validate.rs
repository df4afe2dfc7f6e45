//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, validation_notes, EngineConfig, ValidateArgs};
use crate::scaling::NRange;

/// Format loss model constants as a string
pub fn format_model_info(config: &EngineConfig) -> String {
    let m = &config.model;
    format!(
        "  Loss: L = {} + {}/N^{} + {}/D^{}",
        m.irreducible, m.a, m.alpha, m.b, m.beta
    )
}

/// Format search configuration as a string
pub fn format_search_info(config: &EngineConfig) -> String {
    let s = &config.search;
    let range = match s.n_range {
        NRange::Absolute { min, max } => format!("N in [{min:.3e}, {max:.3e}]"),
        NRange::AroundReference { below, above } => {
            format!("N_ref / {below} to N_ref * {above} (ratio {})", s.reference_ratio)
        }
    };
    let mut lines = vec![
        format!("  Samples: {} ({:?} spacing)", s.sample_count, s.spacing),
        format!("  Range: {range}"),
        format!("  Compute constant: {}", s.compute_constant),
    ];
    if s.refinement_rounds > 0 {
        lines.push(format!("  Refinement rounds: {}", s.refinement_rounds));
    }
    lines.join("\n")
}

/// Format zone, slider and scoring configuration as a string
pub fn format_scoring_info(config: &EngineConfig) -> String {
    [
        format!(
            "  Zones: optimal between {} and {} x N_opt",
            config.zones.low_factor, config.zones.high_factor
        ),
        format!(
            "  Slider: ratio {} to {}",
            config.slider.min_ratio, config.slider.max_ratio
        ),
        format!(
            "  Scoring: optimal ratio {}, sensitivity {}, badge above {}",
            config.scoring.optimal_ratio, config.scoring.sensitivity, config.scoring.optimal_threshold
        ),
    ]
    .join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(config: &EngineConfig) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_model_info(config));
    println!();
    println!("{}", format_search_info(config));
    println!();
    println!("{}", format_scoring_info(config));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");
    for note in validation_notes(&config) {
        log(level, LogLevel::Normal, &format!("  Note: {note}"));
    }

    if args.detailed {
        print_detailed_summary(&config);
    }

    Ok(())
}
