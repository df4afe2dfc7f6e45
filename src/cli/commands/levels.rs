//! Levels command implementation

use super::{load_engine, render_structured};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::LevelsArgs;
use crate::scaling::{format_count, play_levels, LevelOutcome};

/// Format one level's outcome as a string
pub fn format_outcome(outcome: &LevelOutcome) -> String {
    let level = &outcome.level;
    let mut lines = vec![format!(
        "Level {}: {} ({}, 10^{} FLOPs)",
        level.id, level.name, level.budget_label, level.exponent
    )];
    if let Some(chosen) = &outcome.report.chosen {
        let verdict = if chosen.compute_optimal { "PASS" } else { "MISS" };
        lines.push(format!(
            "  {verdict}  {} params, {} tokens, efficiency {}, {}",
            format_count(chosen.point.params),
            format_count(chosen.point.tokens),
            chosen.efficiency_score,
            chosen.zone
        ));
    }
    lines.push(format!(
        "  Best possible: {} params, loss {:.4}",
        format_count(outcome.report.optimum.point.params),
        outcome.report.optimum.loss
    ));
    lines.join("\n")
}

pub fn run_levels(args: LevelsArgs, level: LogLevel) -> Result<(), String> {
    let config = load_engine(&args.engine, level)?;
    let outcomes = play_levels(args.slider, &config).map_err(|e| e.to_string())?;

    if let Some(out) = render_structured(&outcomes, args.format)? {
        println!("{out}");
        return Ok(());
    }

    for outcome in &outcomes {
        log(level, LogLevel::Verbose, outcome.level.description);
        println!("{}", format_outcome(outcome));
    }

    let passed = outcomes
        .iter()
        .filter(|o| o.report.chosen.is_some_and(|c| c.compute_optimal))
        .count();
    println!();
    println!("{passed}/{} levels compute-optimal", outcomes.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_format_outcome_pass() {
        let outcomes = play_levels(50.0, &EngineConfig::default()).unwrap();
        let text = format_outcome(&outcomes[0]);
        assert!(text.starts_with("Level 1: Startup prototype"));
        assert!(text.contains("PASS"));
        assert!(text.contains("Best possible"));
    }

    #[test]
    fn test_format_outcome_miss() {
        let outcomes = play_levels(0.0, &EngineConfig::default()).unwrap();
        assert!(format_outcome(&outcomes[2]).contains("MISS"));
    }
}
