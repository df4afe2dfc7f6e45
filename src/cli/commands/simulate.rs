//! Simulate command implementation

use super::{load_engine, render_structured};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::SimulateArgs;
use crate::scaling::{
    format_count, format_flops, simulate, ChosenAllocation, Optimum, ReferenceComparison,
    ScoringConfig, SimulationReport, SimulationRequest,
};

/// Format the searched optimum as a string
pub fn format_optimum(optimum: &Optimum) -> String {
    [
        "Optimal allocation:".to_string(),
        format!("  Parameters: {}", format_count(optimum.point.params)),
        format!("  Tokens: {}", format_count(optimum.point.tokens)),
        format!("  Tokens per parameter: {:.1}", optimum.ratio()),
        format!("  Loss: {:.4}", optimum.loss),
        format!(
            "  Exact minimum within N in [{}, {}]",
            format_count(optimum.bracket.0),
            format_count(optimum.bracket.1)
        ),
    ]
    .join("\n")
}

/// Format the rule-of-thumb comparison as a string
pub fn format_reference(reference: &ReferenceComparison, optimal_ratio: f64) -> String {
    [
        format!("Rule of thumb ({optimal_ratio} tokens per parameter):"),
        format!("  Parameters: {}", format_count(reference.reference.params)),
        format!("  Tokens: {}", format_count(reference.reference.tokens)),
        format!("  Loss: {:.4} (+{:.4} vs optimum)", reference.reference_loss, reference.excess_loss()),
        format!("  Gap: {:.2} orders of magnitude in N", reference.params_log10_gap),
    ]
    .join("\n")
}

/// Format a scored slider choice as a string
///
/// `searched_ratio` is the tokens per parameter of the searched optimum, the
/// point the zone is measured against.
pub fn format_choice(
    chosen: &ChosenAllocation,
    scoring: &ScoringConfig,
    searched_ratio: f64,
) -> String {
    let badge = if chosen.compute_optimal { "  [compute-optimal]" } else { "" };
    let mut lines = vec![
        format!("Your allocation (slider {:.0}):", chosen.slider),
        format!("  Parameters: {}", format_count(chosen.point.params)),
        format!("  Tokens: {}", format_count(chosen.point.tokens)),
        format!("  Tokens per parameter: {:.1}", chosen.ratio),
        format!("  Loss: {:.4}", chosen.loss),
        format!("  Efficiency: {}{badge}", chosen.efficiency_score),
        format!("  Zone: {}", chosen.zone.title()),
        format!("    {}", chosen.zone.description()),
        format!("  {}", chosen.advice.message()),
    ];
    if chosen.verdicts_disagree() {
        lines.push(format!(
            "  Score and zone disagree: the score measures distance from {} tokens per parameter, the zone from the searched optimum at {searched_ratio:.1}",
            scoring.optimal_ratio
        ));
        lines.push("  Run `chinchilla plan` to compare the two".to_string());
    }
    if chosen.in_sweet_spot {
        lines.push("  Within the 15-25 tokens-per-parameter sweet spot".to_string());
    } else if !chosen.compute_optimal {
        let threshold = scoring.optimal_threshold;
        lines.push(format!("  Scores above {threshold} count as compute-optimal"));
    }
    lines.join("\n")
}

/// Print the full text report
pub fn print_report(report: &SimulationReport, scoring: &ScoringConfig) {
    println!("Budget: {:.2e} FLOPs ({})", report.budget, format_flops(report.budget));
    println!();
    println!("{}", format_optimum(&report.optimum));
    println!();
    println!("{}", format_reference(&report.reference, scoring.optimal_ratio));

    if let Some(chosen) = &report.chosen {
        println!();
        println!("{}", format_choice(chosen, scoring, report.optimum.ratio()));
    }
}

pub fn run_simulate(args: SimulateArgs, level: LogLevel) -> Result<(), String> {
    let config = load_engine(&args.engine, level)?;
    let budget = args.budget.resolve().map_err(|e| e.to_string())?;

    let mut request = SimulationRequest::new(budget);
    if let Some(position) = args.slider {
        request = request.with_slider(position);
    }

    log(level, LogLevel::Verbose, &format!("Simulating budget {budget}"));
    let report = simulate(&request, &config).map_err(|e| e.to_string())?;
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Best sample {} of {}, {} refinement(s) improved it",
            report.optimum.sample_index, config.search.sample_count, report.optimum.refinements
        ),
    );

    match render_structured(&report, args.format)? {
        Some(out) => println!("{out}"),
        None => print_report(&report, &config.scoring),
    }

    Ok(())
}
