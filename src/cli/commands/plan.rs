//! Plan command implementation

use serde::Serialize;

use super::{load_engine, render_structured};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PlanArgs;
use crate::scaling::{
    compare, format_count, format_flops, stationary_point, ReferenceComparison, ResourcePoint,
};

/// Planner output: rule of thumb, grid search and analytic minimum side by side
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub budget: f64,
    pub optimal_ratio: f64,
    pub comparison: ReferenceComparison,
    pub stationary: ResourcePoint,
    /// Rule of thumb and search agree on N within one order of magnitude
    pub within_one_decade: bool,
}

/// Format one planned split as a row
pub fn format_split(label: &str, point: &ResourcePoint, loss: Option<f64>) -> String {
    let loss = loss.map(|l| format!("  loss {l:.4}")).unwrap_or_default();
    format!(
        "  {label:<14} N = {:>10}  D = {:>10}  ({:.1} tokens/param){loss}",
        format_count(point.params),
        format_count(point.tokens),
        point.ratio()
    )
}

pub fn run_plan(args: PlanArgs, level: LogLevel) -> Result<(), String> {
    let config = load_engine(&args.engine, level)?;
    let budget = args.budget.resolve().map_err(|e| e.to_string())?;
    let optimal_ratio = config.scoring.optimal_ratio;

    let comparison = compare(budget, &config.model, optimal_ratio, &config.search)
        .map_err(|e| e.to_string())?;
    let stationary = stationary_point(budget, &config.model, config.search.compute_constant)
        .map_err(|e| e.to_string())?;

    let report = PlanReport {
        budget: budget.flops(),
        optimal_ratio,
        comparison,
        stationary,
        within_one_decade: comparison.agrees_within(1.0),
    };
    if let Some(out) = render_structured(&report, args.format)? {
        println!("{out}");
        return Ok(());
    }

    log(level, LogLevel::Normal, &format!("Training plan for {}", format_flops(report.budget)));
    println!(
        "{}",
        format_split("rule of thumb", &comparison.reference, Some(comparison.reference_loss))
    );
    println!("{}", format_split("searched", &comparison.searched, Some(comparison.searched_loss)));
    log(level, LogLevel::Verbose, &format_split("analytic", &stationary, None));
    println!();
    println!(
        "Following {optimal_ratio} tokens/param costs {:.4} extra loss ({:.2} decades from the searched N)",
        comparison.excess_loss(),
        comparison.params_log10_gap
    );
    if !report.within_one_decade {
        println!("Warning: rule of thumb is more than one order of magnitude off for this model");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_split_with_loss() {
        let point = ResourcePoint::new(1e9, 2e10).unwrap();
        let row = format_split("searched", &point, Some(2.0));
        assert!(row.contains("searched"));
        assert!(row.contains("20.0 tokens/param"));
        assert!(row.contains("loss 2.0000"));
    }

    #[test]
    fn test_format_split_without_loss() {
        let point = ResourcePoint::new(1e9, 2e10).unwrap();
        assert!(!format_split("analytic", &point, None).contains("loss"));
    }
}
