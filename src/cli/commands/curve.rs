//! Curve command implementation

use serde::Serialize;

use super::{load_engine, render_structured};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::CurveArgs;
use crate::scaling::{find_optimal, format_count, iso_flop_curve, CurvePoint, Optimum};

/// Curve samples together with the optimum found on them
#[derive(Debug, Serialize)]
pub struct CurveReport {
    pub budget: f64,
    pub points: Vec<CurvePoint>,
    pub optimum: Optimum,
}

/// Format one curve sample as a table row
pub fn format_row(index: usize, point: &CurvePoint, best: bool) -> String {
    let marker = if best { " *" } else { "" };
    format!(
        "{index:>6}  {:>12}  {:>12}  {:>10.2}  {:.6}{marker}",
        format_count(point.params),
        format_count(point.tokens),
        point.ratio,
        point.loss
    )
}

pub fn run_curve(args: CurveArgs, level: LogLevel) -> Result<(), String> {
    let config = load_engine(&args.engine, level)?;
    let budget = args.budget.resolve().map_err(|e| e.to_string())?;

    let points =
        iso_flop_curve(budget, &config.model, &config.search).map_err(|e| e.to_string())?;
    let optimum =
        find_optimal(budget, &config.model, &config.search).map_err(|e| e.to_string())?;

    let report = CurveReport { budget: budget.flops(), points, optimum };
    if let Some(out) = render_structured(&report, args.format)? {
        println!("{out}");
        return Ok(());
    }

    log(level, LogLevel::Normal, &format!("Iso-FLOP curve for {budget}"));
    println!("{:>6}  {:>12}  {:>12}  {:>10}  loss", "sample", "params", "tokens", "ratio");
    for (i, point) in report.points.iter().enumerate() {
        println!("{}", format_row(i, point, i == report.optimum.sample_index));
    }
    if report.optimum.refinements > 0 {
        println!();
        println!(
            "Refined optimum: {} params, loss {:.6}",
            format_count(report.optimum.point.params),
            report.optimum.loss
        );
    }

    Ok(())
}
