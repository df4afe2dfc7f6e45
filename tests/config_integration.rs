//! Integration tests: YAML engine configuration driving the full pipeline
//!
//! Config file → load/validate → search → score, plus CLI argument handling.

use chinchilla::config::{apply_overrides, load_config, parse_args, Command, EngineConfig};
use chinchilla::scaling::{
    find_optimal, simulate, stationary_point, ComputeBudget, NRange, SimulationRequest, Spacing,
    Zone,
};
use chinchilla::Error;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_symmetric_model_optimum_at_ratio_one() {
    // Equal constants and exponents put the minimum at N = D.
    let file = write_config(
        r"
model:
  a: 400.0
  b: 400.0
  alpha: 0.3
  beta: 0.3
search:
  sample_count: 10000
",
    );
    let config = load_config(file.path()).unwrap();
    let budget = ComputeBudget::from_exponent(22.0).unwrap();

    let optimum = find_optimal(budget, &config.model, &config.search).unwrap();
    let analytic = stationary_point(budget, &config.model, 6.0).unwrap();

    assert!((analytic.ratio() - 1.0).abs() < 1e-9);
    assert!((optimum.ratio() - 1.0).abs() < 0.01, "ratio {}", optimum.ratio());
}

#[test]
fn test_default_model_matches_analytic_minimum() {
    let config = EngineConfig::default().with_samples(10_000);
    let budget = ComputeBudget::from_exponent(23.0).unwrap();

    let optimum = find_optimal(budget, &config.model, &config.search).unwrap();
    let analytic = stationary_point(budget, &config.model, 6.0).unwrap();

    let decades = (optimum.point.params.log10() - analytic.params.log10()).abs();
    assert!(decades < 0.001, "search is {decades} decades from the analytic minimum");
}

#[test]
fn test_absolute_linear_range_from_yaml() {
    let file = write_config(
        r"
search:
  sample_count: 500
  spacing: linear
  n_range:
    kind: absolute
    min: 1.0e8
    max: 1.0e11
",
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.search.spacing, Spacing::Linear);
    assert_eq!(config.search.n_range, NRange::Absolute { min: 1e8, max: 1e11 });

    let optimum =
        find_optimal(ComputeBudget::new(1e21).unwrap(), &config.model, &config.search).unwrap();
    assert!(optimum.point.params >= 1e8 && optimum.point.params <= 1e11);
}

#[test]
fn test_custom_zone_thresholds_change_classification() {
    let budget = ComputeBudget::from_exponent(21.0).unwrap();
    let request = SimulationRequest::new(budget).with_slider(50.0);

    let narrow = write_config("zones:\n  low_factor: 0.99\n  high_factor: 1.01\n");
    let wide = write_config("zones:\n  low_factor: 0.01\n  high_factor: 100.0\n");

    let narrow = simulate(&request, &load_config(narrow.path()).unwrap()).unwrap();
    let wide = simulate(&request, &load_config(wide.path()).unwrap()).unwrap();

    // Ratio 20 is more parameters than the searched optimum at default exponents.
    assert_eq!(narrow.chosen.unwrap().zone, Zone::Overparameterized);
    assert_eq!(wide.chosen.unwrap().zone, Zone::Optimal);
}

#[test]
fn test_scoring_section_changes_badge() {
    let strict = write_config("scoring:\n  sensitivity: 400.0\n  optimal_threshold: 99.9\n");
    let config = load_config(strict.path()).unwrap();
    let request =
        SimulationRequest::new(ComputeBudget::from_exponent(20.0).unwrap()).with_slider(48.0);

    let chosen = simulate(&request, &config).unwrap().chosen.unwrap();
    assert!(!chosen.compute_optimal);
    assert!(chosen.in_sweet_spot);
}

#[test]
fn test_invalid_config_reports_config_error() {
    let file = write_config("slider:\n  min_ratio: 0.0\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert_eq!(err.code(), "E002");
}

#[test]
fn test_unknown_field_rejected() {
    let file = write_config("search:\n  samples: 10\n");
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_cli_overrides_flow_into_search() {
    let cli = parse_args([
        "chinchilla", "curve", "--exponent", "20", "--samples", "300", "--refine", "2",
    ])
    .unwrap();
    let Command::Curve(args) = cli.command else {
        panic!("Expected Curve command");
    };

    let mut config = EngineConfig::default();
    apply_overrides(&mut config, &args.engine);
    assert_eq!(config.search.sample_count, 300);
    assert_eq!(config.search.refinement_rounds, 2);
    assert!((args.budget.resolve().unwrap().exponent() - 20.0).abs() < 1e-12);
}

#[test]
fn test_cli_rejects_two_budget_sources() {
    assert!(parse_args(["chinchilla", "plan", "--budget", "1e20", "--preset", "gpt3"]).is_err());
    assert!(parse_args(["chinchilla", "plan"]).is_err());
}
