//! One-call simulation: optimum for a budget plus the score of a chosen split.
//!
//! Recomputed from scratch on every call; nothing is cached between requests.

use serde::{Deserialize, Serialize};

use super::budget::{ComputeBudget, ResourcePoint};
use super::closed_form::{compare_with_optimum, ReferenceComparison};
use super::loss::LossModel;
use super::presets::{TrainingLevel, TRAINING_LEVELS};
use super::scorer::{
    derive_resource_point, in_sweet_spot, ratio_from_slider, score, EfficiencyScore, RatioAdvice,
};
use super::search::{find_optimal, Optimum};
use super::zone::{classify, Zone};
use crate::config::{validate_config, EngineConfig};
use crate::error::{Error, Result};

/// Inputs of one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Compute budget
    pub budget: ComputeBudget,
    /// Allocation slider position in `[0, 100]`, if the user chose a split
    pub slider: Option<f64>,
}

impl SimulationRequest {
    /// Optimum only.
    pub fn new(budget: ComputeBudget) -> Self {
        Self { budget, slider: None }
    }

    /// Also score the split at `position`.
    pub fn with_slider(mut self, position: f64) -> Self {
        self.slider = Some(position);
        self
    }
}

/// The user's split and how it grades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChosenAllocation {
    /// Slider position the split came from
    pub slider: f64,
    /// Tokens per parameter
    pub ratio: f64,
    /// Implied `(N, D)`
    pub point: ResourcePoint,
    /// Loss at `point`
    pub loss: f64,
    /// Efficiency relative to the optimal ratio
    pub efficiency_score: EfficiencyScore,
    /// Position relative to the searched optimum
    pub zone: Zone,
    /// Ratio advice
    pub advice: RatioAdvice,
    /// Score exceeds the compute-optimal threshold
    pub compute_optimal: bool,
    /// Ratio is within the 15–25 band
    pub in_sweet_spot: bool,
}

impl ChosenAllocation {
    /// The score and the zone reach different verdicts.
    ///
    /// The score measures distance from the configured optimal ratio, the zone
    /// distance from the searched optimum. When the searched optimum has
    /// drifted away from that ratio, a split can earn the badge and still sit
    /// outside the optimal zone, or the reverse.
    pub fn verdicts_disagree(&self) -> bool {
        self.compute_optimal != (self.zone == Zone::Optimal)
    }
}

/// Everything the engine knows about one budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Budget in FLOPs
    pub budget: f64,
    /// Searched optimum
    pub optimum: Optimum,
    /// Rule of thumb versus the searched optimum
    pub reference: ReferenceComparison,
    /// Present when a slider position was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen: Option<ChosenAllocation>,
}

/// Score the split at `position` against an already-searched optimum.
pub fn evaluate_choice(
    budget: ComputeBudget,
    position: f64,
    optimum: &Optimum,
    config: &EngineConfig,
) -> Result<ChosenAllocation> {
    let model = LossModel::new(config.model)?;
    let ratio = ratio_from_slider(position, &config.slider)?;
    let point = derive_resource_point(budget, ratio, config.search.compute_constant)?;
    let efficiency_score =
        score(ratio, config.scoring.optimal_ratio, config.scoring.sensitivity)?;

    Ok(ChosenAllocation {
        slider: position,
        ratio,
        point,
        loss: model.evaluate_point(&point)?,
        efficiency_score,
        zone: classify(&point, &optimum.point, &config.zones),
        advice: RatioAdvice::for_ratio(ratio),
        compute_optimal: efficiency_score.is_compute_optimal(config.scoring.optimal_threshold),
        in_sweet_spot: in_sweet_spot(ratio),
    })
}

/// Run one simulation.
///
/// # Errors
///
/// [`Error::Config`] for an inconsistent configuration, [`Error::Domain`] for
/// an invalid request.
pub fn simulate(
    request: &SimulationRequest,
    config: &EngineConfig,
) -> std::result::Result<SimulationReport, Error> {
    validate_config(config).map_err(|e| Error::Config(format!("Invalid config: {e}")))?;

    let optimum = find_optimal(request.budget, &config.model, &config.search)?;
    let reference = compare_with_optimum(
        request.budget,
        &config.model,
        config.scoring.optimal_ratio,
        config.search.compute_constant,
        &optimum,
    )?;
    let chosen = request
        .slider
        .map(|position| evaluate_choice(request.budget, position, &optimum, config))
        .transpose()?;

    Ok(SimulationReport { budget: request.budget.flops(), optimum, reference, chosen })
}

/// Outcome of one slider choice on one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelOutcome {
    /// Level played
    pub level: TrainingLevel,
    /// Simulation at the level's budget
    pub report: SimulationReport,
}

/// Play the same slider choice on every training level.
pub fn play_levels(
    position: f64,
    config: &EngineConfig,
) -> std::result::Result<Vec<LevelOutcome>, Error> {
    TRAINING_LEVELS
        .iter()
        .map(|level| -> std::result::Result<LevelOutcome, Error> {
            let request = SimulationRequest::new(level.budget()?).with_slider(position);
            Ok(LevelOutcome { level: *level, report: simulate(&request, config)? })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn budget(flops: f64) -> ComputeBudget {
        ComputeBudget::new(flops).unwrap()
    }

    #[test]
    fn test_simulate_without_slider() {
        let report = simulate(&SimulationRequest::new(budget(1e23)), &EngineConfig::default())
            .unwrap();
        assert!(report.chosen.is_none());
        assert_eq!(report.budget, 1e23);
        assert!(report.optimum.loss > 0.0);
        assert_relative_eq!(report.optimum.point.flops(6.0), 1e23, max_relative = 1e-9);
    }

    #[test]
    fn test_slider_midpoint_scores_100() {
        let request = SimulationRequest::new(budget(1e21)).with_slider(50.0);
        let report = simulate(&request, &EngineConfig::default()).unwrap();
        let chosen = report.chosen.unwrap();

        assert!((chosen.ratio - 20.0).abs() < 1e-6);
        assert!(chosen.efficiency_score.value() > 99.999);
        assert!(chosen.compute_optimal);
        assert!(chosen.in_sweet_spot);
        assert_eq!(chosen.advice, RatioAdvice::Balanced);
        assert_relative_eq!(chosen.point.flops(6.0), 1e21, max_relative = 1e-9);
    }

    #[test]
    fn test_badge_and_zone_can_disagree() {
        let config = EngineConfig::default();
        let small = simulate(&SimulationRequest::new(budget(1e18)).with_slider(50.0), &config)
            .unwrap()
            .chosen
            .unwrap();
        assert!(small.compute_optimal);
        assert_eq!(small.zone, Zone::Optimal);
        assert!(!small.verdicts_disagree());

        // The searched optimum is near 75 tokens per parameter at 1e23.
        let large = simulate(&SimulationRequest::new(budget(1e23)).with_slider(50.0), &config)
            .unwrap()
            .chosen
            .unwrap();
        assert!(large.compute_optimal);
        assert_eq!(large.zone, Zone::Overparameterized);
        assert!(large.verdicts_disagree());
    }

    #[test]
    fn test_extreme_sliders_leave_optimal_zone() {
        let config = EngineConfig::default();
        let b = budget(1e22);
        let data_heavy = simulate(&SimulationRequest::new(b).with_slider(0.0), &config).unwrap();
        let param_heavy = simulate(&SimulationRequest::new(b).with_slider(100.0), &config).unwrap();

        let data_heavy = data_heavy.chosen.unwrap();
        let param_heavy = param_heavy.chosen.unwrap();
        assert_eq!(data_heavy.zone, Zone::Underparameterized);
        assert_eq!(param_heavy.zone, Zone::Overparameterized);
        assert_eq!(data_heavy.advice, RatioAdvice::DataHeavy);
        assert_eq!(param_heavy.advice, RatioAdvice::ParameterHeavy);
        assert!(!param_heavy.compute_optimal);
    }

    #[test]
    fn test_chosen_loss_not_below_optimum_on_grid() {
        let config = EngineConfig::default().with_samples(10_000);
        let report =
            simulate(&SimulationRequest::new(budget(1e20)).with_slider(80.0), &config).unwrap();
        assert!(report.chosen.unwrap().loss >= report.optimum.loss);
    }

    #[test]
    fn test_out_of_range_slider_is_domain_error() {
        let request = SimulationRequest::new(budget(1e21)).with_slider(150.0);
        let err = simulate(&request, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Domain(crate::error::DomainError::SliderOutOfRange(_))));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let config = EngineConfig::default().with_samples(0);
        let err = simulate(&SimulationRequest::new(budget(1e21)), &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let request = SimulationRequest::new(budget(7.3e22)).with_slider(42.0);
        let config = EngineConfig::default();
        assert_eq!(simulate(&request, &config).unwrap(), simulate(&request, &config).unwrap());
    }

    #[test]
    fn test_play_levels_covers_every_level() {
        let outcomes = play_levels(50.0, &EngineConfig::default()).unwrap();
        assert_eq!(outcomes.len(), TRAINING_LEVELS.len());
        for pair in outcomes.windows(2) {
            assert!(pair[1].report.optimum.point.params > pair[0].report.optimum.point.params);
        }
    }

    #[test]
    fn test_report_json_omits_missing_choice() {
        let report = simulate(&SimulationRequest::new(budget(1e21)), &EngineConfig::default())
            .unwrap();
        let json = serde_json::to_value(report).unwrap();
        assert!(json.get("chosen").is_none());
        assert!(json["optimum"]["point"]["params"].as_f64().unwrap() > 0.0);
    }
}
