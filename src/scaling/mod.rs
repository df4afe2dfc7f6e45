//! Compute-optimal scaling engine
//!
//! Models pre-training loss as `L(N, D) = E + A/N^α + B/D^β` and answers, for
//! a compute budget `C = k·N·D`:
//!
//! - which split of `C` into parameters `N` and tokens `D` minimizes loss
//!   ([`find_optimal`])
//! - how a user-chosen split compares to that optimum ([`score`], [`classify`])
//!
//! Every operation is a pure function of its inputs.

mod budget;
mod closed_form;
mod format;
mod loss;
mod presets;
mod scorer;
mod search;
mod simulate;
mod zone;

pub use budget::{ComputeBudget, ResourcePoint, DEFAULT_COMPUTE_CONSTANT, DEFAULT_OPTIMAL_RATIO};
pub use closed_form::{
    compare, compare_with_optimum, reference_point, stationary_point, ReferenceComparison,
};
pub use format::{format_count, format_flops};
pub use loss::{evaluate, LossModel, LossModelParameters};
pub use presets::{find_preset, BudgetPreset, TrainingLevel, BUDGET_PRESETS, TRAINING_LEVELS};
pub use scorer::{
    derive_resource_point, in_sweet_spot, ratio_from_slider, score, slider_from_ratio,
    EfficiencyScore, RatioAdvice, ScoringConfig, SliderConfig, DEFAULT_SENSITIVITY,
    OPTIMAL_SCORE_THRESHOLD,
};
pub use search::{find_optimal, iso_flop_curve, CurvePoint, NRange, Optimum, SearchConfig, Spacing};
pub use simulate::{
    evaluate_choice, play_levels, simulate, ChosenAllocation, LevelOutcome, SimulationReport,
    SimulationRequest,
};
pub use zone::{classify, Zone, ZoneThresholds};
