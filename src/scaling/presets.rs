//! Named budgets: well-known training runs and the three training levels.

use serde::Serialize;

use super::budget::ComputeBudget;
use crate::error::Result;

/// A labelled budget for the planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetPreset {
    /// Short key used on the command line
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// Budget as a power of ten
    pub exponent: f64,
}

impl BudgetPreset {
    /// Budget in FLOPs.
    pub fn budget(&self) -> Result<ComputeBudget> {
        ComputeBudget::from_exponent(self.exponent)
    }
}

/// Well-known training budgets.
pub const BUDGET_PRESETS: [BudgetPreset; 3] = [
    BudgetPreset { key: "gpt3", label: "GPT-3 (175B)", exponent: 23.5 },
    BudgetPreset { key: "gopher", label: "Gopher (280B)", exponent: 23.76 },
    BudgetPreset { key: "llama3", label: "Llama 3 (8B)", exponent: 22.0 },
];

/// Look up a preset by key, case-insensitively.
pub fn find_preset(key: &str) -> Option<&'static BudgetPreset> {
    BUDGET_PRESETS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}

/// One stage of the allocation exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingLevel {
    /// 1-based level number
    pub id: u32,
    /// Level name
    pub name: &'static str,
    /// Scale label
    pub budget_label: &'static str,
    /// Budget as a power of ten
    pub exponent: f64,
    /// Scenario text
    pub description: &'static str,
}

impl TrainingLevel {
    /// Budget in FLOPs.
    pub fn budget(&self) -> Result<ComputeBudget> {
        ComputeBudget::from_exponent(self.exponent)
    }
}

/// Levels in play order; each is a thousand times the previous budget.
pub const TRAINING_LEVELS: [TrainingLevel; 3] = [
    TrainingLevel {
        id: 1,
        name: "Startup prototype",
        budget_label: "Small scale (seed round)",
        exponent: 18.0,
        description: "Funding is tight. Train a demo on very little compute: a big hollow model or a small sharp one?",
    },
    TrainingLevel {
        id: 2,
        name: "Unicorn rising",
        budget_label: "Medium scale (series B)",
        exponent: 21.0,
        description: "A serious round closed and compute grew a thousandfold. Time to test the scaling law for real.",
    },
    TrainingLevel {
        id: 3,
        name: "AGI sprint",
        budget_label: "Hyperscale (IPO)",
        exponent: 24.0,
        description: "Every datacenter is open to you. Each allocation mistake now wastes hundreds of millions.",
    },
];
