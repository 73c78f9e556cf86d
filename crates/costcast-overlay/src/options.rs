//! Overlay options.

use serde::{Deserialize, Serialize};

/// Default annual beta inflation applied to the baseline driver context.
pub const DEFAULT_BETA_INFLATION: f64 = 0.03;

/// Which per-head rate a cost target is inverted against.
///
/// The two only differ when a `beta_multiplier` is also in play: the target
/// headcount is `(target − alpha) / beta`, and the multiplier changes `beta`.
/// Which one is right is still open, so the default keeps the unmodified
/// rate and combining the two logs a warning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTargetBasis {
    /// Effective beta at the lag month, multiplier and level shifts included.
    ScenarioState,
    /// Projected baseline beta, ignoring scenario overrides.
    #[default]
    BaselineContext,
}

/// Knobs for a single overlay run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    /// Annual inflation of the per-head rate.
    pub beta_inflation_per_year: f64,
    /// Truncate the output to this many months.
    pub horizon_months: Option<usize>,
    /// Label for the output series; the driver name when absent.
    pub label: Option<String>,
    pub cost_target_basis: CostTargetBasis,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            beta_inflation_per_year: DEFAULT_BETA_INFLATION,
            horizon_months: None,
            label: None,
            cost_target_basis: CostTargetBasis::default(),
        }
    }
}

impl OverlayOptions {
    pub fn with_horizon(mut self, months: usize) -> Self {
        self.horizon_months = Some(months);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_cost_target_basis(mut self, basis: CostTargetBasis) -> Self {
        self.cost_target_basis = basis;
        self
    }

    pub fn with_beta_inflation(mut self, per_year: f64) -> Self {
        self.beta_inflation_per_year = per_year;
        self
    }
}
