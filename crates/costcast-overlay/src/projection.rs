//! Projection results and comparison against the baseline.

use chrono::NaiveDate;
use costcast_types::MonthlySeries;
use serde::{Deserialize, Serialize};

/// A projected scenario with the per-month breakdown behind it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub series: MonthlySeries,
    /// Scenario headcount per month.
    pub fte: Vec<f64>,
    /// Effective per-head rate per month.
    pub beta_eff: Vec<f64>,
    /// Headcount implied by the baseline alone.
    pub baseline_fte: Vec<f64>,
}

impl ScenarioProjection {
    pub fn summary(&self, baseline: &MonthlySeries) -> Option<ScenarioSummary> {
        ScenarioSummary::compare(baseline, &self.series)
    }
}

/// Headline numbers for a scenario against its baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Months compared (the shorter of the two series).
    pub months: usize,
    pub baseline_total: f64,
    pub scenario_total: f64,
    pub delta: f64,
    /// `delta / baseline_total`; absent for a zero baseline.
    pub delta_pct: Option<f64>,
    /// Last scenario month over the first baseline month.
    pub final_multiplier: Option<f64>,
    pub min_value: f64,
    pub min_date: NaiveDate,
}

impl ScenarioSummary {
    /// Compare month by month; `None` when either series is empty.
    pub fn compare(baseline: &MonthlySeries, scenario: &MonthlySeries) -> Option<Self> {
        let months = baseline.len().min(scenario.len());
        if months == 0 {
            return None;
        }
        let base = &baseline.points()[..months];
        let scen = &scenario.points()[..months];

        let baseline_total: f64 = base.iter().map(|p| p.value).sum();
        let scenario_total: f64 = scen.iter().map(|p| p.value).sum();
        let delta = scenario_total - baseline_total;

        let min = scen
            .iter()
            .min_by(|a, b| a.value.total_cmp(&b.value))?;

        let initial = base[0].value;
        let final_multiplier = (initial != 0.0).then(|| scen[months - 1].value / initial);

        Some(Self {
            months,
            baseline_total,
            scenario_total,
            delta,
            delta_pct: (baseline_total != 0.0).then(|| delta / baseline_total),
            final_multiplier,
            min_value: min.value,
            min_date: min.date,
        })
    }
}
