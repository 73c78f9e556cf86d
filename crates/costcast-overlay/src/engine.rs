//! Scenario overlay engine.
//!
//! ## Pipeline
//!
//! ```text
//! baseline cost
//!   → implied FTE            (baseline − alpha) / beta(t)
//!   → headcount edits        drift, growth offsets, explicit deltas, cost target
//!   → effective beta         multiplier reset, level shifts, growth on rate
//!   → scenario cost          alpha + beta_eff(t) × FTE′(t)
//! ```
//!
//! Months where neither headcount nor rate changed return the baseline
//! value unchanged, so the no-op scenario reproduces its input bit for bit.

use costcast_drivers::{cost_from_fte, fte_from_cost, monthly_rate, project_beta};
use costcast_types::{
    Driver, DriverContext, ImpactMode, MonthlyPoint, MonthlySeries, ScenarioParams,
};
use tracing::{debug, warn};

use crate::envelope::EventEnvelope;
use crate::error::{OverlayError, OverlayResult};
use crate::options::{CostTargetBasis, OverlayOptions};
use crate::projection::ScenarioProjection;

/// How an explicit headcount change is expressed.
#[derive(Clone, Copy, Debug, PartialEq)]
enum HeadcountDelta {
    Pct(f64),
    Abs(f64),
}

impl HeadcountDelta {
    /// Resolve the single explicit delta a parameter set carries.
    ///
    /// Precedence: `fte_delta_pct`, `fte_delta_abs`, level impact under the
    /// `fte` driver, then the summed cut plan.
    fn from_params(params: &ScenarioParams) -> Option<Self> {
        if let Some(pct) = params.fte_delta_pct() {
            return Some(Self::Pct(pct));
        }
        if let Some(abs) = params.fte_delta_abs() {
            return Some(Self::Abs(abs));
        }
        if params.driver() == Driver::Fte
            && params.impact_mode() == ImpactMode::Level
            && params.impact_magnitude() != 0.0
        {
            return Some(Self::Pct(params.impact_magnitude()));
        }
        params.cut_plan_total().map(Self::Abs)
    }

    fn apply(self, fte: f64, active: f64) -> f64 {
        match self {
            Self::Pct(pct) => fte * (1.0 + pct * active),
            Self::Abs(abs) => fte + abs * active,
        }
    }
}

// ── Engine ─────────────────────────────────────────────────────────────

/// Applies [`ScenarioParams`] to a baseline series.
#[derive(Clone, Debug, Default)]
pub struct OverlayEngine {
    options: OverlayOptions,
}

impl OverlayEngine {
    pub fn new(options: OverlayOptions) -> Self {
        Self { options }
    }

    /// Engine with default options.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    /// Project the scenario series only.
    pub fn apply(
        &self,
        baseline: &MonthlySeries,
        params: &ScenarioParams,
        context: &DriverContext,
    ) -> OverlayResult<MonthlySeries> {
        self.project(baseline, params, context).map(|p| p.series)
    }

    /// Project the scenario with its per-month headcount and rate breakdown.
    pub fn project(
        &self,
        baseline: &MonthlySeries,
        params: &ScenarioParams,
        context: &DriverContext,
    ) -> OverlayResult<ScenarioProjection> {
        if baseline.is_empty() {
            return Err(OverlayError::EmptyBaseline);
        }
        let months = match self.options.horizon_months {
            Some(0) => return Err(OverlayError::ZeroHorizon),
            Some(h) => h.min(baseline.len()),
            None => baseline.len(),
        };
        if params.lag_months() as usize >= months {
            return Err(OverlayError::LagBeyondHorizon {
                lag: params.lag_months(),
                months,
            });
        }

        debug!(
            driver = %params.driver(),
            lag = params.lag_months(),
            months,
            "projecting scenario"
        );

        let points = &baseline.points()[..months];
        let alpha = context.alpha();
        let beta_path = project_beta(context.beta(), self.options.beta_inflation_per_year, months);

        let baseline_fte = points
            .iter()
            .zip(&beta_path)
            .map(|(p, &beta)| fte_from_cost(p.value, alpha, beta))
            .collect::<Result<Vec<_>, _>>()?;

        let envelope = EventEnvelope::from_params(params);
        let active = envelope.path(months);
        let lag = params.lag_months() as usize;

        let beta_eff = self.effective_beta(params, &beta_path, &active, lag);
        let mut fte = headcount_path(params, &baseline_fte, &envelope, &active, lag);

        if let Some(pct) = params.cost_target_pct() {
            if params.beta_multiplier().is_some() {
                warn!(
                    basis = ?self.options.cost_target_basis,
                    "cost target combined with beta_multiplier; target headcount depends on the inversion basis"
                );
            }
            let target = points[lag].value * (1.0 + pct);
            let beta = match self.options.cost_target_basis {
                CostTargetBasis::ScenarioState => beta_eff[lag],
                CostTargetBasis::BaselineContext => beta_path[lag],
            };
            let required = fte_from_cost(target, alpha, beta)?;
            let delta = HeadcountDelta::Abs(required - fte[lag]);
            debug!(target_cost = target, required, current = fte[lag], "cost target headcount");
            for t in lag..months {
                fte[t] = delta.apply(fte[t], active[t]).max(0.0);
            }
        }

        let values: Vec<MonthlyPoint> = points
            .iter()
            .enumerate()
            .map(|(t, p)| {
                let untouched = fte[t].to_bits() == baseline_fte[t].to_bits()
                    && beta_eff[t].to_bits() == beta_path[t].to_bits();
                let value = if untouched {
                    p.value
                } else {
                    cost_from_fte(fte[t], alpha, beta_eff[t])
                };
                MonthlyPoint {
                    date: p.date,
                    value,
                }
            })
            .collect();

        let label = self
            .options
            .label
            .clone()
            .unwrap_or_else(|| params.driver().to_string());
        let series = MonthlySeries::new(values)?.with_label(label);

        debug!(
            first = series.first().map(|p| p.value),
            last = series.last().map(|p| p.value),
            "scenario projected"
        );

        Ok(ScenarioProjection {
            series,
            fte,
            beta_eff,
            baseline_fte,
        })
    }

    /// Per-head rate after multiplier resets and cost-driver impacts.
    ///
    /// The multiplier is a permanent reset from lag; it ignores the onset
    /// ramp and the event window.
    fn effective_beta(
        &self,
        params: &ScenarioParams,
        beta_path: &[f64],
        active: &[f64],
        lag: usize,
    ) -> Vec<f64> {
        let mut beta_eff = beta_path.to_vec();
        let impact = params.impact_magnitude();
        let cost_driven = matches!(params.driver(), Driver::Cost | Driver::CostTarget);

        if let Some(multiplier) = params.beta_multiplier() {
            for beta in beta_eff.iter_mut().skip(lag) {
                *beta *= multiplier;
            }
        }

        if impact == 0.0 {
            return beta_eff;
        }

        match params.impact_mode() {
            ImpactMode::Level if params.driver() == Driver::Cost => {
                for (beta, &a) in beta_eff.iter_mut().zip(active).skip(lag) {
                    if a != 0.0 {
                        *beta *= 1.0 + impact * a;
                    }
                }
            }
            ImpactMode::Growth if cost_driven => {
                compound(&mut beta_eff, monthly_rate(impact), active, lag);
            }
            _ => {}
        }
        beta_eff
    }
}

/// Headcount after drift, growth offsets and the explicit delta.
fn headcount_path(
    params: &ScenarioParams,
    baseline_fte: &[f64],
    envelope: &EventEnvelope,
    active: &[f64],
    lag: usize,
) -> Vec<f64> {
    let months = baseline_fte.len();
    let mut fte = baseline_fte.to_vec();

    let drift = params.drift_pp_per_year();
    if drift != 0.0 {
        let growth = 1.0 + monthly_rate(drift);
        let mut factor = 1.0;
        for value in fte.iter_mut() {
            *value *= factor;
            factor *= growth;
        }
    }

    let growth_delta = params.growth_delta_pp_per_year();
    if growth_delta != 0.0 {
        let onset: Vec<f64> = (0..months as u64).map(|t| envelope.onset_at(t)).collect();
        compound(&mut fte, monthly_rate(growth_delta), &onset, lag);
    }

    if let Some(event_growth) = params.event_growth_delta_pp_per_year() {
        if event_growth != 0.0 {
            compound(&mut fte, monthly_rate(event_growth), active, lag);
        }
    }

    if params.driver() == Driver::Fte
        && params.impact_mode() == ImpactMode::Growth
        && params.impact_magnitude() != 0.0
    {
        compound(&mut fte, monthly_rate(params.impact_magnitude()), active, lag);
    }

    if let Some(delta) = HeadcountDelta::from_params(params) {
        for t in lag..months {
            fte[t] = delta.apply(fte[t], active[t]);
        }
    }

    for value in fte.iter_mut() {
        *value = value.max(0.0);
    }
    fte
}

/// Multiply `path[t]` by `Π (1 + rate × weight[s])` for `lag ≤ s ≤ t`.
fn compound(path: &mut [f64], rate: f64, weight: &[f64], lag: usize) {
    let mut factor = 1.0;
    for (value, &w) in path.iter_mut().zip(weight).skip(lag) {
        if w != 0.0 {
            factor *= 1.0 + rate * w;
        }
        if factor != 1.0 {
            *value *= factor;
        }
    }
}

/// One-shot projection with the given options.
pub fn apply_scenario(
    baseline: &MonthlySeries,
    params: &ScenarioParams,
    context: &DriverContext,
    options: &OverlayOptions,
) -> OverlayResult<MonthlySeries> {
    OverlayEngine::new(options.clone()).apply(baseline, params, context)
}
