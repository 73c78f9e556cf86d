//! Scenario parameters: the intervention descriptor.
//!
//! [`ScenarioParams`] is a single typed record. Every path that produces one
//! (the builder, serde, [`ScenarioParams::from_value`]) runs the same
//! construction checks, so a value of this type is always structurally
//! sound. Numeric *bounds* are a separate concern handled by the validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ParamsError, ParamsResult};
use crate::types::{Driver, ImpactMode, RampShape};

// ── Scenario Params ────────────────────────────────────────────────────

/// A structured what-if intervention.
///
/// All fraction-like fields are fractions (`0.05` = 5%). Months count from
/// the first row of the baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScenarioParams")]
pub struct ScenarioParams {
    driver: Driver,
    lag_months: u32,
    onset_duration_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_duration_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recovery_duration_months: Option<u32>,
    shape: RampShape,
    impact_mode: ImpactMode,
    impact_magnitude: f64,
    growth_delta_pp_per_year: f64,
    drift_pp_per_year: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_growth_delta_pp_per_year: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fte_delta_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fte_delta_abs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    beta_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_target_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fte_cut_plan: Option<BTreeMap<String, f64>>,
}

impl Default for ScenarioParams {
    /// The no-op intervention: applying it reproduces the baseline.
    fn default() -> Self {
        Self {
            driver: Driver::Cost,
            lag_months: 0,
            onset_duration_months: 0,
            event_duration_months: None,
            recovery_duration_months: None,
            shape: RampShape::Step,
            impact_mode: ImpactMode::Level,
            impact_magnitude: 0.0,
            growth_delta_pp_per_year: 0.0,
            drift_pp_per_year: 0.0,
            event_growth_delta_pp_per_year: None,
            fte_delta_pct: None,
            fte_delta_abs: None,
            beta_multiplier: None,
            cost_target_pct: None,
            fte_cut_plan: None,
        }
    }
}

impl ScenarioParams {
    /// Start a builder from the no-op record.
    pub fn builder() -> ScenarioParamsBuilder {
        ScenarioParamsBuilder {
            inner: Self::default(),
        }
    }

    /// A builder seeded with this record, for producing adjusted copies.
    pub fn to_builder(&self) -> ScenarioParamsBuilder {
        ScenarioParamsBuilder {
            inner: self.clone(),
        }
    }

    /// Parse a plain JSON mapping, reporting construction failures as
    /// [`ParamsError`] rather than a serde message.
    pub fn from_value(value: &serde_json::Value) -> ParamsResult<Self> {
        let raw: RawScenarioParams = serde_json::from_value(value.clone())
            .map_err(|e| ParamsError::Malformed(e.to_string()))?;
        Self::try_from(raw)
    }

    fn check(&self) -> ParamsResult<()> {
        let floats: [(&'static str, Option<f64>); 8] = [
            ("impact_magnitude", Some(self.impact_magnitude)),
            ("growth_delta_pp_per_year", Some(self.growth_delta_pp_per_year)),
            ("drift_pp_per_year", Some(self.drift_pp_per_year)),
            (
                "event_growth_delta_pp_per_year",
                self.event_growth_delta_pp_per_year,
            ),
            ("fte_delta_pct", self.fte_delta_pct),
            ("fte_delta_abs", self.fte_delta_abs),
            ("beta_multiplier", self.beta_multiplier),
            ("cost_target_pct", self.cost_target_pct),
        ];
        for (field, value) in floats {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ParamsError::NonFinite { field, value: v });
                }
            }
        }

        if let Some(m) = self.beta_multiplier {
            if m <= 0.0 {
                return Err(ParamsError::NonPositiveBetaMultiplier(m));
            }
        }

        if self.fte_delta_pct.is_some() && self.fte_delta_abs.is_some() {
            return Err(ParamsError::ConflictingFteDelta);
        }

        if let Some(plan) = &self.fte_cut_plan {
            for (segment, &value) in plan {
                if !value.is_finite() {
                    return Err(ParamsError::InvalidCutPlan {
                        segment: segment.clone(),
                        value,
                    });
                }
            }
        }

        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn driver(&self) -> Driver {
        self.driver
    }

    pub fn lag_months(&self) -> u32 {
        self.lag_months
    }

    pub fn onset_duration_months(&self) -> u32 {
        self.onset_duration_months
    }

    /// `None` means the effect is permanent.
    pub fn event_duration_months(&self) -> Option<u32> {
        self.event_duration_months
    }

    pub fn recovery_duration_months(&self) -> Option<u32> {
        self.recovery_duration_months
    }

    pub fn shape(&self) -> RampShape {
        self.shape
    }

    pub fn impact_mode(&self) -> ImpactMode {
        self.impact_mode
    }

    pub fn impact_magnitude(&self) -> f64 {
        self.impact_magnitude
    }

    pub fn growth_delta_pp_per_year(&self) -> f64 {
        self.growth_delta_pp_per_year
    }

    pub fn drift_pp_per_year(&self) -> f64 {
        self.drift_pp_per_year
    }

    pub fn event_growth_delta_pp_per_year(&self) -> Option<f64> {
        self.event_growth_delta_pp_per_year
    }

    pub fn fte_delta_pct(&self) -> Option<f64> {
        self.fte_delta_pct
    }

    pub fn fte_delta_abs(&self) -> Option<f64> {
        self.fte_delta_abs
    }

    pub fn beta_multiplier(&self) -> Option<f64> {
        self.beta_multiplier
    }

    pub fn cost_target_pct(&self) -> Option<f64> {
        self.cost_target_pct
    }

    pub fn fte_cut_plan(&self) -> Option<&BTreeMap<String, f64>> {
        self.fte_cut_plan.as_ref()
    }

    /// Net headcount change of the cut plan (sum over segments).
    pub fn cut_plan_total(&self) -> Option<f64> {
        self.fte_cut_plan
            .as_ref()
            .filter(|plan| !plan.is_empty())
            .map(|plan| plan.values().sum())
    }
}

// ── Builder ────────────────────────────────────────────────────────────

/// Builder for [`ScenarioParams`]; `build()` runs the construction checks.
#[derive(Clone, Debug)]
pub struct ScenarioParamsBuilder {
    inner: ScenarioParams,
}

impl ScenarioParamsBuilder {
    pub fn driver(mut self, driver: Driver) -> Self {
        self.inner.driver = driver;
        self
    }

    pub fn lag_months(mut self, months: u32) -> Self {
        self.inner.lag_months = months;
        self
    }

    pub fn onset_duration_months(mut self, months: u32) -> Self {
        self.inner.onset_duration_months = months;
        self
    }

    pub fn event_duration_months(mut self, months: Option<u32>) -> Self {
        self.inner.event_duration_months = months;
        self
    }

    pub fn recovery_duration_months(mut self, months: Option<u32>) -> Self {
        self.inner.recovery_duration_months = months;
        self
    }

    pub fn shape(mut self, shape: RampShape) -> Self {
        self.inner.shape = shape;
        self
    }

    pub fn impact_mode(mut self, mode: ImpactMode) -> Self {
        self.inner.impact_mode = mode;
        self
    }

    pub fn impact_magnitude(mut self, magnitude: f64) -> Self {
        self.inner.impact_magnitude = magnitude;
        self
    }

    pub fn growth_delta_pp_per_year(mut self, delta: f64) -> Self {
        self.inner.growth_delta_pp_per_year = delta;
        self
    }

    pub fn drift_pp_per_year(mut self, drift: f64) -> Self {
        self.inner.drift_pp_per_year = drift;
        self
    }

    pub fn event_growth_delta_pp_per_year(mut self, delta: Option<f64>) -> Self {
        self.inner.event_growth_delta_pp_per_year = delta;
        self
    }

    pub fn fte_delta_pct(mut self, pct: Option<f64>) -> Self {
        self.inner.fte_delta_pct = pct;
        self
    }

    pub fn fte_delta_abs(mut self, abs: Option<f64>) -> Self {
        self.inner.fte_delta_abs = abs;
        self
    }

    pub fn beta_multiplier(mut self, multiplier: Option<f64>) -> Self {
        self.inner.beta_multiplier = multiplier;
        self
    }

    pub fn cost_target_pct(mut self, pct: Option<f64>) -> Self {
        self.inner.cost_target_pct = pct;
        self
    }

    pub fn fte_cut_plan(mut self, plan: Option<BTreeMap<String, f64>>) -> Self {
        self.inner.fte_cut_plan = plan;
        self
    }

    pub fn build(self) -> ParamsResult<ScenarioParams> {
        self.inner.check()?;
        Ok(self.inner)
    }
}

// ── Raw mapping ─────────────────────────────────────────────────────────

/// Loosely typed mirror of [`ScenarioParams`] as it arrives on the wire.
///
/// Durations are signed and enums are strings so that negative months and
/// unknown variants surface as [`ParamsError`]s naming the field.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawScenarioParams {
    pub driver: Option<String>,
    pub lag_months: Option<i64>,
    pub onset_duration_months: Option<i64>,
    pub event_duration_months: Option<i64>,
    pub recovery_duration_months: Option<i64>,
    pub shape: Option<String>,
    pub impact_mode: Option<String>,
    pub impact_magnitude: Option<f64>,
    pub growth_delta_pp_per_year: Option<f64>,
    pub drift_pp_per_year: Option<f64>,
    pub event_growth_delta_pp_per_year: Option<f64>,
    pub fte_delta_pct: Option<f64>,
    pub fte_delta_abs: Option<f64>,
    pub beta_multiplier: Option<f64>,
    pub cost_target_pct: Option<f64>,
    pub fte_cut_plan: Option<BTreeMap<String, f64>>,
}

fn months(field: &'static str, value: i64) -> ParamsResult<u32> {
    if value < 0 {
        return Err(ParamsError::NegativeDuration { field, value });
    }
    u32::try_from(value).map_err(|_| ParamsError::DurationOutOfRange { field, value })
}

fn optional_months(field: &'static str, value: Option<i64>) -> ParamsResult<Option<u32>> {
    value.map(|v| months(field, v)).transpose()
}

impl TryFrom<RawScenarioParams> for ScenarioParams {
    type Error = ParamsError;

    fn try_from(raw: RawScenarioParams) -> Result<Self, Self::Error> {
        let mut builder = ScenarioParams::builder()
            .lag_months(months("lag_months", raw.lag_months.unwrap_or(0))?)
            .onset_duration_months(months(
                "onset_duration_months",
                raw.onset_duration_months.unwrap_or(0),
            )?)
            .event_duration_months(optional_months(
                "event_duration_months",
                raw.event_duration_months,
            )?)
            .recovery_duration_months(optional_months(
                "recovery_duration_months",
                raw.recovery_duration_months,
            )?)
            .impact_magnitude(raw.impact_magnitude.unwrap_or(0.0))
            .growth_delta_pp_per_year(raw.growth_delta_pp_per_year.unwrap_or(0.0))
            .drift_pp_per_year(raw.drift_pp_per_year.unwrap_or(0.0))
            .event_growth_delta_pp_per_year(raw.event_growth_delta_pp_per_year)
            .fte_delta_pct(raw.fte_delta_pct)
            .fte_delta_abs(raw.fte_delta_abs)
            .beta_multiplier(raw.beta_multiplier)
            .cost_target_pct(raw.cost_target_pct)
            .fte_cut_plan(raw.fte_cut_plan);

        if let Some(driver) = raw.driver.as_deref() {
            builder = builder.driver(driver.parse()?);
        }
        if let Some(shape) = raw.shape.as_deref() {
            builder = builder.shape(shape.parse()?);
        }
        if let Some(mode) = raw.impact_mode.as_deref() {
            builder = builder.impact_mode(mode.parse()?);
        }

        builder.build()
    }
}
