//! Bounds validator: keeps generated scenarios numerically sane.
//!
//! ## Checks (in order)
//!
//! ```text
//! structural   lag beyond the horizon                    → fatal
//! units        percent-like value above threshold        → ÷100, warning
//! tier 1       field outside its range                   → clamp
//! tier 2       projection multiplier outside band        → scale once, else fatal
//! tier 3       simulated minimum below fixed cost        → scale once, else fatal
//! ```
//!
//! Tiers 2 and 3 simulate the scenario against a synthetic flat baseline.
//! Tier 2 runs at most two simulations; every retry is bounded.

use costcast_overlay::{OverlayEngine, OverlayOptions};
use costcast_types::{
    MonthlySeries, ParamsError, ScenarioParams, ScenarioParamsBuilder, ValidationIssue,
    ValidationOutcome, ValidationResult,
};
use tracing::{debug, warn};

use crate::config::{GuardConfig, Range};
use crate::error::GuardResult;
use crate::frame::SimulationFrame;

/// Machine-readable issue codes.
pub mod codes {
    pub const INVALID_PARAMS: &str = "INVALID_PARAMS";
    pub const LAG_BEYOND_HORIZON: &str = "LAG_BEYOND_HORIZON";
    pub const PERCENT_UNITS: &str = "PERCENT_UNITS";
    pub const CLAMPED: &str = "CLAMPED";
    pub const MULTIPLIER_SCALED: &str = "MULTIPLIER_SCALED";
    pub const MULTIPLIER_OUT_OF_BAND: &str = "MULTIPLIER_OUT_OF_BAND";
    pub const FLOOR_SCALED: &str = "FLOOR_SCALED";
    pub const FLOOR_BREACH: &str = "FLOOR_BREACH";
    pub const SIMULATION_FAILED: &str = "SIMULATION_FAILED";
}

/// Slack for comparing a re-simulated value against its bound.
const TOLERANCE: f64 = 1e-9;

// ── Fields ─────────────────────────────────────────────────────────────

/// Float fields the validator reads and rewrites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    ImpactMagnitude,
    GrowthDelta,
    Drift,
    EventGrowth,
    CostTargetPct,
    FteDeltaPct,
    FteDeltaAbs,
}

/// Fields that may be written as whole percentages.
const PERCENT_FIELDS: [Field; 6] = [
    Field::ImpactMagnitude,
    Field::GrowthDelta,
    Field::Drift,
    Field::EventGrowth,
    Field::CostTargetPct,
    Field::FteDeltaPct,
];

/// Fields that carry the size of the intervention and get scaled back.
const MAGNITUDE_FIELDS: [Field; 6] = [
    Field::ImpactMagnitude,
    Field::GrowthDelta,
    Field::Drift,
    Field::EventGrowth,
    Field::FteDeltaPct,
    Field::FteDeltaAbs,
];

impl Field {
    fn name(self) -> &'static str {
        match self {
            Self::ImpactMagnitude => "impact_magnitude",
            Self::GrowthDelta => "growth_delta_pp_per_year",
            Self::Drift => "drift_pp_per_year",
            Self::EventGrowth => "event_growth_delta_pp_per_year",
            Self::CostTargetPct => "cost_target_pct",
            Self::FteDeltaPct => "fte_delta_pct",
            Self::FteDeltaAbs => "fte_delta_abs",
        }
    }

    fn get(self, params: &ScenarioParams) -> Option<f64> {
        match self {
            Self::ImpactMagnitude => Some(params.impact_magnitude()),
            Self::GrowthDelta => Some(params.growth_delta_pp_per_year()),
            Self::Drift => Some(params.drift_pp_per_year()),
            Self::EventGrowth => params.event_growth_delta_pp_per_year(),
            Self::CostTargetPct => params.cost_target_pct(),
            Self::FteDeltaPct => params.fte_delta_pct(),
            Self::FteDeltaAbs => params.fte_delta_abs(),
        }
    }

    fn set(self, builder: ScenarioParamsBuilder, value: f64) -> ScenarioParamsBuilder {
        match self {
            Self::ImpactMagnitude => builder.impact_magnitude(value),
            Self::GrowthDelta => builder.growth_delta_pp_per_year(value),
            Self::Drift => builder.drift_pp_per_year(value),
            Self::EventGrowth => builder.event_growth_delta_pp_per_year(Some(value)),
            Self::CostTargetPct => builder.cost_target_pct(Some(value)),
            Self::FteDeltaPct => builder.fte_delta_pct(Some(value)),
            Self::FteDeltaAbs => builder.fte_delta_abs(Some(value)),
        }
    }

    fn range(self, config: &GuardConfig, params: &ScenarioParams) -> Option<Range> {
        let b = &config.bounds;
        match self {
            Self::ImpactMagnitude => Some(b.impact(params.impact_mode())),
            Self::GrowthDelta => Some(b.growth_delta_pp_per_year),
            Self::Drift => Some(b.drift_pp_per_year),
            Self::EventGrowth => Some(b.event_growth_delta_pp_per_year),
            Self::CostTargetPct => Some(b.cost_target_pct),
            Self::FteDeltaPct => Some(b.fte_delta_pct),
            Self::FteDeltaAbs => None,
        }
    }
}

// ── Simulation ─────────────────────────────────────────────────────────

/// What one synthetic run tells the validator.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Probe {
    multiplier: f64,
    min: f64,
}

/// Why a parameter set was turned away mid-check.
struct Rejection(ValidationIssue);

// ── Validator ──────────────────────────────────────────────────────────

/// Validates and repairs [`ScenarioParams`] before they reach the overlay.
#[derive(Clone, Debug, Default)]
pub struct BoundsValidator {
    config: GuardConfig,
}

impl BoundsValidator {
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Like [`new`](Self::new), refusing configurations that fail
    /// [`GuardConfig::check`].
    pub fn try_new(config: GuardConfig) -> GuardResult<Self> {
        config.check()?;
        Ok(Self::new(config))
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Validate a plain JSON mapping. Construction failures (unknown keys,
    /// negative months, unknown driver) become fatal entries.
    pub fn validate_value(
        &self,
        value: &serde_json::Value,
        frame: &SimulationFrame,
    ) -> ValidationOutcome {
        match ScenarioParams::from_value(value) {
            Ok(params) => self.validate(&params, frame),
            Err(err) => {
                warn!(error = %err, "scenario parameters failed construction");
                let mut result = ValidationResult::new();
                result.error(construction_issue(&err));
                ValidationOutcome::Rejected { result }
            }
        }
    }

    /// Validate a typed parameter set.
    pub fn validate(&self, params: &ScenarioParams, frame: &SimulationFrame) -> ValidationOutcome {
        let mut result = ValidationResult::new();
        match self.run(params, frame, &mut result) {
            Ok(validated) => {
                debug!(
                    warnings = result.warnings.len(),
                    clamps = result.clamps.len(),
                    "scenario parameters validated"
                );
                ValidationOutcome::from_parts(validated, result)
            }
            Err(Rejection(issue)) => {
                warn!(code = %issue.code, reason = %issue.message, "scenario parameters rejected");
                result.error(issue);
                ValidationOutcome::Rejected { result }
            }
        }
    }

    fn run(
        &self,
        params: &ScenarioParams,
        frame: &SimulationFrame,
        result: &mut ValidationResult,
    ) -> Result<ScenarioParams, Rejection> {
        let horizon = self.config.horizon_months;
        if params.lag_months() as usize >= horizon {
            return Err(Rejection(ValidationIssue::for_field(
                codes::LAG_BEYOND_HORIZON,
                "lag_months",
                format!(
                    "lag of {} months starts at or after the {horizon}-month horizon",
                    params.lag_months()
                ),
            )));
        }

        let params = self.normalise_percent_units(params, result)?;
        let params = self.clamp_fields(&params, result)?;
        let params = self.check_multiplier(params, frame, result)?;
        self.check_floor(params, frame, result)
    }

    fn normalise_percent_units(
        &self,
        params: &ScenarioParams,
        result: &mut ValidationResult,
    ) -> Result<ScenarioParams, Rejection> {
        let threshold = self.config.percent_threshold;
        let mut builder = params.to_builder();
        let mut changed = false;

        for field in PERCENT_FIELDS {
            let Some(value) = field.get(params) else {
                continue;
            };
            if value.abs() > threshold {
                let adjusted = value / 100.0;
                debug!(field = field.name(), value, adjusted, "reading value as whole percent");
                result.warn(ValidationIssue::for_field(
                    codes::PERCENT_UNITS,
                    field.name(),
                    format!("{value} looks like a whole percentage; using {adjusted}"),
                ));
                builder = field.set(builder, adjusted);
                changed = true;
            }
        }

        if changed {
            rebuild(builder)
        } else {
            Ok(params.clone())
        }
    }

    fn clamp_fields(
        &self,
        params: &ScenarioParams,
        result: &mut ValidationResult,
    ) -> Result<ScenarioParams, Rejection> {
        let bounds = &self.config.bounds;
        let mut builder = params.to_builder();
        let mut changed = false;

        for field in PERCENT_FIELDS {
            let (Some(value), Some(range)) = (field.get(params), field.range(&self.config, params))
            else {
                continue;
            };
            let clamped = range.clamp(value);
            if clamped != value {
                record_clamp(result, field.name(), value, clamped);
                builder = field.set(builder, clamped);
                changed = true;
            }
        }

        if let Some(multiplier) = params.beta_multiplier() {
            let clamped = bounds.beta_multiplier.clamp(multiplier);
            if clamped != multiplier {
                record_clamp(result, "beta_multiplier", multiplier, clamped);
                builder = builder.beta_multiplier(Some(clamped));
                changed = true;
            }
        }

        let lag = bounds.lag_months.clamp(params.lag_months());
        if lag != params.lag_months() {
            record_clamp(result, "lag_months", params.lag_months(), lag);
            builder = builder.lag_months(lag);
            changed = true;
        }

        let onset = bounds
            .onset_duration_months
            .clamp(params.onset_duration_months());
        if onset != params.onset_duration_months() {
            record_clamp(result, "onset_duration_months", params.onset_duration_months(), onset);
            builder = builder.onset_duration_months(onset);
            changed = true;
        }

        if changed {
            rebuild(builder)
        } else {
            Ok(params.clone())
        }
    }

    fn check_multiplier(
        &self,
        params: ScenarioParams,
        frame: &SimulationFrame,
        result: &mut ValidationResult,
    ) -> Result<ScenarioParams, Rejection> {
        let band = self.config.bands.for_severity(frame.severity());
        let widened = Range::new(band.min - TOLERANCE, band.max + TOLERANCE);
        let probe = self.simulate(&params, frame)?;
        if widened.contains(probe.multiplier) {
            return Ok(params);
        }

        let bound = if probe.multiplier > band.max {
            band.max
        } else {
            band.min
        };
        let factor = (bound - 1.0) / (probe.multiplier - 1.0);
        warn!(
            multiplier = probe.multiplier,
            bound,
            factor,
            severity = %frame.severity(),
            "projection multiplier out of band; scaling magnitudes"
        );
        result.warn(ValidationIssue::new(
            codes::MULTIPLIER_SCALED,
            format!(
                "projection multiplier {:.3} outside [{}, {}] for {} severity; magnitudes scaled by {:.4}",
                probe.multiplier,
                band.min,
                band.max,
                frame.severity(),
                factor
            ),
        ));
        let scaled = scale_magnitudes(&params, factor, result)?;

        let retry = self.simulate(&scaled, frame)?;
        if !widened.contains(retry.multiplier) {
            return Err(Rejection(ValidationIssue::new(
                codes::MULTIPLIER_OUT_OF_BAND,
                format!(
                    "projection multiplier {:.3} still outside [{}, {}] after scaling",
                    retry.multiplier, band.min, band.max
                ),
            )));
        }
        Ok(scaled)
    }

    fn check_floor(
        &self,
        params: ScenarioParams,
        frame: &SimulationFrame,
        result: &mut ValidationResult,
    ) -> Result<ScenarioParams, Rejection> {
        let alpha = frame.context().alpha();
        let level = frame.baseline_level();
        let slack = TOLERANCE * alpha.max(1.0);
        let probe = self.simulate(&params, frame)?;
        if probe.min >= alpha - slack {
            return Ok(params);
        }
        let Some(factor) = floor_scale(level, alpha, probe.min) else {
            return Ok(params);
        };

        warn!(min = probe.min, alpha, factor, "simulated cost below fixed cost; scaling magnitudes");
        result.warn(ValidationIssue::new(
            codes::FLOOR_SCALED,
            format!(
                "simulated minimum {:.2} is below fixed cost {:.2}; magnitudes scaled by {:.4}",
                probe.min, alpha, factor
            ),
        ));
        let scaled = scale_magnitudes(&params, factor, result)?;

        let retry = self.simulate(&scaled, frame)?;
        if retry.min < alpha - slack {
            return Err(Rejection(ValidationIssue::new(
                codes::FLOOR_BREACH,
                format!(
                    "simulated minimum {:.2} still below fixed cost {:.2} after scaling",
                    retry.min, alpha
                ),
            )));
        }
        Ok(scaled)
    }

    /// Run the scenario over a flat synthetic baseline.
    fn simulate(&self, params: &ScenarioParams, frame: &SimulationFrame) -> Result<Probe, Rejection> {
        let level = frame.baseline_level();
        let simulation_failed = |message: String| {
            Rejection(ValidationIssue::new(codes::SIMULATION_FAILED, message))
        };

        let baseline = MonthlySeries::flat(frame.start(), self.config.horizon_months, level)
            .map_err(|e| simulation_failed(e.to_string()))?;
        let options = OverlayOptions::default().with_beta_inflation(self.config.beta_inflation_per_year);
        let series = OverlayEngine::new(options)
            .apply(&baseline, params, frame.context())
            .map_err(|e| simulation_failed(e.to_string()))?;

        let last = series
            .last()
            .map(|p| p.value)
            .ok_or_else(|| simulation_failed("simulation produced no months".into()))?;
        let min = series
            .min_value()
            .ok_or_else(|| simulation_failed("simulation produced no months".into()))?;

        let probe = Probe {
            multiplier: last / level,
            min,
        };
        debug!(multiplier = probe.multiplier, min = probe.min, "synthetic simulation");
        Ok(probe)
    }
}

// ── Helpers ────────────────────────────────────────────────────────────

/// Scale factor that lifts `min` back to `alpha`, if it fell below.
fn floor_scale(level: f64, alpha: f64, min: f64) -> Option<f64> {
    if min >= alpha || level <= min {
        return None;
    }
    Some(((level - alpha) / (level - min)).clamp(0.0, 1.0))
}

fn scale_magnitudes(
    params: &ScenarioParams,
    factor: f64,
    result: &mut ValidationResult,
) -> Result<ScenarioParams, Rejection> {
    let mut builder = params.to_builder();
    for field in MAGNITUDE_FIELDS {
        if let Some(value) = field.get(params) {
            if value != 0.0 {
                let scaled = value * factor;
                record_clamp(result, field.name(), value, scaled);
                builder = field.set(builder, scaled);
            }
        }
    }
    rebuild(builder)
}

fn record_clamp<T: std::fmt::Display + Copy>(
    result: &mut ValidationResult,
    field: &str,
    from: T,
    to: T,
) {
    debug!(field, %from, %to, "clamped");
    result.clamp(ValidationIssue::for_field(
        codes::CLAMPED,
        field,
        format!("{from} adjusted to {to}"),
    ));
}

fn rebuild(builder: ScenarioParamsBuilder) -> Result<ScenarioParams, Rejection> {
    builder
        .build()
        .map_err(|err| Rejection(construction_issue(&err)))
}

fn construction_issue(err: &ParamsError) -> ValidationIssue {
    let field = match err {
        ParamsError::NegativeDuration { field, .. }
        | ParamsError::DurationOutOfRange { field, .. }
        | ParamsError::NonFinite { field, .. }
        | ParamsError::UnknownVariant { field, .. } => Some(*field),
        ParamsError::NonPositiveBetaMultiplier(_) => Some("beta_multiplier"),
        ParamsError::ConflictingFteDelta => Some("fte_delta_abs"),
        ParamsError::InvalidCutPlan { .. } => Some("fte_cut_plan"),
        ParamsError::Malformed(_) => None,
    };
    match field {
        Some(field) => ValidationIssue::for_field(codes::INVALID_PARAMS, field, err.to_string()),
        None => ValidationIssue::new(codes::INVALID_PARAMS, err.to_string()),
    }
}
