//! Property definitions and their deterministic checks.
//!
//! Each property is exercised over a fixed sweep of inputs built from the
//! reference fixtures. The randomized counterparts live in the crate's
//! proptest suite.

use chrono::NaiveDate;
use costcast_drivers::profile;
use costcast_guard::{codes, BoundsValidator};
use costcast_intent::{CompileContext, IntentCompiler};
use costcast_overlay::OverlayEngine;
use costcast_types::{
    constraints, Driver, IntentType, MonthlySeries, RampShape, ScenarioIntent,
    ScenarioParams, Timing, ValidationOutcome,
};
use serde_json::json;

use crate::fixtures::{
    flat_baseline, reference_context, reference_frame, reference_start, seasonal_baseline,
    REFERENCE_ALPHA, REFERENCE_HORIZON, REFERENCE_LEVEL,
};
use crate::types::{PropertyCategory, PropertyResult};

type Check = Result<(), String>;

/// A named property with its check.
pub struct Property {
    pub id: &'static str,
    pub category: PropertyCategory,
    pub name: &'static str,
    check: fn() -> Check,
}

impl Property {
    pub fn run(&self) -> PropertyResult {
        match (self.check)() {
            Ok(()) => PropertyResult::pass(self.id, self.category, self.name),
            Err(details) => PropertyResult::fail(self.id, self.category, self.name, &details),
        }
    }
}

// ── Inventory ──────────────────────────────────────────────────────────

/// Every property in canonical order.
pub const PROPERTIES: &[Property] = &[
    Property {
        id: "ramp-monotonic",
        category: PropertyCategory::Ramp,
        name: "Ramps never decrease and linear reaches 1 at the last onset month",
        check: check_ramp_monotonic,
    },
    Property {
        id: "identity",
        category: PropertyCategory::Overlay,
        name: "Default parameters reproduce the baseline exactly",
        check: check_identity,
    },
    Property {
        id: "cost-floor",
        category: PropertyCategory::Overlay,
        name: "Validated scenarios never cost less than the fixed component",
        check: check_cost_floor,
    },
    Property {
        id: "rate-reset",
        category: PropertyCategory::Overlay,
        name: "A 5% rate reset after six months lifts a flat 10M to 10.4M",
        check: check_rate_reset,
    },
    Property {
        id: "cost-target-cut",
        category: PropertyCategory::Overlay,
        name: "A -10% cost target from month 0 lands on 9M",
        check: check_cost_target_cut,
    },
    Property {
        id: "clamp-convergence",
        category: PropertyCategory::Guard,
        name: "Validated output revalidates as accepted and unchanged",
        check: check_clamp_convergence,
    },
    Property {
        id: "percent-units",
        category: PropertyCategory::Guard,
        name: "Whole percentages are read as fractions with a warning",
        check: check_percent_units,
    },
    Property {
        id: "keep-cost-flat",
        category: PropertyCategory::Intent,
        name: "keep_cost_flat compiles to a zero cost target",
        check: check_keep_cost_flat,
    },
    Property {
        id: "early-start",
        category: PropertyCategory::Intent,
        name: "A start before the baseline moves to lag 0 and asks",
        check: check_early_start,
    },
];

/// Look a property up by ID.
pub fn property(id: &str) -> Option<&'static Property> {
    PROPERTIES.iter().find(|p| p.id == id)
}

/// IDs belonging to a category.
pub fn ids_for_category(category: PropertyCategory) -> Vec<&'static str> {
    PROPERTIES
        .iter()
        .filter(|p| p.category == category)
        .map(|p| p.id)
        .collect()
}

// ── Helpers ────────────────────────────────────────────────────────────

fn err<E: std::fmt::Display>(e: E) -> String {
    e.to_string()
}

fn ensure(condition: bool, details: impl FnOnce() -> String) -> Check {
    if condition {
        Ok(())
    } else {
        Err(details())
    }
}

fn apply(baseline: &MonthlySeries, params: &ScenarioParams) -> Result<Vec<f64>, String> {
    let context = reference_context().map_err(err)?;
    OverlayEngine::with_defaults()
        .apply(baseline, params, &context)
        .map(|s| s.values())
        .map_err(err)
}

fn month(year: i32, month: u32) -> Result<NaiveDate, String> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| format!("bad month {year}-{month}"))
}

/// Aggressive but well-formed interventions.
fn stress_sweep() -> Vec<serde_json::Value> {
    vec![
        json!({ "driver": "fte", "fte_delta_pct": -0.9 }),
        json!({ "driver": "fte", "fte_delta_abs": -5000.0, "lag_months": 4 }),
        json!({ "driver": "fte", "impact_mode": "level", "impact_magnitude": -0.5 }),
        json!({ "driver": "fte", "growth_delta_pp_per_year": -0.5 }),
        json!({ "driver": "fte", "drift_pp_per_year": -0.3, "growth_delta_pp_per_year": -0.5 }),
        json!({ "driver": "cost", "impact_magnitude": -0.5, "onset_duration_months": 6, "shape": "exp" }),
        json!({ "driver": "cost", "impact_mode": "growth", "impact_magnitude": -0.5 }),
        json!({ "driver": "cost_target", "cost_target_pct": -0.5, "onset_duration_months": 12, "shape": "linear" }),
        json!({ "driver": "cost_target", "cost_target_pct": -80 }),
        json!({
            "driver": "fte",
            "lag_months": 6,
            "event_duration_months": 12,
            "recovery_duration_months": 6,
            "event_growth_delta_pp_per_year": -0.5,
            "fte_delta_pct": -0.4
        }),
        json!({ "driver": "cost", "beta_multiplier": 0.1, "fte_delta_pct": -0.9 }),
        json!({ "driver": "fte", "fte_cut_plan": { "sales": -300.0, "ops": -600.0 } }),
    ]
}

// ── Checks ─────────────────────────────────────────────────────────────

fn check_ramp_monotonic() -> Check {
    for duration in 1..=36u64 {
        for shape in [RampShape::Step, RampShape::Linear, RampShape::Exp] {
            let path = profile(shape, duration, duration + 6);
            if let Some(k) = path.windows(2).position(|w| w[1] < w[0]) {
                return Err(format!("{shape} over {duration} months drops at month {}", k + 1));
            }
            ensure(path.iter().all(|f| (0.0..=1.0).contains(f)), || {
                format!("{shape} over {duration} months leaves [0, 1]")
            })?;
        }
        let linear = profile(RampShape::Linear, duration, duration);
        let last = linear.last().copied().unwrap_or_default();
        ensure(last == 1.0, || {
            format!("linear over {duration} months ends at {last}")
        })?;
        if duration > 1 {
            let before = linear[linear.len() - 2];
            ensure(before < 1.0, || {
                format!("linear over {duration} months saturates early at {before}")
            })?;
        }
    }
    Ok(())
}

fn check_identity() -> Check {
    let baselines = [
        flat_baseline(REFERENCE_HORIZON).map_err(err)?,
        seasonal_baseline(REFERENCE_HORIZON).map_err(err)?,
        seasonal_baseline(1).map_err(err)?,
    ];
    for baseline in &baselines {
        let out = apply(baseline, &ScenarioParams::default())?;
        let expected = baseline.values();
        if let Some(i) = out.iter().zip(&expected).position(|(a, b)| a.to_bits() != b.to_bits()) {
            return Err(format!(
                "month {i} moved from {} to {} over a {}-month baseline",
                expected[i],
                out[i],
                expected.len()
            ));
        }
    }
    Ok(())
}

fn check_cost_floor() -> Check {
    let frame = reference_frame().map_err(err)?;
    let validator = BoundsValidator::with_defaults();
    let baseline = flat_baseline(REFERENCE_HORIZON).map_err(err)?;

    for raw in stress_sweep() {
        let Some(params) = validator.validate_value(&raw, &frame).into_params() else {
            continue;
        };
        let out = apply(&baseline, &params)?;
        if let Some((i, v)) = out
            .iter()
            .enumerate()
            .find(|(_, v)| **v < REFERENCE_ALPHA - 1e-6)
        {
            return Err(format!("{raw} costs {v} at month {i}, below {REFERENCE_ALPHA}"));
        }
    }
    Ok(())
}

fn check_rate_reset() -> Check {
    let params = ScenarioParams::builder()
        .beta_multiplier(Some(1.05))
        .lag_months(6)
        .onset_duration_months(0)
        .build()
        .map_err(err)?;
    let out = apply(&flat_baseline(REFERENCE_HORIZON).map_err(err)?, &params)?;
    for (i, v) in out.iter().enumerate() {
        let expected = if i < 6 { REFERENCE_LEVEL } else { 10_400_000.0 };
        ensure((v - expected).abs() < 1e-3, || {
            format!("month {i} is {v}, expected {expected}")
        })?;
    }
    Ok(())
}

fn check_cost_target_cut() -> Check {
    let params = ScenarioParams::builder()
        .driver(Driver::CostTarget)
        .cost_target_pct(Some(-0.10))
        .lag_months(0)
        .build()
        .map_err(err)?;
    let out = apply(&flat_baseline(REFERENCE_HORIZON).map_err(err)?, &params)?;
    let first = out.first().copied().unwrap_or_default();
    ensure((first - 9_000_000.0).abs() < 1.0, || {
        format!("month 0 is {first}, expected 9000000")
    })
}

fn check_clamp_convergence() -> Check {
    let frame = reference_frame().map_err(err)?;
    let validator = BoundsValidator::with_defaults();

    let mut sweep = stress_sweep();
    sweep.extend([
        json!({ "impact_magnitude": 40, "lag_months": 70 }),
        json!({ "beta_multiplier": 2.0, "onset_duration_months": 48 }),
        json!({ "driver": "fte", "impact_mode": "growth", "impact_magnitude": 0.9 }),
        json!({ "driver": "fte", "growth_delta_pp_per_year": 0.5, "drift_pp_per_year": 0.3 }),
        json!({ "impact_mode": "growth", "impact_magnitude": 0.12, "drift_pp_per_year": 0.05 }),
    ]);

    for raw in sweep {
        let Some(params) = validator.validate_value(&raw, &frame).into_params() else {
            continue;
        };
        let again = validator.validate(&params, &frame);
        ensure(again == ValidationOutcome::Accepted(params.clone()), || {
            format!("{raw} did not settle: second pass gave {again:?}")
        })?;
    }
    Ok(())
}

fn check_percent_units() -> Check {
    let frame = reference_frame().map_err(err)?;
    let validator = BoundsValidator::with_defaults();

    for whole in [2.0, 5.0, 10.0, 25.0, -10.0, -40.0] {
        let outcome = validator.validate_value(
            &json!({ "driver": "cost_target", "cost_target_pct": whole }),
            &frame,
        );
        let result = outcome.result();
        let pct = outcome
            .params()
            .and_then(ScenarioParams::cost_target_pct)
            .ok_or_else(|| format!("{whole}% was rejected"))?;
        ensure((pct - whole / 100.0).abs() < 1e-12, || {
            format!("{whole} read as {pct}")
        })?;
        ensure(
            result.warnings.iter().any(|w| w.code == codes::PERCENT_UNITS),
            || format!("{whole} produced no {} warning", codes::PERCENT_UNITS),
        )?;
    }

    // At or under the threshold the value is taken as a fraction.
    for fraction in [0.05, -0.3, 1.5] {
        let outcome = validator.validate_value(
            &json!({ "driver": "fte", "impact_mode": "level", "impact_magnitude": fraction }),
            &frame,
        );
        ensure(
            outcome
                .result()
                .warnings
                .iter()
                .all(|w| w.code != codes::PERCENT_UNITS),
            || format!("{fraction} was treated as a whole percentage"),
        )?;
    }
    Ok(())
}

fn check_keep_cost_flat() -> Check {
    let intent = ScenarioIntent::new(IntentType::Constraint)
        .with_constraint(constraints::KEEP_COST_FLAT);
    let ctx = CompileContext::new(reference_start(), REFERENCE_HORIZON);
    let result = IntentCompiler::with_defaults().compile(&intent, &ctx);
    ensure(result.params.driver() == Driver::CostTarget, || {
        format!("driver is {}", result.params.driver())
    })?;
    ensure(result.params.cost_target_pct() == Some(0.0), || {
        format!("cost_target_pct is {:?}", result.params.cost_target_pct())
    })
}

fn check_early_start() -> Check {
    let intent = ScenarioIntent::new(IntentType::Shock).with_timing(Timing {
        start: Some(month(2024, 12)?),
        ..Timing::default()
    });
    let ctx = CompileContext::new(reference_start(), REFERENCE_HORIZON);
    let result = IntentCompiler::with_defaults().compile(&intent, &ctx);
    ensure(result.params.lag_months() == 0, || {
        format!("lag is {}", result.params.lag_months())
    })?;
    ensure(result.needs_clarification, || "no clarification raised".into())
}
