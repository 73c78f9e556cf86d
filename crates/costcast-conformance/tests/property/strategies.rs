//! Shared generators.

use costcast_types::{DriverContext, MonthlySeries};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

use costcast_conformance::fixtures::reference_start;

/// A positive baseline of 1..=60 months.
pub fn arb_baseline() -> impl Strategy<Value = MonthlySeries> {
    prop::collection::vec(1e5f64..1e8, 1..=60)
        .prop_map(|values| MonthlySeries::from_values(reference_start(), &values).unwrap())
}

/// A context whose fixed cost sits below `level`.
pub fn arb_context(level: f64) -> impl Strategy<Value = DriverContext> {
    (0.0f64..0.9, 1.0f64..50_000.0)
        .prop_map(move |(share, beta)| DriverContext::new(share * level, beta).unwrap())
}

fn arb_driver() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("cost"), Just("fte"), Just("cost_target")]
}

fn arb_shape() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("step"), Just("linear"), Just("exp")]
}

fn arb_mode() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("level"), Just("growth")]
}

/// Parameter mappings that are well-formed but often out of bounds.
pub fn arb_raw_params() -> impl Strategy<Value = Value> {
    (
        (arb_driver(), arb_shape(), arb_mode(), 0u32..130, 0u32..36),
        (-1.0f64..2.0, -0.8f64..0.8, -0.5f64..0.5),
        (
            prop::option::of(-0.95f64..1.5),
            prop::option::of(0.5f64..1.6),
            prop::option::of(-0.7f64..0.7),
            prop::option::of((1u32..24, 0u32..12, -0.6f64..0.6)),
        ),
    )
        .prop_map(
            |(
                (driver, shape, mode, lag, onset),
                (impact, growth, drift),
                (fte_pct, beta_multiplier, cost_target, event),
            )| {
                let mut map = Map::new();
                map.insert("driver".into(), json!(driver));
                map.insert("shape".into(), json!(shape));
                map.insert("impact_mode".into(), json!(mode));
                map.insert("lag_months".into(), json!(lag));
                map.insert("onset_duration_months".into(), json!(onset));
                map.insert("impact_magnitude".into(), json!(impact));
                map.insert("growth_delta_pp_per_year".into(), json!(growth));
                map.insert("drift_pp_per_year".into(), json!(drift));
                if let Some(pct) = fte_pct {
                    map.insert("fte_delta_pct".into(), json!(pct));
                }
                if let Some(m) = beta_multiplier {
                    map.insert("beta_multiplier".into(), json!(m));
                }
                if let Some(pct) = cost_target {
                    map.insert("cost_target_pct".into(), json!(pct));
                }
                if let Some((duration, recovery, event_growth)) = event {
                    map.insert("event_duration_months".into(), json!(duration));
                    map.insert("recovery_duration_months".into(), json!(recovery));
                    map.insert("event_growth_delta_pp_per_year".into(), json!(event_growth));
                }
                Value::Object(map)
            },
        )
}
