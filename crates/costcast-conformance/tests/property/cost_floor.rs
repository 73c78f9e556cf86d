//! Property tests: validated scenarios never dip below the fixed cost.

use costcast_conformance::fixtures::{
    flat_baseline, reference_context, reference_frame, REFERENCE_ALPHA, REFERENCE_HORIZON,
};
use costcast_guard::BoundsValidator;
use costcast_overlay::OverlayEngine;
use costcast_types::{Driver, ScenarioParams};
use proptest::prelude::*;

use crate::strategies::arb_raw_params;

proptest! {
    /// Whatever the validator lets through stays at or above alpha every month.
    #[test]
    fn validated_output_respects_floor(raw in arb_raw_params()) {
        let frame = reference_frame().unwrap();
        let outcome = BoundsValidator::with_defaults().validate_value(&raw, &frame);
        if let Some(params) = outcome.params() {
            let series = OverlayEngine::with_defaults()
                .apply(
                    &flat_baseline(REFERENCE_HORIZON).unwrap(),
                    params,
                    &reference_context().unwrap(),
                )
                .unwrap();
            let min = series.min_value().unwrap();
            prop_assert!(min >= REFERENCE_ALPHA - 1e-6, "min {} for {}", min, raw);
        }
    }

    /// Even unvalidated cuts bottom out at alpha: headcount never goes negative.
    #[test]
    fn oversized_cuts_stop_at_alpha(cut in 800.0f64..100_000.0, lag in 0u32..60) {
        let params = ScenarioParams::builder()
            .driver(Driver::Fte)
            .fte_delta_abs(Some(-cut))
            .lag_months(lag)
            .build()
            .unwrap();
        let series = OverlayEngine::with_defaults()
            .apply(
                &flat_baseline(REFERENCE_HORIZON).unwrap(),
                &params,
                &reference_context().unwrap(),
            )
            .unwrap();
        for v in series.values() {
            prop_assert!(v >= REFERENCE_ALPHA - 1e-6);
        }
    }
}
