//! Property tests: the default parameter set is a no-op.

use costcast_overlay::OverlayEngine;
use costcast_types::ScenarioParams;
use proptest::prelude::*;

use crate::strategies::{arb_baseline, arb_context};

proptest! {
    /// Any baseline, any context: default params give the baseline back bit for bit.
    #[test]
    fn default_params_reproduce_baseline(
        (baseline, context) in arb_baseline().prop_flat_map(|b| {
            let level = b.values().into_iter().fold(f64::INFINITY, f64::min);
            (Just(b), arb_context(level))
        }),
    ) {
        let out = OverlayEngine::with_defaults()
            .apply(&baseline, &ScenarioParams::default(), &context)
            .unwrap();
        prop_assert_eq!(out.len(), baseline.len());
        for (a, b) in out.values().iter().zip(baseline.values()) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    /// The identity holds whatever the inflation assumption.
    #[test]
    fn identity_ignores_inflation(inflation in -0.05f64..0.2, baseline in arb_baseline()) {
        let level = baseline.values().into_iter().fold(f64::INFINITY, f64::min);
        let context = costcast_types::DriverContext::new(0.2 * level, 5_000.0).unwrap();
        let engine = OverlayEngine::new(
            costcast_overlay::OverlayOptions::default().with_beta_inflation(inflation),
        );
        let out = engine.apply(&baseline, &ScenarioParams::default(), &context).unwrap();
        prop_assert_eq!(out.values(), baseline.values());
    }
}
