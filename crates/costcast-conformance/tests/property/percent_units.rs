//! Property tests: whole percentages are recognised.

use costcast_conformance::fixtures::reference_frame;
use costcast_guard::{codes, BoundsValidator};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    /// Above the threshold a value is divided by 100 and flagged.
    #[test]
    fn whole_percent_is_divided(whole in 1.6f64..50.0, negative in any::<bool>()) {
        let whole = if negative { -whole } else { whole };
        let outcome = BoundsValidator::with_defaults().validate_value(
            &json!({ "driver": "cost_target", "cost_target_pct": whole }),
            &reference_frame().unwrap(),
        );
        let result = outcome.result();
        let pct = outcome.params().unwrap().cost_target_pct().unwrap();
        prop_assert_eq!(pct, whole / 100.0);
        prop_assert!(result.warnings.iter().any(|w| w.code == codes::PERCENT_UNITS
            && w.field.as_deref() == Some("cost_target_pct")));
    }

    /// At or below the threshold nothing is rescaled.
    #[test]
    fn fractions_are_left_alone(fraction in -1.5f64..=1.5) {
        let outcome = BoundsValidator::with_defaults().validate_value(
            &json!({ "driver": "fte", "drift_pp_per_year": fraction }),
            &reference_frame().unwrap(),
        );
        prop_assert!(outcome
            .result()
            .warnings
            .iter()
            .all(|w| w.code != codes::PERCENT_UNITS));
    }
}
