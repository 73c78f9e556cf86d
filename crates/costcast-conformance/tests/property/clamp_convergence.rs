//! Property tests: validation settles in one pass.

use costcast_conformance::fixtures::reference_frame;
use costcast_guard::BoundsValidator;
use costcast_types::{Severity, ValidationOutcome};
use proptest::prelude::*;

use crate::strategies::arb_raw_params;

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Operational),
        Just(Severity::Stress),
        Just(Severity::Crisis),
    ]
}

proptest! {
    /// Feeding the validator its own output yields an unchanged acceptance.
    #[test]
    fn revalidation_is_a_fixed_point(raw in arb_raw_params(), severity in arb_severity()) {
        let frame = reference_frame().unwrap().with_severity(severity);
        let validator = BoundsValidator::with_defaults();
        if let Some(params) = validator.validate_value(&raw, &frame).into_params() {
            let again = validator.validate(&params, &frame);
            prop_assert_eq!(again, ValidationOutcome::Accepted(params));
        }
    }

    /// Rejection always carries at least one error; acceptance never does.
    #[test]
    fn outcome_and_errors_agree(raw in arb_raw_params()) {
        let frame = reference_frame().unwrap();
        let outcome = BoundsValidator::with_defaults().validate_value(&raw, &frame);
        let result = outcome.result();
        prop_assert_eq!(outcome.is_ok(), result.errors.is_empty());
    }
}
