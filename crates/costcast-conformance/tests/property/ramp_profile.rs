//! Property tests: ramp profiles are monotone and bounded.

use costcast_drivers::{factor, profile};
use costcast_types::RampShape;
use proptest::prelude::*;

fn arb_shape() -> impl Strategy<Value = RampShape> {
    prop_oneof![
        Just(RampShape::Step),
        Just(RampShape::Linear),
        Just(RampShape::Exp),
    ]
}

proptest! {
    /// Factors never decrease and stay inside [0, 1].
    #[test]
    fn profiles_are_monotone(shape in arb_shape(), duration in 0u64..120, extra in 0u64..24) {
        let path = profile(shape, duration, duration + extra + 1);
        for w in path.windows(2) {
            prop_assert!(w[1] >= w[0]);
        }
        for f in &path {
            prop_assert!((0.0..=1.0).contains(f));
        }
    }

    /// Linear reaches exactly 1 at duration - 1 and not before.
    #[test]
    fn linear_completes_on_last_onset_month(duration in 1u64..120) {
        prop_assert_eq!(factor(RampShape::Linear, duration - 1, duration), 1.0);
        if duration > 1 {
            prop_assert!(factor(RampShape::Linear, duration - 2, duration) < 1.0);
        }
    }

    /// A zero-length window is a step.
    #[test]
    fn zero_duration_is_immediate(shape in arb_shape(), k in 0u64..240) {
        prop_assert_eq!(factor(shape, k, 0), 1.0);
    }
}
