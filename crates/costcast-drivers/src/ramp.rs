//! Ramp profiles: how much of an effect is active `k` months into its
//! onset window.
//!
//! | Shape    | Factor at month `k` of `d`            |
//! |----------|---------------------------------------|
//! | `step`   | 1.0                                   |
//! | `linear` | `min(1, (k+1)/d)`                     |
//! | `exp`    | `min(1, 1 − e^(−4·(k+1)/d))`          |
//!
//! A zero-length window is always 1.0.

use costcast_types::RampShape;

use crate::error::{DriverError, DriverResult};

/// Steepness of the `exp` profile; reaches ≈98% of the effect at the end of
/// the window.
pub const EXP_STEEPNESS: f64 = 4.0;

/// Fraction of the full effect active at `month_index` of a
/// `duration_months` window.
pub fn profile_factor(shape: RampShape, month_index: i64, duration_months: i64) -> DriverResult<f64> {
    if month_index < 0 {
        return Err(DriverError::NegativeMonthIndex(month_index));
    }
    if duration_months < 0 {
        return Err(DriverError::NegativeDuration(duration_months));
    }
    Ok(factor(shape, month_index as u64, duration_months as u64))
}

/// Infallible form for callers that already hold unsigned offsets.
pub fn factor(shape: RampShape, month_index: u64, duration_months: u64) -> f64 {
    if duration_months == 0 {
        return 1.0;
    }
    let progress = (month_index + 1) as f64 / duration_months as f64;
    match shape {
        RampShape::Step => 1.0,
        RampShape::Linear => progress.min(1.0),
        RampShape::Exp => (1.0 - (-EXP_STEEPNESS * progress).exp()).min(1.0),
    }
}

/// The first `months` factors of a window, for display.
pub fn profile(shape: RampShape, duration_months: u64, months: u64) -> Vec<f64> {
    (0..months)
        .map(|k| factor(shape, k, duration_months))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_duration_and_step_are_instant() {
        assert_eq!(profile_factor(RampShape::Linear, 0, 0).unwrap(), 1.0);
        assert_eq!(profile_factor(RampShape::Exp, 3, 0).unwrap(), 1.0);
        assert_eq!(profile_factor(RampShape::Step, 0, 12).unwrap(), 1.0);
    }

    #[test]
    fn linear_reaches_one_at_last_month() {
        assert!((profile_factor(RampShape::Linear, 0, 4).unwrap() - 0.25).abs() < 1e-12);
        assert!((profile_factor(RampShape::Linear, 1, 4).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(profile_factor(RampShape::Linear, 3, 4).unwrap(), 1.0);
        assert_eq!(profile_factor(RampShape::Linear, 10, 4).unwrap(), 1.0);
    }

    #[test]
    fn exp_is_front_loaded() {
        let exp = profile_factor(RampShape::Exp, 0, 4).unwrap();
        let lin = profile_factor(RampShape::Linear, 0, 4).unwrap();
        assert!(exp > lin);
        let end = profile_factor(RampShape::Exp, 3, 4).unwrap();
        assert!(end > 0.98 && end < 1.0);
    }

    #[test]
    fn negative_inputs_fail() {
        assert!(matches!(
            profile_factor(RampShape::Linear, -1, 4),
            Err(DriverError::NegativeMonthIndex(-1))
        ));
        assert!(matches!(
            profile_factor(RampShape::Linear, 0, -4),
            Err(DriverError::NegativeDuration(-4))
        ));
    }

    #[test]
    fn profile_lists_factors() {
        let p = profile(RampShape::Linear, 2, 3);
        assert_eq!(p, vec![0.5, 1.0, 1.0]);
    }

    proptest! {
        #[test]
        fn linear_is_monotonic_and_hits_one(duration in 1i64..120) {
            let mut previous = 0.0;
            for k in 0..duration + 3 {
                let f = profile_factor(RampShape::Linear, k, duration).unwrap();
                prop_assert!(f >= previous);
                prop_assert!((0.0..=1.0).contains(&f));
                previous = f;
            }
            prop_assert_eq!(profile_factor(RampShape::Linear, duration - 1, duration).unwrap(), 1.0);
        }

        #[test]
        fn every_shape_stays_in_unit_interval(k in 0i64..240, d in 0i64..120) {
            for shape in [RampShape::Step, RampShape::Linear, RampShape::Exp] {
                let f = profile_factor(shape, k, d).unwrap();
                prop_assert!((0.0..=1.0).contains(&f));
            }
        }
    }
}
