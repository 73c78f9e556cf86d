//! Cost/FTE driver model.
//!
//! ```text
//! cost = alpha + beta × FTE
//! ```
//!
//! `alpha` is the fixed monthly component, `beta` the cost of one headcount
//! unit. Beta drifts upward with inflation, so projections compound it
//! monthly via [`project_beta`].

use costcast_types::DriverContext;

use crate::error::{DriverError, DriverResult};

/// Split a starting cost into fixed and per-head components.
///
/// `alpha = fixed_share × cost₀`, `beta = (1 − fixed_share) × cost₀ / fte₀`.
pub fn calibrate(cost0: f64, fte0: f64, fixed_share: f64) -> DriverResult<DriverContext> {
    if !(fte0 > 0.0) {
        return Err(DriverError::NonPositiveFte(fte0));
    }
    if !(cost0 >= 0.0) {
        return Err(DriverError::NegativeCost(cost0));
    }
    if !(0.0..1.0).contains(&fixed_share) {
        return Err(DriverError::InvalidFixedShare(fixed_share));
    }

    let alpha = fixed_share * cost0;
    let beta = (1.0 - fixed_share) * cost0 / fte0;
    DriverContext::new(alpha, beta).map_err(DriverError::from)
}

/// Total cost for a headcount. Negative FTE counts as zero.
pub fn cost_from_fte(fte: f64, alpha: f64, beta: f64) -> f64 {
    (alpha + fte.max(0.0) * beta).max(0.0)
}

/// Headcount implied by a total cost. Costs below `alpha` imply zero FTE.
pub fn fte_from_cost(cost: f64, alpha: f64, beta: f64) -> DriverResult<f64> {
    if !(beta > 0.0) {
        return Err(DriverError::NonPositiveBeta(beta));
    }
    Ok(((cost - alpha.max(0.0)) / beta).max(0.0))
}

/// Equivalent monthly rate of an annual rate: `(1 + annual)^(1/12) − 1`.
///
/// Annual rates at or below −100% saturate at −1.
pub fn monthly_rate(annual: f64) -> f64 {
    if annual <= -1.0 {
        return -1.0;
    }
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Per-head rate for each of `months` months, compounding monthly.
///
/// Element 0 is `beta0`; element `t` is `beta0 × (1 + r)^t` with `r` the
/// monthly equivalent of `inflation_per_year`.
pub fn project_beta(beta0: f64, inflation_per_year: f64, months: usize) -> Vec<f64> {
    let growth = 1.0 + monthly_rate(inflation_per_year);
    let mut path = Vec::with_capacity(months);
    let mut beta = beta0;
    for _ in 0..months {
        path.push(beta);
        beta *= growth;
    }
    path
}

// ── Context extension ──────────────────────────────────────────────────

/// Conversions bound to a [`DriverContext`].
pub trait CostModel {
    /// Cost of `fte` headcount at the context's beta.
    fn cost_at(&self, fte: f64) -> f64;

    /// Headcount implied by `cost` at the context's beta.
    fn fte_at(&self, cost: f64) -> f64;
}

impl CostModel for DriverContext {
    fn cost_at(&self, fte: f64) -> f64 {
        cost_from_fte(fte, self.alpha(), self.beta())
    }

    fn fte_at(&self, cost: f64) -> f64 {
        // beta > 0 is a DriverContext invariant.
        ((cost - self.alpha()) / self.beta()).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibrate_splits_cost() {
        let ctx = calibrate(10_000_000.0, 800.0, 0.2).unwrap();
        assert!((ctx.alpha() - 2_000_000.0).abs() < 1e-6);
        assert!((ctx.beta() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn calibrate_rejects_bad_inputs() {
        assert!(matches!(
            calibrate(1.0, 0.0, 0.2),
            Err(DriverError::NonPositiveFte(_))
        ));
        assert!(matches!(
            calibrate(-1.0, 10.0, 0.2),
            Err(DriverError::NegativeCost(_))
        ));
        assert!(matches!(
            calibrate(1.0, 10.0, 1.5),
            Err(DriverError::InvalidFixedShare(_))
        ));
        assert!(matches!(
            calibrate(1.0, 10.0, 1.0),
            Err(DriverError::InvalidFixedShare(_))
        ));
        assert!(calibrate(1.0, f64::NAN, 0.2).is_err());
    }

    #[test]
    fn zero_cost_calibration_fails_on_beta() {
        assert!(matches!(
            calibrate(0.0, 10.0, 0.2),
            Err(DriverError::Context(_))
        ));
    }

    #[test]
    fn cost_from_fte_clamps_negative_headcount() {
        assert_eq!(cost_from_fte(-50.0, 100.0, 10.0), 100.0);
        assert_eq!(cost_from_fte(5.0, 100.0, 10.0), 150.0);
    }

    #[test]
    fn fte_from_cost_inverts_cost_from_fte() {
        let fte = fte_from_cost(cost_from_fte(800.0, 2e6, 1e4), 2e6, 1e4).unwrap();
        assert!((fte - 800.0).abs() < 1e-9);
    }

    #[test]
    fn fte_from_cost_floors_at_zero() {
        assert_eq!(fte_from_cost(50.0, 100.0, 10.0).unwrap(), 0.0);
    }

    #[test]
    fn fte_from_cost_rejects_non_positive_beta() {
        assert!(matches!(
            fte_from_cost(100.0, 0.0, 0.0),
            Err(DriverError::NonPositiveBeta(_))
        ));
    }

    #[test]
    fn project_beta_compounds_to_annual_rate() {
        let path = project_beta(100.0, 0.03, 13);
        assert_eq!(path.len(), 13);
        assert_eq!(path[0], 100.0);
        assert!((path[12] - 103.0).abs() < 1e-9);
        assert!(path.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn project_beta_without_inflation_is_flat() {
        assert!(project_beta(42.0, 0.0, 5).iter().all(|&b| b == 42.0));
    }

    #[test]
    fn monthly_rate_saturates() {
        assert_eq!(monthly_rate(-1.5), -1.0);
        assert_eq!(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn context_extension_matches_free_functions() {
        let ctx = DriverContext::new(2e6, 1e4).unwrap();
        assert_eq!(ctx.cost_at(800.0), cost_from_fte(800.0, 2e6, 1e4));
        assert_eq!(ctx.fte_at(10e6), 800.0);
    }
}
