//! Event envelope: the active fraction of a scenario effect per month.
//!
//! ```text
//!  1.0 ┤        ┌──────────┐
//!      │      ╱            ╲
//!      │    ╱                ╲
//!  0.0 ┼──┴─────────────────────┴──────
//!      0   lag   onset   event   recovery
//! ```
//!
//! Before `lag` the envelope is 0. It ramps in over the onset window, holds
//! until the event ends, then ramps back out over the recovery window. A
//! permanent effect (no event duration) never ramps out.

use costcast_drivers::ramp;
use costcast_types::{RampShape, ScenarioParams};

/// Timing of one scenario effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventEnvelope {
    lag: u64,
    onset: u64,
    event: Option<u64>,
    recovery: u64,
    shape: RampShape,
}

impl EventEnvelope {
    pub fn from_params(params: &ScenarioParams) -> Self {
        Self {
            lag: u64::from(params.lag_months()),
            onset: u64::from(params.onset_duration_months()),
            event: params.event_duration_months().map(u64::from),
            recovery: params.recovery_duration_months().map(u64::from).unwrap_or(0),
            shape: params.shape(),
        }
    }

    /// Onset ramp only: 0 before lag, then the ramp profile, never ramping out.
    pub fn onset_at(&self, month: u64) -> f64 {
        if month < self.lag {
            return 0.0;
        }
        ramp::factor(self.shape, month - self.lag, self.onset)
    }

    /// Full envelope including the event window and recovery.
    pub fn at(&self, month: u64) -> f64 {
        if month < self.lag {
            return 0.0;
        }
        let k = month - self.lag;
        let Some(event) = self.event else {
            return ramp::factor(self.shape, k, self.onset);
        };
        if k < event {
            return ramp::factor(self.shape, k, self.onset);
        }

        let since_end = k - event;
        if since_end >= self.recovery {
            return 0.0;
        }
        let level_at_end = if event > 0 {
            ramp::factor(self.shape, event - 1, self.onset)
        } else {
            0.0
        };
        level_at_end * (1.0 - ramp::factor(self.shape, since_end, self.recovery))
    }

    /// Envelope values for months `0..months`.
    pub fn path(&self, months: usize) -> Vec<f64> {
        (0..months as u64).map(|t| self.at(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(lag: u32, onset: u32, event: Option<u32>, recovery: Option<u32>) -> EventEnvelope {
        let params = ScenarioParams::builder()
            .lag_months(lag)
            .onset_duration_months(onset)
            .event_duration_months(event)
            .recovery_duration_months(recovery)
            .shape(RampShape::Linear)
            .build()
            .unwrap();
        EventEnvelope::from_params(&params)
    }

    #[test]
    fn zero_before_lag() {
        let env = envelope(3, 0, None, None);
        assert_eq!(env.path(5), vec![0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn permanent_effect_ramps_in_and_holds() {
        let env = envelope(0, 4, None, None);
        let path = env.path(8);
        assert_eq!(path[0], 0.25);
        assert_eq!(path[3], 1.0);
        assert!(path[4..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn temporary_effect_switches_off_without_recovery() {
        let env = envelope(1, 0, Some(2), None);
        assert_eq!(env.path(5), vec![0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn recovery_ramps_out_linearly() {
        let env = envelope(0, 0, Some(2), Some(4));
        let path = env.path(8);
        assert_eq!(&path[..2], &[1.0, 1.0]);
        assert!((path[2] - 0.75).abs() < 1e-12);
        assert!((path[3] - 0.5).abs() < 1e-12);
        assert!((path[4] - 0.25).abs() < 1e-12);
        assert_eq!(path[5], 0.0);
        assert_eq!(path[7], 0.0);
    }

    #[test]
    fn onset_ignores_event_window() {
        let env = envelope(0, 0, Some(1), None);
        assert_eq!(env.at(5), 0.0);
        assert_eq!(env.onset_at(5), 1.0);
    }
}
