//! Reference frame for the synthetic simulations.

use chrono::NaiveDate;
use costcast_drivers::calibrate;
use costcast_types::{DriverContext, Severity};

use crate::error::{GuardError, GuardResult};

/// What the validator simulates against: a flat baseline at
/// `baseline_level` driven by `context`, judged with the multiplier band of
/// `severity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationFrame {
    context: DriverContext,
    baseline_level: f64,
    severity: Severity,
    start: NaiveDate,
}

impl SimulationFrame {
    pub fn new(context: DriverContext, baseline_level: f64) -> GuardResult<Self> {
        if !(baseline_level.is_finite() && baseline_level > context.alpha()) {
            return Err(GuardError::LevelBelowFixedCost {
                level: baseline_level,
                alpha: context.alpha(),
            });
        }
        Ok(Self {
            context,
            baseline_level,
            severity: Severity::default(),
            start: NaiveDate::default(),
        })
    }

    /// Calibrate the driver context from a starting cost and headcount; the
    /// starting cost becomes the baseline level.
    pub fn calibrated(cost0: f64, fte0: f64, fixed_share: f64) -> GuardResult<Self> {
        let context = calibrate(cost0, fte0, fixed_share)?;
        Self::new(context, cost0)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// First month of the synthetic baseline. Only affects labelling.
    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    pub fn context(&self) -> &DriverContext {
        &self.context
    }

    pub fn baseline_level(&self) -> f64 {
        self.baseline_level
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibrated_frame_uses_cost_as_level() {
        let frame = SimulationFrame::calibrated(10_000_000.0, 800.0, 0.2)
            .unwrap()
            .with_severity(Severity::Crisis);
        assert_eq!(frame.baseline_level(), 10_000_000.0);
        assert!((frame.context().alpha() - 2_000_000.0).abs() < 1e-6);
        assert_eq!(frame.severity(), Severity::Crisis);
    }

    #[test]
    fn level_must_exceed_alpha() {
        let ctx = DriverContext::new(5.0, 1.0).unwrap();
        assert!(matches!(
            SimulationFrame::new(ctx, 5.0),
            Err(GuardError::LevelBelowFixedCost { .. })
        ));
    }

    #[test]
    fn calibration_errors_propagate() {
        assert!(matches!(
            SimulationFrame::calibrated(1.0, 0.0, 0.2),
            Err(GuardError::Driver(_))
        ));
    }
}
