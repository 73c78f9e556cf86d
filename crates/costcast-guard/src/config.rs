//! Validator configuration: field ranges, multiplier bands, horizon.
//!
//! Everything here deserialises with defaults filled in, so a TOML table
//! only needs the keys it overrides:
//!
//! ```toml
//! [guard]
//! horizon_months = 60
//!
//! [guard.bands.crisis]
//! min = 0.05
//! max = 6.0
//! ```

use costcast_types::{ImpactMode, Severity};
use serde::{Deserialize, Serialize};

use crate::error::{GuardError, GuardResult};

// ── Ranges ─────────────────────────────────────────────────────────────

/// Closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn check(&self, name: &str) -> GuardResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min <= self.max) {
            return Err(GuardError::InvalidConfig(format!(
                "{name}: [{}, {}] is not a valid range",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Closed interval of whole months.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub min: u32,
    pub max: u32,
}

impl MonthRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

// ── Field Bounds ───────────────────────────────────────────────────────

/// Per-field clamp ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBounds {
    pub impact_level: Range,
    pub impact_growth: Range,
    pub growth_delta_pp_per_year: Range,
    pub drift_pp_per_year: Range,
    pub event_growth_delta_pp_per_year: Range,
    pub beta_multiplier: Range,
    pub cost_target_pct: Range,
    pub fte_delta_pct: Range,
    pub lag_months: MonthRange,
    pub onset_duration_months: MonthRange,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            impact_level: Range::new(-0.5, 1.0),
            impact_growth: Range::new(-0.5, 0.5),
            growth_delta_pp_per_year: Range::new(-0.5, 0.5),
            drift_pp_per_year: Range::new(-0.3, 0.3),
            event_growth_delta_pp_per_year: Range::new(-0.5, 0.5),
            beta_multiplier: Range::new(0.7, 1.3),
            cost_target_pct: Range::new(-0.5, 0.5),
            fte_delta_pct: Range::new(-0.9, 1.0),
            lag_months: MonthRange::new(0, 60),
            onset_duration_months: MonthRange::new(0, 24),
        }
    }
}

impl FieldBounds {
    /// Range for `impact_magnitude`, which depends on the impact mode.
    pub fn impact(&self, mode: ImpactMode) -> Range {
        match mode {
            ImpactMode::Level => self.impact_level,
            ImpactMode::Growth => self.impact_growth,
        }
    }
}

// ── Multiplier Bands ───────────────────────────────────────────────────

/// Acceptable `final / initial` projection multiplier per severity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplierBands {
    pub operational: Range,
    pub stress: Range,
    pub crisis: Range,
}

impl Default for MultiplierBands {
    fn default() -> Self {
        Self {
            operational: Range::new(0.2, 3.0),
            stress: Range::new(0.15, 4.0),
            crisis: Range::new(0.1, 5.0),
        }
    }
}

impl MultiplierBands {
    pub fn for_severity(&self, severity: Severity) -> Range {
        match severity {
            Severity::Operational => self.operational,
            Severity::Stress => self.stress,
            Severity::Crisis => self.crisis,
        }
    }
}

// ── Guard Config ───────────────────────────────────────────────────────

/// Validator configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Months simulated in the multiplier and floor checks.
    pub horizon_months: usize,
    /// Beta inflation used for the synthetic simulations.
    pub beta_inflation_per_year: f64,
    /// Percent-like values with a larger magnitude are read as whole
    /// percentages and divided by 100.
    pub percent_threshold: f64,
    pub bounds: FieldBounds,
    pub bands: MultiplierBands,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            horizon_months: 120,
            beta_inflation_per_year: 0.03,
            percent_threshold: 1.5,
            bounds: FieldBounds::default(),
            bands: MultiplierBands::default(),
        }
    }
}

impl GuardConfig {
    /// Reject configurations the validator cannot work with.
    pub fn check(&self) -> GuardResult<()> {
        if self.horizon_months == 0 {
            return Err(GuardError::InvalidConfig(
                "horizon_months must be at least 1".into(),
            ));
        }
        if !(self.percent_threshold.is_finite() && self.percent_threshold > 0.0) {
            return Err(GuardError::InvalidConfig(format!(
                "percent_threshold must be > 0, got {}",
                self.percent_threshold
            )));
        }

        let b = &self.bounds;
        for (name, range) in [
            ("impact_level", b.impact_level),
            ("impact_growth", b.impact_growth),
            ("growth_delta_pp_per_year", b.growth_delta_pp_per_year),
            ("drift_pp_per_year", b.drift_pp_per_year),
            ("event_growth_delta_pp_per_year", b.event_growth_delta_pp_per_year),
            ("beta_multiplier", b.beta_multiplier),
            ("cost_target_pct", b.cost_target_pct),
            ("fte_delta_pct", b.fte_delta_pct),
        ] {
            range.check(name)?;
        }
        if b.beta_multiplier.min <= 0.0 {
            return Err(GuardError::InvalidConfig(
                "beta_multiplier range must stay above 0".into(),
            ));
        }
        for (name, months) in [
            ("lag_months", b.lag_months),
            ("onset_duration_months", b.onset_duration_months),
        ] {
            if months.min > months.max {
                return Err(GuardError::InvalidConfig(format!(
                    "{name}: [{}, {}] is not a valid range",
                    months.min, months.max
                )));
            }
        }

        // A band that excludes 1.0 would reject the no-op scenario.
        for severity in [Severity::Operational, Severity::Stress, Severity::Crisis] {
            let band = self.bands.for_severity(severity);
            band.check(severity.as_str())?;
            if !band.contains(1.0) {
                return Err(GuardError::InvalidConfig(format!(
                    "{severity} band [{}, {}] must contain 1.0",
                    band.min, band.max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GuardConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.horizon_months, 120);
        assert_eq!(config.bounds.impact(ImpactMode::Growth), Range::new(-0.5, 0.5));
        assert_eq!(config.bands.for_severity(Severity::Stress), Range::new(0.15, 4.0));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GuardConfig = toml::from_str(
            r#"
            horizon_months = 60

            [bands.crisis]
            min = 0.05
            max = 6.0
            "#,
        )
        .unwrap();
        assert_eq!(config.horizon_months, 60);
        assert_eq!(config.bands.crisis, Range::new(0.05, 6.0));
        assert_eq!(config.bands.operational, Range::new(0.2, 3.0));
        assert_eq!(config.bounds, FieldBounds::default());
    }

    #[test]
    fn band_must_contain_identity() {
        let mut config = GuardConfig::default();
        config.bands.stress = Range::new(1.5, 4.0);
        assert!(matches!(config.check(), Err(GuardError::InvalidConfig(_))));
    }

    #[test]
    fn inverted_range_rejected() {
        let mut config = GuardConfig::default();
        config.bounds.drift_pp_per_year = Range::new(0.3, -0.3);
        assert!(config.check().is_err());
    }

    #[test]
    fn range_clamps() {
        let r = Range::new(-0.5, 1.0);
        assert_eq!(r.clamp(2.0), 1.0);
        assert_eq!(r.clamp(-0.7), -0.5);
        assert!(r.contains(0.0));
        assert_eq!(MonthRange::new(0, 24).clamp(30), 24);
    }
}
