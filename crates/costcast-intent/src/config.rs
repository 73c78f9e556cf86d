//! Compiler configuration.

use costcast_types::Severity;
use serde::{Deserialize, Serialize};

/// Default magnitude (as a fraction) per severity tier, used when an intent
/// carries no explicit size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityDefaults {
    pub operational: f64,
    pub stress: f64,
    pub crisis: f64,
}

impl Default for SeverityDefaults {
    fn default() -> Self {
        Self {
            operational: 0.05,
            stress: 0.10,
            crisis: 0.20,
        }
    }
}

impl SeverityDefaults {
    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Operational => self.operational,
            Severity::Stress => self.stress,
            Severity::Crisis => self.crisis,
        }
    }
}

/// Intent compiler configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub severity_defaults: SeverityDefaults,
    /// Shortest phase-in for cost targets and headcount restructuring.
    pub min_ramp_months: u32,
    /// Shortest phase-in for a decrease under a `no_layoffs` constraint.
    pub no_layoffs_min_ramp_months: u32,
    pub default_shock_duration_months: u32,
    /// Annual headcount growth assumed in the baseline.
    pub baseline_fte_growth: f64,
    /// Fixed share of cost at the start of the baseline (stated as an
    /// assumption only; calibration happens elsewhere).
    pub fixed_cost_share: f64,
    /// Annual per-head cost inflation (stated as an assumption only).
    pub beta_inflation_per_year: f64,
    /// Question asked when a request cannot be mapped to a template.
    pub clarifying_question: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            severity_defaults: SeverityDefaults::default(),
            min_ramp_months: 6,
            no_layoffs_min_ramp_months: 12,
            default_shock_duration_months: 12,
            baseline_fte_growth: 0.03,
            fixed_cost_share: 0.2,
            beta_inflation_per_year: 0.03,
            clarifying_question:
                "Is this change temporary or permanent, and roughly how large should it be?"
                    .into(),
        }
    }
}

impl CompilerConfig {
    /// The baseline assumptions every compiled scenario rests on.
    pub fn base_assumptions(&self) -> Vec<String> {
        vec![
            format!(
                "Fixed costs are about {:.0}% of total cost at the start of the baseline",
                self.fixed_cost_share * 100.0
            ),
            format!(
                "Cost per FTE inflates about {:.0}% per year",
                self.beta_inflation_per_year * 100.0
            ),
            format!(
                "Baseline headcount grows about {:.0}% per year",
                self.baseline_fte_growth * 100.0
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_defaults_scale_with_tier() {
        let d = SeverityDefaults::default();
        assert_eq!(d.for_severity(Severity::Operational), 0.05);
        assert_eq!(d.for_severity(Severity::Stress), 0.10);
        assert_eq!(d.for_severity(Severity::Crisis), 0.20);
    }

    #[test]
    fn base_assumptions_quote_config() {
        let assumptions = CompilerConfig::default().base_assumptions();
        assert_eq!(assumptions.len(), 3);
        assert!(assumptions[0].contains("20%"));
        assert!(assumptions[2].contains("3%"));
    }

    #[test]
    fn partial_toml() {
        let config: CompilerConfig = toml::from_str(
            r#"
            min_ramp_months = 3
            [severity_defaults]
            crisis = 0.3
            "#,
        )
        .unwrap();
        assert_eq!(config.min_ramp_months, 3);
        assert_eq!(config.severity_defaults.crisis, 0.3);
        assert_eq!(config.severity_defaults.stress, 0.10);
        assert_eq!(config.no_layoffs_min_ramp_months, 12);
    }
}
