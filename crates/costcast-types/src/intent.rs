//! Classified scenario intents and compile results.
//!
//! A [`ScenarioIntent`] is produced by an external interpreter from a
//! natural-language ask. Decoding is lenient where the interpreter is
//! likely to drift (unknown intent types become [`IntentType::Other`],
//! months may be `YYYY-MM` or `YYYY-MM-DD`).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::params::ScenarioParams;
use crate::series::month_start;
use crate::types::{Driver, Severity};

/// Well-known constraint tags.
pub mod constraints {
    pub const NO_LAYOFFS: &str = "no_layoffs";
    pub const KEEP_COST_FLAT: &str = "keep_cost_flat";
    pub const KEEP_FTE_FLAT: &str = "keep_fte_flat";
}

// ── Intent Type ─────────────────────────────────────────────────────────

/// Classification of the request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum IntentType {
    Constraint,
    Shock,
    Policy,
    Target,
    MixShift,
    Productivity,
    Attrition,
    Relocation,
    #[default]
    Other,
}

impl From<String> for IntentType {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "constraint" => Self::Constraint,
            "shock" => Self::Shock,
            "policy" => Self::Policy,
            "target" => Self::Target,
            "mix_shift" => Self::MixShift,
            "productivity" => Self::Productivity,
            "attrition" => Self::Attrition,
            "relocation" => Self::Relocation,
            _ => Self::Other,
        }
    }
}

impl IntentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constraint => "constraint",
            Self::Shock => "shock",
            Self::Policy => "policy",
            Self::Target => "target",
            Self::MixShift => "mix_shift",
            Self::Productivity => "productivity",
            Self::Attrition => "attrition",
            Self::Relocation => "relocation",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for IntentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Direction ───────────────────────────────────────────────────────────

/// Requested direction of change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Direction {
    Increase,
    Decrease,
    Hold,
    #[default]
    Unspecified,
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "increase" | "up" => Self::Increase,
            "decrease" | "down" => Self::Decrease,
            "hold" | "flat" => Self::Hold,
            _ => Self::Unspecified,
        }
    }
}

impl Direction {
    /// Apply this direction's sign to a magnitude.
    ///
    /// `Increase`/`Decrease` force the sign and `Hold` means no change, so
    /// any size collapses to zero. An unspecified direction keeps the value.
    pub fn signed(&self, value: f64) -> f64 {
        match self {
            Self::Increase => value.abs(),
            Self::Decrease => -value.abs(),
            Self::Hold => 0.0,
            Self::Unspecified => value,
        }
    }
}

// ── Magnitude ───────────────────────────────────────────────────────────

/// Unit of an explicit magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeUnit {
    /// Fraction of the baseline (`0.1` = 10%).
    Pct,
    /// Headcount units.
    Fte,
    /// Monthly currency amount.
    Currency,
}

/// An explicit size for the requested change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    pub unit: MagnitudeUnit,
    pub value: f64,
}

impl Magnitude {
    pub fn pct(value: f64) -> Self {
        Self {
            unit: MagnitudeUnit::Pct,
            value,
        }
    }

    pub fn fte(value: f64) -> Self {
        Self {
            unit: MagnitudeUnit::Fte,
            value,
        }
    }

    pub fn currency(value: f64) -> Self {
        Self {
            unit: MagnitudeUnit::Currency,
            value,
        }
    }
}

// ── Timing ──────────────────────────────────────────────────────────────

/// When the change starts and how it unfolds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Requested start month (absent = start of the baseline).
    #[serde(default, deserialize_with = "deserialize_month")]
    pub start: Option<NaiveDate>,
    /// How long a temporary change lasts.
    #[serde(default)]
    pub duration_months: Option<u32>,
    /// Ramp window: phase-in, and phase-out for temporary changes.
    #[serde(default)]
    pub ramp_months: Option<u32>,
}

/// Parse `YYYY-MM` or `YYYY-MM-DD` into the first of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .ok()
        .map(month_start)
}

fn deserialize_month<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_month(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid month {s:?}"))),
    }
}

// ── Scenario Intent ─────────────────────────────────────────────────────

/// A classified what-if request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioIntent {
    pub intent_type: IntentType,
    /// Which quantity the interpreter thinks is targeted.
    pub driver: Option<Driver>,
    pub direction: Direction,
    pub magnitude: Option<Magnitude>,
    pub timing: Timing,
    pub constraints: BTreeSet<String>,
    pub severity: Severity,
    pub confidence: f64,
    pub needs_clarification: bool,
    pub clarifying_question: Option<String>,
}

impl ScenarioIntent {
    pub fn new(intent_type: IntentType) -> Self {
        Self {
            intent_type,
            confidence: 1.0,
            ..Self::default()
        }
    }

    pub fn has_constraint(&self, tag: &str) -> bool {
        self.constraints.contains(tag)
    }

    pub fn with_constraint(mut self, tag: impl Into<String>) -> Self {
        self.constraints.insert(tag.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_magnitude(mut self, magnitude: Magnitude) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

// ── Compile Result ──────────────────────────────────────────────────────

/// Output of the intent compiler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompileResult {
    pub params: ScenarioParams,
    pub summary: String,
    pub assumptions: Vec<String>,
    pub needs_clarification: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarifying_question: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_intent_type_decodes_as_other() {
        let t: IntentType = serde_json::from_str("\"hire_robots\"").unwrap();
        assert_eq!(t, IntentType::Other);
        let t: IntentType = serde_json::from_str("\"mix_shift\"").unwrap();
        assert_eq!(t, IntentType::MixShift);
    }

    #[test]
    fn direction_signs_values() {
        assert_eq!(Direction::Decrease.signed(0.1), -0.1);
        assert_eq!(Direction::Increase.signed(-0.1), 0.1);
        assert_eq!(Direction::Unspecified.signed(-0.1), -0.1);
        assert_eq!(Direction::Hold.signed(0.1), 0.0);
        assert_eq!(Direction::Hold.signed(-25.0), 0.0);
    }

    #[test]
    fn months_parse_in_both_spellings() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(parse_month("2025-01"), Some(jan));
        assert_eq!(parse_month("2025-01-17"), Some(jan));
        assert_eq!(parse_month("January"), None);
    }

    #[test]
    fn intent_decodes_from_sparse_json() {
        let json = r#"{
            "intent_type": "constraint",
            "constraints": ["keep_cost_flat"],
            "timing": {"start": "2025-03"}
        }"#;
        let intent: ScenarioIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.intent_type, IntentType::Constraint);
        assert!(intent.has_constraint(constraints::KEEP_COST_FLAT));
        assert_eq!(
            intent.timing.start,
            Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
        assert_eq!(intent.severity, Severity::Operational);
    }

    #[test]
    fn bad_month_is_a_decode_error() {
        let json = r#"{"timing": {"start": "soon"}}"#;
        assert!(serde_json::from_str::<ScenarioIntent>(json).is_err());
    }
}
