//! Validation results.
//!
//! The validator reports three kinds of findings: `errors` are fatal,
//! `warnings` are informational, `clamps` record a value that was adjusted
//! into bounds. Callers branch on [`ValidationOutcome`] (or on
//! [`ValidationResult::ok`]) before trusting the parameters.

use serde::{Deserialize, Serialize};

use crate::params::ScenarioParams;

// ── Validation Issue ───────────────────────────────────────────────────

/// A single finding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Machine-readable code, e.g. `PERCENT_UNITS`.
    pub code: String,
    /// Parameter the finding refers to, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            field: None,
            message: message.into(),
        }
    }

    pub fn for_field(
        code: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{}] {}: {}", self.code, field, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

// ── Validation Result ──────────────────────────────────────────────────

/// All findings from one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub clamps: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// No fatal errors.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Nothing at all to report.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.clamps.is_empty()
    }

    pub fn error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn warn(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    pub fn clamp(&mut self, issue: ValidationIssue) {
        self.clamps.push(issue);
    }

    /// Warning and clamp messages, in that order, for display.
    pub fn notices(&self) -> Vec<String> {
        self.warnings
            .iter()
            .chain(self.clamps.iter())
            .map(|i| i.to_string())
            .collect()
    }
}

// ── Validation Outcome ─────────────────────────────────────────────────

/// Tagged result of validating a parameter set.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationOutcome {
    /// Parameters were already within bounds; nothing changed.
    Accepted(ScenarioParams),
    /// Parameters were adjusted; the result lists what and why.
    ClampedWithWarnings {
        params: ScenarioParams,
        result: ValidationResult,
    },
    /// Parameters must not be applied.
    Rejected { result: ValidationResult },
}

impl ValidationOutcome {
    /// Pick the variant that matches `result`.
    pub fn from_parts(params: ScenarioParams, result: ValidationResult) -> Self {
        if !result.ok() {
            Self::Rejected { result }
        } else if result.is_clean() {
            Self::Accepted(params)
        } else {
            Self::ClampedWithWarnings { params, result }
        }
    }

    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    /// The usable parameters, unless rejected.
    pub fn params(&self) -> Option<&ScenarioParams> {
        match self {
            Self::Accepted(params) | Self::ClampedWithWarnings { params, .. } => Some(params),
            Self::Rejected { .. } => None,
        }
    }

    pub fn into_params(self) -> Option<ScenarioParams> {
        match self {
            Self::Accepted(params) | Self::ClampedWithWarnings { params, .. } => Some(params),
            Self::Rejected { .. } => None,
        }
    }

    /// The findings (empty for `Accepted`).
    pub fn result(&self) -> ValidationResult {
        match self {
            Self::Accepted(_) => ValidationResult::default(),
            Self::ClampedWithWarnings { result, .. } | Self::Rejected { result } => result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_tracks_errors_only() {
        let mut r = ValidationResult::new();
        assert!(r.ok());
        assert!(r.is_clean());

        r.warn(ValidationIssue::new("W", "just so you know"));
        assert!(r.ok());
        assert!(!r.is_clean());

        r.error(ValidationIssue::new("E", "stop"));
        assert!(!r.ok());
    }

    #[test]
    fn outcome_variant_follows_result() {
        let params = ScenarioParams::default();

        let accepted = ValidationOutcome::from_parts(params.clone(), ValidationResult::new());
        assert!(matches!(accepted, ValidationOutcome::Accepted(_)));

        let mut clamped = ValidationResult::new();
        clamped.clamp(ValidationIssue::for_field("CLAMPED", "lag_months", "72 -> 60"));
        let outcome = ValidationOutcome::from_parts(params.clone(), clamped);
        assert!(outcome.is_ok());
        assert_eq!(outcome.result().clamps.len(), 1);

        let mut rejected = ValidationResult::new();
        rejected.error(ValidationIssue::new("MULTIPLIER", "out of band"));
        let outcome = ValidationOutcome::from_parts(params, rejected);
        assert!(!outcome.is_ok());
        assert!(outcome.params().is_none());
    }

    #[test]
    fn issue_display_includes_field() {
        let issue = ValidationIssue::for_field("CLAMPED", "lag_months", "72 -> 60");
        assert_eq!(issue.to_string(), "[CLAMPED] lag_months: 72 -> 60");
    }
}
