//! Core types for conformance runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Crate area a property exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    /// Ramp profile shapes
    Ramp,
    /// Scenario overlay engine
    Overlay,
    /// Parameter bounds validator
    Guard,
    /// Intent compiler
    Intent,
}

impl PropertyCategory {
    /// All categories in canonical order.
    pub fn all() -> &'static [PropertyCategory] {
        &[Self::Ramp, Self::Overlay, Self::Guard, Self::Intent]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ramp => "Ramp Profiles",
            Self::Overlay => "Scenario Overlay",
            Self::Guard => "Bounds Validator",
            Self::Intent => "Intent Compiler",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of checking a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyResult {
    pub id: String,
    pub category: PropertyCategory,
    pub name: String,
    pub passed: bool,
    /// Failure detail.
    pub details: Option<String>,
}

impl PropertyResult {
    pub fn pass(id: &str, category: PropertyCategory, name: &str) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
            passed: true,
            details: None,
        }
    }

    pub fn fail(id: &str, category: PropertyCategory, name: &str, details: &str) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
            passed: false,
            details: Some(details.into()),
        }
    }
}

impl fmt::Display for PropertyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{}] {} - {}", status, self.id, self.name)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Which properties a run checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformanceConfig {
    /// Filter to specific categories (empty = all).
    pub categories: Vec<PropertyCategory>,
    /// Filter to specific property IDs (empty = all).
    pub property_ids: Vec<String>,
    /// Stop at the first failure.
    pub fail_fast: bool,
}

impl ConformanceConfig {
    pub(crate) fn selects(&self, id: &str, category: PropertyCategory) -> bool {
        (self.categories.is_empty() || self.categories.contains(&category))
            && (self.property_ids.is_empty() || self.property_ids.iter().any(|p| p == id))
    }
}

/// Summary statistics from a conformance run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformanceSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Selected but not run because an earlier check failed under `fail_fast`.
    pub skipped: usize,
}

impl ConformanceSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Pass rate as a percentage.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }
}

impl fmt::Display for ConformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} passed ({:.1}%), {} failed, {} skipped",
            self.passed,
            self.total,
            self.pass_rate(),
            self.failed,
            self.skipped,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_display_includes_details() {
        let r = PropertyResult::fail("identity", PropertyCategory::Overlay, "No-op", "month 3 moved");
        assert_eq!(r.to_string(), "[FAIL] identity - No-op (month 3 moved)");
    }

    #[test]
    fn empty_filters_select_everything() {
        let config = ConformanceConfig::default();
        assert!(config.selects("anything", PropertyCategory::Ramp));

        let config = ConformanceConfig {
            categories: vec![PropertyCategory::Guard],
            ..ConformanceConfig::default()
        };
        assert!(config.selects("percent-units", PropertyCategory::Guard));
        assert!(!config.selects("identity", PropertyCategory::Overlay));
    }

    #[test]
    fn pass_rate_of_empty_run() {
        let summary = ConformanceSummary {
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
        };
        assert_eq!(summary.pass_rate(), 100.0);
        assert!(summary.all_passed());
    }
}
