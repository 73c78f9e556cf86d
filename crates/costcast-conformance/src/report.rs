//! Conformance report generation.

use std::fmt;

use crate::types::{ConformanceSummary, PropertyCategory, PropertyResult};

/// Results for one category.
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub category: PropertyCategory,
    pub results: Vec<PropertyResult>,
    pub passed: usize,
    pub failed: usize,
}

impl CategoryReport {
    pub fn from_results(category: PropertyCategory, results: Vec<PropertyResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = results.len() - passed;
        Self {
            category,
            results,
            passed,
            failed,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for CategoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} ({}/{})",
            self.category,
            self.passed,
            self.results.len()
        )?;
        for r in &self.results {
            let mark = if r.passed { "+" } else { "x" };
            writeln!(f, "      [{}] {}", mark, r)?;
        }
        Ok(())
    }
}

/// A complete conformance report.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<PropertyResult>,
    pub categories: Vec<CategoryReport>,
    pub summary: ConformanceSummary,
}

impl ConformanceReport {
    pub fn from_results(results: Vec<PropertyResult>, skipped: usize) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        let categories = PropertyCategory::all()
            .iter()
            .filter_map(|cat| {
                let cat_results: Vec<PropertyResult> = results
                    .iter()
                    .filter(|r| r.category == *cat)
                    .cloned()
                    .collect();
                (!cat_results.is_empty()).then(|| CategoryReport::from_results(*cat, cat_results))
            })
            .collect();

        Self {
            results,
            categories,
            summary: ConformanceSummary {
                total,
                passed,
                failed,
                skipped,
            },
        }
    }

    pub fn all_passed(&self) -> bool {
        self.summary.all_passed()
    }

    /// Get only failed results.
    pub fn failures(&self) -> Vec<&PropertyResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(f, "|   Costcast Conformance Report                   |")?;
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(f, "| {:<47} |", self.summary.to_string())?;
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(f)?;

        for cat in &self.categories {
            write!(f, "{}", cat)?;
        }

        writeln!(f)?;
        if self.all_passed() {
            writeln!(f, "  ALL {} PROPERTIES HOLD", self.summary.total)?;
        } else {
            writeln!(f, "  {} PROPERTY(IES) VIOLATED", self.summary.failed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_results(pass_count: usize, fail_count: usize) -> Vec<PropertyResult> {
        let mut results = Vec::new();
        for i in 0..pass_count {
            results.push(PropertyResult::pass(
                &format!("ramp-{i}"),
                PropertyCategory::Ramp,
                "test",
            ));
        }
        for i in 0..fail_count {
            results.push(PropertyResult::fail(
                &format!("guard-{i}"),
                PropertyCategory::Guard,
                "test",
                "failed",
            ));
        }
        results
    }

    #[test]
    fn test_report_all_passed() {
        let report = ConformanceReport::from_results(make_results(4, 0), 0);
        assert!(report.all_passed());
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.categories.len(), 1);
        assert!(report.to_string().contains("ALL 4 PROPERTIES HOLD"));
    }

    #[test]
    fn test_report_with_failures() {
        let report = ConformanceReport::from_results(make_results(3, 2), 1);
        assert!(!report.all_passed());
        assert_eq!(report.summary.failed, 2);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.failures().len(), 2);
        assert!(!report.categories[1].all_passed());
        assert!(report.to_string().contains("2 PROPERTY(IES) VIOLATED"));
    }
}
