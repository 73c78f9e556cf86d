//! Costcast conformance suite.
//!
//! Runs the reference scenarios and numeric properties end to end across
//! the driver, overlay, validator and compiler crates.
//!
//! | Category | Properties |
//! |----------|------------|
//! | Ramp     | `ramp-monotonic` |
//! | Overlay  | `identity`, `cost-floor`, `rate-reset`, `cost-target-cut` |
//! | Guard    | `clamp-convergence`, `percent-units` |
//! | Intent   | `keep-cost-flat`, `early-start` |
//!
//! ```no_run
//! let report = costcast_conformance::run_all();
//! println!("{report}");
//! assert!(report.all_passed());
//! ```

#![deny(unsafe_code)]

pub mod fixtures;
pub mod properties;
pub mod report;
pub mod types;

pub use properties::{ids_for_category, property, Property, PROPERTIES};
pub use report::{CategoryReport, ConformanceReport};
pub use types::{ConformanceConfig, ConformanceSummary, PropertyCategory, PropertyResult};

use tracing::{info, warn};

/// Check every property.
pub fn run_all() -> ConformanceReport {
    run(&ConformanceConfig::default())
}

/// Check the properties a config selects, in canonical order.
pub fn run(config: &ConformanceConfig) -> ConformanceReport {
    let selected: Vec<&Property> = PROPERTIES
        .iter()
        .filter(|p| config.selects(p.id, p.category))
        .collect();

    let mut results = Vec::with_capacity(selected.len());
    for p in &selected {
        let result = p.run();
        if result.passed {
            info!(property = p.id, "property holds");
        } else {
            warn!(property = p.id, details = ?result.details, "property violated");
        }
        let stop = config.fail_fast && !result.passed;
        results.push(result);
        if stop {
            break;
        }
    }

    let skipped = selected.len() - results.len();
    ConformanceReport::from_results(results, skipped)
}
