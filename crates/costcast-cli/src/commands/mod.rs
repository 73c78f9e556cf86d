//! Command implementations

use std::path::Path;

use costcast_types::ValidationResult;
use serde::de::DeserializeOwned;

use crate::error::CliResult;
use crate::output::{print_error, print_warning};

pub mod compile;
pub mod ramp;
pub mod simulate;
pub mod validate;

/// Exit status for a run whose parameters were rejected.
pub const EXIT_REJECTED: u8 = 2;

/// Read a JSON or YAML file (by extension; JSON otherwise).
pub fn read_input<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let contents = std::fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Print validator findings, errors to stderr.
pub fn report_validation(result: &ValidationResult) {
    for issue in &result.warnings {
        print_warning(&issue.to_string());
    }
    for issue in &result.clamps {
        print_warning(&issue.to_string());
    }
    for issue in &result.errors {
        print_error(&issue.to_string());
    }
}
