//! # costcast-types
//!
//! Value objects shared by every costcast crate:
//!
//! - [`MonthlySeries`]: gap-free monthly values, the baseline in and the
//!   scenario out
//! - [`DriverContext`]: fixed (`alpha`) / per-head (`beta`) cost split
//! - [`ScenarioParams`]: the typed intervention descriptor, validated at
//!   construction
//! - [`ValidationResult`] / [`ValidationOutcome`]: validator findings
//! - [`ScenarioIntent`] / [`CompileResult`]: classified requests and what
//!   the intent compiler makes of them
//!
//! Every type here is immutable once built; adjustments produce new values.

#![deny(unsafe_code)]

pub mod context;
pub mod error;
pub mod intent;
pub mod params;
pub mod series;
pub mod types;
pub mod validation;

// ── Re-exports ─────────────────────────────────────────────────────────

pub use context::DriverContext;
pub use error::{ContextError, ParamsError, ParamsResult, SeriesError};
pub use intent::{
    constraints, parse_month, CompileResult, Direction, IntentType, Magnitude, MagnitudeUnit,
    ScenarioIntent, Timing,
};
pub use params::{RawScenarioParams, ScenarioParams, ScenarioParamsBuilder};
pub use series::{add_months, month_start, months_between, MonthlyPoint, MonthlySeries};
pub use types::{Driver, ImpactMode, RampShape, Severity};
pub use validation::{ValidationIssue, ValidationOutcome, ValidationResult};
