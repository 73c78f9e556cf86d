//! # costcast-overlay
//!
//! Turns a baseline monthly cost series plus a [`ScenarioParams`] record
//! into the scenario series.
//!
//! ```text
//!  MonthlySeries ─┐
//!  ScenarioParams ├──▶ OverlayEngine::project ──▶ ScenarioProjection
//!  DriverContext ─┘                                 ├─ series
//!                                                   ├─ fte / beta_eff
//!                                                   └─ baseline_fte
//! ```
//!
//! The engine is pure: no I/O, no shared state. The same inputs always give
//! the same series, and the all-default parameter record gives back the
//! baseline exactly.
//!
//! [`ScenarioParams`]: costcast_types::ScenarioParams

#![deny(unsafe_code)]

pub mod engine;
pub mod envelope;
pub mod error;
pub mod options;
pub mod projection;

pub use engine::{apply_scenario, OverlayEngine};
pub use envelope::EventEnvelope;
pub use error::{OverlayError, OverlayResult};
pub use options::{CostTargetBasis, OverlayOptions, DEFAULT_BETA_INFLATION};
pub use projection::{ScenarioProjection, ScenarioSummary};
