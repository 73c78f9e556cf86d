//! # costcast-guard
//!
//! Parameter bounds validator. Every generated [`ScenarioParams`] passes
//! through [`BoundsValidator::validate`] before it is applied:
//!
//! - percent-unit repair (`10` read as `0.10`)
//! - field clamps
//! - projection multiplier band, by severity
//! - cost floor at the fixed cost
//!
//! This is the only place in costcast where a bad value becomes a warning
//! rather than an error. The outcome is a tagged
//! [`ValidationOutcome`]: accepted, clamped with warnings, or rejected.
//!
//! [`ScenarioParams`]: costcast_types::ScenarioParams
//! [`ValidationOutcome`]: costcast_types::ValidationOutcome

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod frame;
pub mod validator;

pub use config::{FieldBounds, GuardConfig, MonthRange, MultiplierBands, Range};
pub use error::{GuardError, GuardResult};
pub use frame::SimulationFrame;
pub use validator::{codes, BoundsValidator};
