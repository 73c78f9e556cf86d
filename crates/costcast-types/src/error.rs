//! Construction errors for the shared value types.
//!
//! These are raised immediately when a value object would violate its
//! invariants. Nothing here is ever repaired silently.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building a [`MonthlySeries`](crate::MonthlySeries).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("duplicate month {0}")]
    DuplicateMonth(NaiveDate),

    #[error("months out of order: {previous} followed by {next}")]
    OutOfOrder { previous: NaiveDate, next: NaiveDate },

    #[error("gap between {previous} and {next}")]
    Gap { previous: NaiveDate, next: NaiveDate },

    #[error("non-finite value {value} at {date}")]
    NonFinite { date: NaiveDate, value: f64 },

    #[error("month arithmetic overflowed past {0}")]
    DateOverflow(NaiveDate),
}

/// Errors raised while building a [`DriverContext`](crate::DriverContext).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContextError {
    #[error("alpha must be finite and >= 0, got {0}")]
    InvalidAlpha(f64),

    #[error("beta must be finite and > 0, got {0}")]
    InvalidBeta(f64),
}

/// Errors raised while constructing [`ScenarioParams`](crate::ScenarioParams).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamsError {
    #[error("{field} must be a non-negative whole number of months, got {value}")]
    NegativeDuration { field: &'static str, value: i64 },

    #[error("{field} of {value} months is too large")]
    DurationOutOfRange { field: &'static str, value: i64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("beta_multiplier must be strictly positive, got {0}")]
    NonPositiveBetaMultiplier(f64),

    #[error("fte_delta_pct and fte_delta_abs are mutually exclusive")]
    ConflictingFteDelta,

    #[error("fte_cut_plan segment {segment:?} has non-finite delta {value}")]
    InvalidCutPlan { segment: String, value: f64 },

    #[error("unrecognized {field}: {value:?}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("malformed scenario parameters: {0}")]
    Malformed(String),
}

/// Result alias for parameter construction.
pub type ParamsResult<T> = Result<T, ParamsError>;
