//! Error types for the driver model and ramp profiles.
//!
//! Both fail fast: nothing in this crate recovers from bad input.

use costcast_types::ContextError;
use thiserror::Error;

/// Errors from the driver model and ramp profile functions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DriverError {
    /// Calibration headcount was zero or negative.
    #[error("calibration FTE must be > 0, got {0}")]
    NonPositiveFte(f64),

    /// Calibration cost was negative.
    #[error("calibration cost must be >= 0, got {0}")]
    NegativeCost(f64),

    /// Fixed share outside `[0, 1)`.
    #[error("fixed share must lie in [0, 1) so that beta stays positive, got {0}")]
    InvalidFixedShare(f64),

    /// Per-head rate was zero or negative.
    #[error("beta must be > 0, got {0}")]
    NonPositiveBeta(f64),

    /// A ramp was asked about a month before it started.
    #[error("ramp month index must be >= 0, got {0}")]
    NegativeMonthIndex(i64),

    /// A ramp was given a negative window.
    #[error("ramp duration must be >= 0 months, got {0}")]
    NegativeDuration(i64),

    /// Context construction failed.
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;
