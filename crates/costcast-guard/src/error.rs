//! Error types for the bounds validator.
//!
//! Validation itself never returns these: findings go into a
//! [`ValidationResult`](costcast_types::ValidationResult). They cover
//! building the validator's inputs.

use costcast_drivers::DriverError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GuardError {
    /// The simulation frame could not be calibrated.
    #[error("driver model error: {0}")]
    Driver(#[from] DriverError),

    /// The synthetic baseline level must sit above the fixed cost.
    #[error("baseline level {level} must exceed alpha {alpha}")]
    LevelBelowFixedCost { level: f64, alpha: f64 },

    /// A configured range or band is unusable.
    #[error("invalid guard configuration: {0}")]
    InvalidConfig(String),
}

pub type GuardResult<T> = Result<T, GuardError>;
