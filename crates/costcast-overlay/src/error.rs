//! Error types for the overlay engine.

use costcast_drivers::DriverError;
use costcast_types::SeriesError;
use thiserror::Error;

/// Errors that can occur while projecting a scenario.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OverlayError {
    /// The baseline has no rows.
    #[error("baseline series is empty")]
    EmptyBaseline,

    /// A horizon of zero months was requested.
    #[error("horizon must be at least one month")]
    ZeroHorizon,

    /// The change starts at or after the last projected month.
    #[error("lag of {lag} months starts at or after the {months}-month projection")]
    LagBeyondHorizon { lag: u32, months: usize },

    /// Driver model failure (e.g. beta ≤ 0 during cost-target inversion).
    #[error("driver model error: {0}")]
    Driver(#[from] DriverError),

    /// The projected series could not be assembled.
    #[error("series error: {0}")]
    Series(#[from] SeriesError),
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;
