//! CLI error types

use costcast_drivers::DriverError;
use costcast_guard::GuardError;
use costcast_overlay::OverlayError;
use costcast_types::{ParamsError, SeriesError};
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scenario parameters failed construction
    #[error("Invalid parameters: {0}")]
    Params(#[from] ParamsError),

    /// Baseline series failed construction
    #[error("Invalid series: {0}")]
    Series(#[from] SeriesError),

    /// Driver model error
    #[error("Driver model error: {0}")]
    Driver(#[from] DriverError),

    /// Overlay error
    #[error("Simulation error: {0}")]
    Overlay(#[from] OverlayError),

    /// Validator setup error
    #[error("Validator error: {0}")]
    Guard(#[from] GuardError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML rendering error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
