//! Reference inputs shared by the checks and the test suites.
//!
//! A flat ten-million monthly baseline, 800 heads, a 20% fixed share.

use chrono::NaiveDate;
use costcast_drivers::DriverError;
use costcast_guard::{GuardResult, SimulationFrame};
use costcast_types::{ContextError, DriverContext, MonthlySeries, SeriesError};

pub const REFERENCE_LEVEL: f64 = 10_000_000.0;
pub const REFERENCE_ALPHA: f64 = 2_000_000.0;
pub const REFERENCE_BETA: f64 = 10_000.0;
pub const REFERENCE_FTE: f64 = 800.0;
pub const REFERENCE_HORIZON: usize = 120;

/// January 2025.
pub fn reference_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

pub fn flat_baseline(months: usize) -> Result<MonthlySeries, SeriesError> {
    MonthlySeries::flat(reference_start(), months, REFERENCE_LEVEL)
}

/// Trending, seasonal baseline for checks that must not rely on flatness.
pub fn seasonal_baseline(months: usize) -> Result<MonthlySeries, SeriesError> {
    let values: Vec<f64> = (0..months)
        .map(|i| {
            let trend = 1.0 + 0.002 * i as f64;
            let season = if i % 12 == 11 { 1.15 } else { 1.0 };
            REFERENCE_LEVEL * trend * season
        })
        .collect();
    MonthlySeries::from_values(reference_start(), &values)
}

pub fn reference_context() -> Result<DriverContext, ContextError> {
    DriverContext::new(REFERENCE_ALPHA, REFERENCE_BETA)
}

pub fn reference_frame() -> GuardResult<SimulationFrame> {
    let context = reference_context().map_err(DriverError::from)?;
    SimulationFrame::new(context, REFERENCE_LEVEL)
}
