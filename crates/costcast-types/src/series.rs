//! Monthly series: one value per calendar month, no gaps.
//!
//! A [`MonthlySeries`] is what the external forecaster hands us and what the
//! overlay engine hands back. Dates are normalised to the first of the month
//! and must be strictly consecutive.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

// ── Month arithmetic ───────────────────────────────────────────────────

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

/// Whole months from `from` to `to` (negative when `to` is earlier).
///
/// Days are ignored: 2024-01-31 → 2024-02-01 is one month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let a = from.year() as i64 * 12 + from.month0() as i64;
    let b = to.year() as i64 * 12 + to.month0() as i64;
    b - a
}

/// `date` shifted forward by `months`, normalised to the first of the month.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, SeriesError> {
    month_start(date)
        .checked_add_months(Months::new(months))
        .ok_or(SeriesError::DateOverflow(date))
}

// ── Monthly Point ──────────────────────────────────────────────────────

/// A single month of a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// First day of the month.
    pub date: NaiveDate,
    /// Monthly value (cost, in the baseline's currency unit).
    pub value: f64,
}

// ── Monthly Series ─────────────────────────────────────────────────────

/// Ordered, gap-free monthly values with an optional scenario label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct MonthlySeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    points: Vec<MonthlyPoint>,
}

#[derive(Deserialize)]
struct RawSeries {
    #[serde(default)]
    label: Option<String>,
    points: Vec<MonthlyPoint>,
}

impl TryFrom<RawSeries> for MonthlySeries {
    type Error = SeriesError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        let series = Self::new(raw.points)?;
        Ok(match raw.label {
            Some(label) => series.with_label(label),
            None => series,
        })
    }
}

impl MonthlySeries {
    /// Build a series from points, normalising dates to month starts.
    ///
    /// Rejects duplicate months, out-of-order months, gaps and non-finite
    /// values. An empty series is allowed here; consumers that need data
    /// reject it themselves.
    pub fn new(points: Vec<MonthlyPoint>) -> Result<Self, SeriesError> {
        let mut normalised = Vec::with_capacity(points.len());
        let mut previous: Option<NaiveDate> = None;

        for point in points {
            let date = month_start(point.date);
            if !point.value.is_finite() {
                return Err(SeriesError::NonFinite {
                    date,
                    value: point.value,
                });
            }
            if let Some(prev) = previous {
                match months_between(prev, date) {
                    1 => {}
                    0 => return Err(SeriesError::DuplicateMonth(date)),
                    d if d < 0 => {
                        return Err(SeriesError::OutOfOrder {
                            previous: prev,
                            next: date,
                        })
                    }
                    _ => {
                        return Err(SeriesError::Gap {
                            previous: prev,
                            next: date,
                        })
                    }
                }
            }
            previous = Some(date);
            normalised.push(MonthlyPoint {
                date,
                value: point.value,
            });
        }

        Ok(Self {
            label: None,
            points: normalised,
        })
    }

    /// Consecutive months starting at `start`, one per value.
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Result<Self, SeriesError> {
        let mut points = Vec::with_capacity(values.len());
        for (i, &value) in values.iter().enumerate() {
            points.push(MonthlyPoint {
                date: add_months(start, i as u32)?,
                value,
            });
        }
        Self::new(points)
    }

    /// A flat series of `months` values at `level`.
    pub fn flat(start: NaiveDate, months: usize, level: f64) -> Result<Self, SeriesError> {
        Self::from_values(start, &vec![level; months])
    }

    /// Same points, tagged with `label`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The first `months` points (or all of them when shorter).
    pub fn truncated(&self, months: usize) -> Self {
        Self {
            label: self.label.clone(),
            points: self.points.iter().take(months).copied().collect(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn points(&self) -> &[MonthlyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First month of the series.
    pub fn start(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn first(&self) -> Option<&MonthlyPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&MonthlyPoint> {
        self.points.last()
    }

    /// Values in month order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Value at month offset `index`.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.value)
    }

    /// Smallest monthly value, if any.
    pub fn min_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::min)
    }

    /// Sum over all months.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}
