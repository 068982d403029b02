//! Canonical forecast data model.
//!
//! `DailyForecast` is the raw per-day unit as received from the prediction
//! backend; `DailyPrediction` is the canonical unit consumed by the
//! presentation layer, with the weekday label derived locally. A
//! `ForecastResult` bundles the ordered predictions with recomputed summary
//! statistics and is immutable once constructed: every normalization or
//! mock-generation call produces a fresh value that replaces the prior one
//! wholesale.

use crate::dates::{format_date, weekday_name};
use crate::stats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single raw day of forecast data.
///
/// When `error` is present the invariant `lower = value - error` and
/// `upper = value + error` holds. Dates are unique within one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub value: f64,
    pub error: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl DailyForecast {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value,
            error: None,
            lower: None,
            upper: None,
        }
    }

    /// A forecast day with a symmetric error band around `value`.
    pub fn with_error(date: NaiveDate, value: f64, error: f64) -> Self {
        Self {
            date,
            value,
            error: Some(error),
            lower: Some(value - error),
            upper: Some(value + error),
        }
    }
}

/// A canonical per-day prediction for display.
///
/// `weekday` is always derived from `date`, never transmitted independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub weekday: String,
    pub date: String,
    pub value: f64,
    pub error: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl From<&DailyForecast> for DailyPrediction {
    fn from(day: &DailyForecast) -> Self {
        DailyPrediction {
            weekday: weekday_name(&day.date).to_string(),
            date: format_date(&day.date),
            value: day.value,
            error: day.error,
            lower: day.lower,
            upper: day.upper,
        }
    }
}

/// An ordered forecast window with summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Daily predictions sorted ascending by date.
    pub predictions: Vec<DailyPrediction>,
    /// Sum of daily values, recomputed locally.
    pub total: f64,
    /// Supplied by the payload when present, otherwise `round(total / n)`.
    pub average: f64,
    /// Additive sum of per-day errors, when any day carries one.
    pub aggregated_error: Option<f64>,
}

impl ForecastResult {
    /// Assemble a result from raw forecast days.
    ///
    /// Sorts ascending by date, derives weekday labels, recomputes the total
    /// and (unless `supplied_average` is given) the average. Callers are
    /// responsible for rejecting empty series before assembly; an empty
    /// input yields zeroed statistics.
    pub fn assemble(mut series: Vec<DailyForecast>, supplied_average: Option<f64>) -> Self {
        series.sort_by_key(|day| day.date);

        let total = stats::sum_values(&series);
        let average = supplied_average.unwrap_or_else(|| stats::rounded_average(total, series.len()));
        let aggregated_error = stats::aggregate_error(&series);
        let predictions = series.iter().map(DailyPrediction::from).collect();

        ForecastResult {
            predictions,
            total,
            average,
            aggregated_error,
        }
    }
}
