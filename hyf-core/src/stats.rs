//! Shared summary statistics for forecast series.

use crate::forecast::DailyForecast;

/// Sum of daily forecast values.
///
/// Totals are always recomputed locally; observed backend variants disagree
/// on whether their precomputed total includes rounding.
pub fn sum_values(series: &[DailyForecast]) -> f64 {
    series.iter().map(|day| day.value).sum()
}

/// Rounded mean of a total over `n` days. Returns 0 for an empty window.
pub fn rounded_average(total: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (total / n as f64).round()
}

/// Aggregate per-day error bands into a single summary figure.
///
/// Policy: simple additive sum of errors, not root-sum-square. The additive
/// sum reports wider uncertainty downstream. Days without an error band
/// contribute nothing; if no day carries one, there is no aggregate.
pub fn aggregate_error(series: &[DailyForecast]) -> Option<f64> {
    if series.iter().any(|day| day.error.is_some()) {
        Some(series.iter().filter_map(|day| day.error).sum())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, value: f64, error: Option<f64>) -> DailyForecast {
        DailyForecast {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            value,
            error,
            lower: error.map(|e| value - e),
            upper: error.map(|e| value + e),
        }
    }

    #[test]
    fn test_sum_values() {
        let series = vec![day(1, 100.0, None), day(2, 120.0, None)];
        assert_eq!(sum_values(&series), 220.0);
    }

    #[test]
    fn test_rounded_average() {
        assert_eq!(rounded_average(220.0, 2), 110.0);
        assert_eq!(rounded_average(215.0, 2), 108.0);
        assert_eq!(rounded_average(0.0, 0), 0.0);
    }

    #[test]
    fn test_aggregate_error_additive() {
        let series = vec![day(1, 100.0, Some(8.0)), day(2, 120.0, Some(10.0))];
        assert_eq!(aggregate_error(&series), Some(18.0));
    }

    #[test]
    fn test_aggregate_error_partial_bands() {
        // A single banded day is enough to produce an aggregate
        let series = vec![day(1, 100.0, None), day(2, 120.0, Some(10.0))];
        assert_eq!(aggregate_error(&series), Some(10.0));
    }

    #[test]
    fn test_aggregate_error_absent() {
        let series = vec![day(1, 100.0, None), day(2, 120.0, None)];
        assert_eq!(aggregate_error(&series), None);
    }
}
