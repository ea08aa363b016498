//! Streamflow reducers.
//!
//! Every function takes the daily flows of one period, `NaN` where
//! missing, and returns `NaN` when there is nothing to summarise.

use tethys_checks::{PeriodRecords, TimeSeries};
use tethys_stats::{mean, median, quantile_type7, rolling_mean, sorted_finite, sum};

use crate::indicator::Reducer;

/// Flows above this multiple of the series median count as high flows.
pub const HIGH_FLOW_FACTOR: f64 = 9.0;
/// Flows below this fraction of the series mean count as low flows.
pub const LOW_FLOW_FACTOR: f64 = 0.2;
/// Quantile normalised by the median in [`flow_index`].
pub const FLOW_INDEX_QUANTILE: f64 = 0.95;
/// Window of the moving average in [`base_flow_index`], in days.
pub const BASE_FLOW_WINDOW: usize = 7;

/// Minimum of the 7-day moving average divided by the mean flow.
pub fn base_flow_index(q: &[f64]) -> f64 {
    let m7 = rolling_mean(q, BASE_FLOW_WINDOW);
    let min = m7
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .min_by(f64::total_cmp)
        .unwrap_or(f64::NAN);
    min / mean(q)
}

/// Richards-Baker flashiness: sum of absolute day-to-day changes over the
/// sum of flows.
pub fn rb_flashiness_index(q: &[f64]) -> f64 {
    let changes: f64 = q
        .windows(2)
        .filter(|w| w[0].is_finite() && w[1].is_finite())
        .map(|w| (w[1] - w[0]).abs())
        .sum();
    let total = sum(q);
    if total == 0.0 { f64::NAN } else { changes / total }
}

/// Number of values strictly above `threshold`.
pub fn days_above(q: &[f64], threshold: f64) -> f64 {
    q.iter().filter(|v| **v > threshold).count() as f64
}

/// Number of values strictly below `threshold`.
pub fn days_below(q: &[f64], threshold: f64) -> f64 {
    q.iter().filter(|v| **v < threshold).count() as f64
}

/// Ratio of the 95th percentile to the median flow.
pub fn flow_index(q: &[f64]) -> f64 {
    let sorted = sorted_finite(q);
    quantile_type7(&sorted, FLOW_INDEX_QUANTILE) / median(&sorted)
}

/// Day of year of the first occurrence of the extreme selected by `better`.
fn doy_of(records: &PeriodRecords<'_>, better: fn(f64, f64) -> bool) -> f64 {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in records.values().iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if !better(v, b) => {}
            _ => best = Some((i, v)),
        }
    }
    match best {
        Some((i, _)) => f64::from(records.times()[i].day_of_year(records.calendar())),
        None => f64::NAN,
    }
}

/// Day of year of the maximum flow.
pub fn doy_max(records: &PeriodRecords<'_>) -> f64 {
    doy_of(records, |v, best| v > best)
}

/// Day of year of the minimum flow.
pub fn doy_min(records: &PeriodRecords<'_>) -> f64 {
    doy_of(records, |v, best| v < best)
}

// ---------------------------------------------------------------------------
// Reducer factories
// ---------------------------------------------------------------------------

pub(crate) fn base_flow_index_reducer(_: &TimeSeries) -> Reducer {
    Box::new(|r: &PeriodRecords<'_>| base_flow_index(r.values()))
}

pub(crate) fn rb_flashiness_reducer(_: &TimeSeries) -> Reducer {
    Box::new(|r: &PeriodRecords<'_>| rb_flashiness_index(r.values()))
}

pub(crate) fn doy_max_reducer(_: &TimeSeries) -> Reducer {
    Box::new(doy_max)
}

pub(crate) fn doy_min_reducer(_: &TimeSeries) -> Reducer {
    Box::new(doy_min)
}

/// Threshold is fixed from the whole series before periods are reduced.
pub(crate) fn high_flow_reducer(series: &TimeSeries) -> Reducer {
    let threshold = HIGH_FLOW_FACTOR * median(&sorted_finite(series.values()));
    Box::new(move |r: &PeriodRecords<'_>| days_above(r.values(), threshold))
}

pub(crate) fn low_flow_reducer(series: &TimeSeries) -> Reducer {
    let threshold = LOW_FLOW_FACTOR * mean(series.values());
    Box::new(move |r: &PeriodRecords<'_>| days_below(r.values(), threshold))
}

pub(crate) fn flow_index_reducer(_: &TimeSeries) -> Reducer {
    Box::new(|r: &PeriodRecords<'_>| flow_index(r.values()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn base_flow_index_constant_flow() {
        assert_relative_eq!(base_flow_index(&[3.0; 30]), 1.0);
    }

    #[test]
    fn base_flow_index_short_period() {
        assert!(base_flow_index(&[1.0; 5]).is_nan());
    }

    #[test]
    fn base_flow_index_with_peak() {
        let mut q = vec![1.0; 14];
        q[13] = 15.0;
        // Mean is 2.0, lowest 7-day mean is 1.0.
        assert_relative_eq!(base_flow_index(&q), 0.5);
    }

    #[test]
    fn flashiness() {
        let q = [1.0, 3.0, 1.0, 3.0];
        assert_relative_eq!(rb_flashiness_index(&q), 6.0 / 8.0);
        assert_relative_eq!(rb_flashiness_index(&[2.0; 10]), 0.0);
        assert!(rb_flashiness_index(&[0.0; 3]).is_nan());
    }

    #[test]
    fn flashiness_skips_missing_pairs() {
        let q = [1.0, f64::NAN, 1.0, 2.0];
        assert_relative_eq!(rb_flashiness_index(&q), 1.0 / 4.0);
    }

    #[test]
    fn threshold_counts() {
        let q = [1.0, 10.0, f64::NAN, 0.1];
        assert_relative_eq!(days_above(&q, 9.0), 1.0);
        assert_relative_eq!(days_below(&q, 0.2), 1.0);
    }

    #[test]
    fn flow_index_ratio() {
        let q: Vec<f64> = (1..=5).map(f64::from).collect();
        // p95 = 4.8, median = 3.
        assert_relative_eq!(flow_index(&q), 1.6, epsilon = 1e-12);
    }
}
