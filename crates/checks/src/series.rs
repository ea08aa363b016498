//! Time series container handed in by the caller.

use tethys_calendar::{Calendar, DateTime, Frequency, date_range};

use crate::error::ChecksError;

/// An ordered sequence of `(timestamp, value)` pairs in one calendar.
///
/// Missing values are `NaN`. Ordering and regularity are not enforced
/// here; that is the job of [`validate_frequency`](crate::validate_frequency).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    calendar: Calendar,
    times: Vec<DateTime>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Creates a series from aligned timestamps and values.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksError::LengthMismatch`] if the lengths differ.
    pub fn new(
        calendar: Calendar,
        times: Vec<DateTime>,
        values: Vec<f64>,
    ) -> Result<Self, ChecksError> {
        if times.len() != values.len() {
            return Err(ChecksError::LengthMismatch {
                field: "values",
                expected: times.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            calendar,
            times,
            values,
        })
    }

    /// Creates a regular series of `values.len()` records starting at `start`.
    pub fn regular(calendar: Calendar, start: DateTime, freq: &Frequency, values: Vec<f64>) -> Self {
        let times = date_range(calendar, start, freq, values.len());
        Self {
            calendar,
            times,
            values,
        }
    }

    /// Returns the calendar the timestamps are expressed in.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Returns the timestamps.
    pub fn times(&self) -> &[DateTime] {
        &self.times
    }

    /// Returns the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the series has no records.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_rejected() {
        let cal = Calendar::NoLeap;
        let t = DateTime::date(cal, 2000, 1, 1).unwrap();
        let err = TimeSeries::new(cal, vec![t], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            ChecksError::LengthMismatch {
                field: "values",
                expected: 1,
                got: 2,
            }
        );
    }

    #[test]
    fn regular_builds_daily_axis() {
        let cal = Calendar::ProlepticGregorian;
        let start = DateTime::date(cal, 2000, 2, 28).unwrap();
        let s = TimeSeries::regular(cal, start, &Frequency::DAILY, vec![0.0; 3]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.times()[1], DateTime::date(cal, 2000, 2, 29).unwrap());
        assert!(!s.is_empty());
    }
}
