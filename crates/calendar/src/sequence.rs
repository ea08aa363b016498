//! Regular date sequence generation.

use crate::calendar::Calendar;
use crate::datetime::DateTime;
use crate::frequency::Frequency;

/// Generates `n` timestamps starting at `start`, spaced by `freq`.
///
/// Fixed-length steps are added in seconds. Calendar steps are applied to
/// `start` directly (`start + k` months) so month-end clamping never drifts.
///
/// # Example
///
/// ```
/// use tethys_calendar::{Calendar, DateTime, Frequency, date_range};
///
/// let cal = Calendar::NoLeap;
/// let start = DateTime::date(cal, 2000, 12, 30).unwrap();
/// let dates = date_range(cal, start, &Frequency::DAILY, 4);
/// assert_eq!(dates[2], DateTime::date(cal, 2001, 1, 1).unwrap());
/// ```
pub fn date_range(calendar: Calendar, start: DateTime, freq: &Frequency, n: usize) -> Vec<DateTime> {
    let mut dates = Vec::with_capacity(n);
    match (freq.step_seconds(), freq.step_months()) {
        (Some(step), _) => {
            let origin = start.to_seconds(calendar);
            for k in 0..n as i64 {
                dates.push(DateTime::from_seconds(calendar, origin + k * step));
            }
        }
        (None, Some(span)) => {
            for k in 0..n as i64 {
                dates.push(start.shift_months(calendar, k * span));
            }
        }
        (None, None) => {}
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: Calendar = Calendar::ProlepticGregorian;

    #[test]
    fn empty() {
        let start = DateTime::date(G, 2000, 1, 1).unwrap();
        assert!(date_range(G, start, &Frequency::DAILY, 0).is_empty());
    }

    #[test]
    fn daily_across_leap_day() {
        let start = DateTime::date(G, 2000, 2, 28).unwrap();
        let dates = date_range(G, start, &Frequency::DAILY, 3);
        assert_eq!(dates[1], DateTime::date(G, 2000, 2, 29).unwrap());
        assert_eq!(dates[2], DateTime::date(G, 2000, 3, 1).unwrap());
    }

    #[test]
    fn hourly_wraps_midnight() {
        let start = DateTime::new(G, 2000, 12, 31, 22, 0, 0).unwrap();
        let dates = date_range(G, start, &Frequency::HOURLY, 3);
        assert_eq!(dates[2], DateTime::date(G, 2001, 1, 1).unwrap());
    }

    #[test]
    fn month_end_sequence_does_not_drift() {
        let start = DateTime::date(G, 2001, 1, 31).unwrap();
        let freq: Frequency = "M".parse().unwrap();
        let dates = date_range(G, start, &freq, 4);
        assert_eq!(dates[1], DateTime::date(G, 2001, 2, 28).unwrap());
        assert_eq!(dates[2], DateTime::date(G, 2001, 3, 31).unwrap());
        assert_eq!(dates[3], DateTime::date(G, 2001, 4, 30).unwrap());
    }
}
