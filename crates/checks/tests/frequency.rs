//! Regularity checks on realistic daily series.

use tethys_calendar::{Calendar, DateTime, Frequency, date_range};
use tethys_checks::{
    CheckConfig, ChecksError, FrequencyError, TimeAxis, TimeSeries, Validator, validate_frequency,
};

const G: Calendar = Calendar::ProlepticGregorian;

fn d(y: i32, m: u8, day: u8) -> DateTime {
    DateTime::date(G, y, m, day).unwrap()
}

fn series(times: Vec<DateTime>) -> TimeSeries {
    let values = (0..times.len()).map(|i| i as f64).collect();
    TimeSeries::new(G, times, values).unwrap()
}

fn tg_mean_validator() -> Validator {
    Validator::new(CheckConfig::new(Frequency::DAILY, Frequency::YEAR_START)).unwrap()
}

#[test]
fn regular_series_pass_for_every_calendar() {
    for cal in [
        Calendar::ProlepticGregorian,
        Calendar::Julian,
        Calendar::NoLeap,
        Calendar::AllLeap,
        Calendar::Day360,
    ] {
        let start = DateTime::date(cal, 1999, 11, 20).unwrap();
        for alias in ["D", "6H", "MS", "Q-NOV", "YS"] {
            let freq: Frequency = alias.parse().unwrap();
            let axis = TimeAxis::new(cal, &date_range(cal, start, &freq, 50));
            assert!(validate_frequency(&axis, &freq).is_ok(), "{cal} {alias}");
        }
    }
}

#[test]
fn one_day_short_of_a_year_is_accepted() {
    let s = series(date_range(G, d(2000, 1, 1), &Frequency::DAILY, 365));
    let mask = tg_mean_validator().missing_mask(&s).unwrap();
    assert_eq!(mask, vec![true]);
}

#[test]
fn twelve_hourly_data_rejected_as_daily() {
    let s = series(date_range(G, d(2000, 1, 1), &"12H".parse().unwrap(), 365));
    let err = tg_mean_validator().missing_mask(&s).unwrap_err();
    assert_eq!(
        err,
        ChecksError::Frequency(FrequencyError::InconsistentFrequency {
            expected: "D".to_string(),
            found: "12H".to_string(),
        })
    );
}

#[test]
fn missing_day_between_two_years_rejected() {
    let mut times = date_range(G, d(2000, 1, 1), &Frequency::DAILY, 365);
    times.extend(date_range(G, d(2001, 1, 1), &Frequency::DAILY, 365));
    let err = tg_mean_validator().missing_mask(&series(times)).unwrap_err();
    match err {
        ChecksError::Frequency(FrequencyError::Gap { count, details, .. }) => {
            assert_eq!(count, 1);
            assert_eq!(details, "2000-12-30 -> 2001-01-01");
        }
        other => panic!("expected a gap, got {other:?}"),
    }
}

#[test]
fn overlapping_block_reports_duplicates() {
    let mut times = date_range(G, d(2000, 1, 1), &Frequency::DAILY, 365);
    times.extend(date_range(G, d(2000, 12, 29), &Frequency::DAILY, 365));
    let err = tg_mean_validator().missing_mask(&series(times)).unwrap_err();
    match err {
        ChecksError::Frequency(FrequencyError::DuplicateDates { count, dates }) => {
            assert_eq!(count, 2);
            assert_eq!(dates, "2000-12-29, 2000-12-30");
        }
        other => panic!("expected duplicates, got {other:?}"),
    }
}

#[test]
fn sub_daily_series_against_hourly_base() {
    let s = series(date_range(G, d(2000, 1, 1), &Frequency::HOURLY, 48));
    let v = Validator::new(CheckConfig::new(Frequency::HOURLY, "D".parse().unwrap())).unwrap();
    assert_eq!(v.missing_mask(&s).unwrap(), vec![false, false]);
}

#[test]
fn monthly_series_on_late_days_pass() {
    let ms = Frequency::MONTH_START;
    for day in [29, 30, 31] {
        let times = date_range(G, d(2000, 1, day), &ms, 14);
        assert_eq!(times[1], d(2000, 2, 29));
        let axis = TimeAxis::new(G, &times);
        let inferred = axis.inferred_frequency().frequency();
        assert!(inferred.is_some_and(|f| f.same_step(&ms)), "day {day}: {inferred:?}");
        assert!(validate_frequency(&axis, &ms).is_ok(), "day {day}");
    }

    let times = date_range(G, d(2000, 1, 30), &ms, 6);
    assert_eq!(times[2], d(2000, 3, 30));
    let s = series(times);
    let validator = Validator::new(CheckConfig::new(ms, Frequency::YEAR_START)).unwrap();
    assert_eq!(validator.missing_mask(&s).unwrap(), vec![true]);
}

#[test]
fn monthly_gap_after_short_month_detected() {
    let ms = Frequency::MONTH_START;
    let times = vec![d(2000, 1, 30), d(2000, 2, 29), d(2000, 4, 30)];
    let err = validate_frequency(&TimeAxis::new(G, &times), &ms).unwrap_err();
    assert_eq!(
        err,
        FrequencyError::Gap {
            count: 1,
            expected: "MS".to_string(),
            details: "2000-02-29 -> 2000-04-30".to_string(),
        }
    );
}
