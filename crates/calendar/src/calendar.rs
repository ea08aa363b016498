//! CF calendar kinds and calendar-length arithmetic.
//!
//! Every calendar counts days from 0001-01-01 (day 0). Conversions are pure
//! integer arithmetic over `(year, month, day)` triples.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Seconds in one day. All supported calendars have fixed-length days.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of days in each month of a common year (index 0 unused).
const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days elapsed before the first of each month in a common year (index 0 unused).
const DAYS_BEFORE_MONTH: [u16; 13] = [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A CF-convention calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Calendar {
    /// Gregorian rules extended backwards (`standard`, `gregorian`,
    /// `proleptic_gregorian`).
    #[default]
    ProlepticGregorian,
    /// Leap year every fourth year (`julian`).
    Julian,
    /// Every year has 365 days (`noleap`, `365_day`).
    NoLeap,
    /// Every year has 366 days (`all_leap`, `366_day`).
    AllLeap,
    /// Twelve 30-day months (`360_day`).
    Day360,
}

impl Calendar {
    /// Returns `true` when `year` contains a February 29.
    pub fn is_leap_year(self, year: i32) -> bool {
        match self {
            Self::ProlepticGregorian => {
                year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
            }
            Self::Julian => year.rem_euclid(4) == 0,
            Self::NoLeap | Self::Day360 => false,
            Self::AllLeap => true,
        }
    }

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn days_in_month(self, year: i32, month: u8) -> Result<u8, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(self.month_len(year, month))
    }

    /// Number of days in `year`.
    pub fn days_in_year(self, year: i32) -> u16 {
        match self {
            Self::Day360 => 360,
            _ if self.is_leap_year(year) => 366,
            _ => 365,
        }
    }

    /// Days from 0001-01-01 to January 1 of `year`. Negative before year 1.
    pub fn days_before_year(self, year: i32) -> i64 {
        let y = i64::from(year) - 1;
        match self {
            Self::ProlepticGregorian => {
                365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
            }
            Self::Julian => 365 * y + y.div_euclid(4),
            Self::NoLeap => 365 * y,
            Self::AllLeap => 366 * y,
            Self::Day360 => 360 * y,
        }
    }

    /// Day count since 0001-01-01 for a date that is already known to be valid.
    pub(crate) fn days_from_ymd(self, year: i32, month: u8, day: u8) -> i64 {
        self.days_before_year(year) + i64::from(self.days_before_month(year, month)) + i64::from(day)
            - 1
    }

    /// Inverse of [`days_from_ymd`](Self::days_from_ymd).
    pub(crate) fn ymd_from_days(self, days: i64) -> (i32, u8, u8) {
        let mean_year = match self {
            Self::ProlepticGregorian => 365.2425,
            Self::Julian => 365.25,
            Self::NoLeap => 365.0,
            Self::AllLeap => 366.0,
            Self::Day360 => 360.0,
        };
        let mut year = (days as f64 / mean_year).floor() as i32 + 1;
        while self.days_before_year(year) > days {
            year -= 1;
        }
        while self.days_before_year(year + 1) <= days {
            year += 1;
        }

        let mut rem = days - self.days_before_year(year);
        for month in 1..=12u8 {
            let len = i64::from(self.month_len(year, month));
            if rem < len {
                return (year, month, (rem + 1) as u8);
            }
            rem -= len;
        }
        // `rem` is bounded by days_in_year, so the loop always returns.
        (year, 12, self.month_len(year, 12))
    }

    /// Day of the week for a day count, 0 = Monday.
    ///
    /// Day 0 (0001-01-01) is a Monday in the proleptic Gregorian calendar;
    /// the same convention is applied to every calendar.
    pub fn weekday_from_days(days: i64) -> u8 {
        days.rem_euclid(7) as u8
    }

    pub(crate) fn month_len(self, year: i32, month: u8) -> u8 {
        match self {
            Self::Day360 => 30,
            _ if month == 2 && self.is_leap_year(year) => 29,
            _ => DAYS_PER_MONTH[month as usize],
        }
    }

    fn days_before_month(self, year: i32, month: u8) -> u16 {
        match self {
            Self::Day360 => 30 * (u16::from(month) - 1),
            _ => {
                let leap_shift = u16::from(month > 2 && self.is_leap_year(year));
                DAYS_BEFORE_MONTH[month as usize] + leap_shift
            }
        }
    }

    /// CF attribute value for this calendar.
    pub fn cf_name(self) -> &'static str {
        match self {
            Self::ProlepticGregorian => "proleptic_gregorian",
            Self::Julian => "julian",
            Self::NoLeap => "noleap",
            Self::AllLeap => "all_leap",
            Self::Day360 => "360_day",
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cf_name())
    }
}

impl FromStr for Calendar {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" | "default" => {
                Ok(Self::ProlepticGregorian)
            }
            "julian" => Ok(Self::Julian),
            "noleap" | "no_leap" | "365_day" => Ok(Self::NoLeap),
            "all_leap" | "allleap" | "366_day" => Ok(Self::AllLeap),
            "360_day" => Ok(Self::Day360),
            other => Err(CalendarError::UnknownCalendar {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Calendar; 5] = [
        Calendar::ProlepticGregorian,
        Calendar::Julian,
        Calendar::NoLeap,
        Calendar::AllLeap,
        Calendar::Day360,
    ];

    #[test]
    fn leap_rules() {
        let g = Calendar::ProlepticGregorian;
        assert!(g.is_leap_year(2000));
        assert!(!g.is_leap_year(1900));
        assert!(g.is_leap_year(2004));
        assert!(!g.is_leap_year(2001));
        assert!(g.is_leap_year(0));

        assert!(Calendar::Julian.is_leap_year(1900));
        assert!(!Calendar::NoLeap.is_leap_year(2000));
        assert!(Calendar::AllLeap.is_leap_year(2001));
    }

    #[test]
    fn february_lengths() {
        assert_eq!(Calendar::ProlepticGregorian.days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(Calendar::ProlepticGregorian.days_in_month(2001, 2).unwrap(), 28);
        assert_eq!(Calendar::NoLeap.days_in_month(2000, 2).unwrap(), 28);
        assert_eq!(Calendar::AllLeap.days_in_month(2001, 2).unwrap(), 29);
        assert_eq!(Calendar::Day360.days_in_month(2001, 2).unwrap(), 30);
    }

    #[test]
    fn invalid_month_rejected() {
        assert_eq!(
            Calendar::NoLeap.days_in_month(2000, 13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn month_lengths_sum_to_year_length() {
        for cal in ALL {
            for year in [1900, 2000, 2001, 2004] {
                let total: u16 = (1..=12)
                    .map(|m| u16::from(cal.days_in_month(year, m).unwrap()))
                    .sum();
                assert_eq!(total, cal.days_in_year(year), "{cal} {year}");
            }
        }
    }

    #[test]
    fn year_boundaries_are_contiguous() {
        for cal in ALL {
            for year in -5..=5 {
                assert_eq!(
                    cal.days_before_year(year + 1) - cal.days_before_year(year),
                    i64::from(cal.days_in_year(year)),
                    "{cal} {year}"
                );
            }
        }
    }

    #[test]
    fn epoch_is_day_zero() {
        for cal in ALL {
            assert_eq!(cal.days_from_ymd(1, 1, 1), 0);
        }
    }

    #[test]
    fn known_gregorian_day_count() {
        // 1970-01-01 is 719162 days after 0001-01-01.
        assert_eq!(Calendar::ProlepticGregorian.days_from_ymd(1970, 1, 1), 719_162);
    }

    #[test]
    fn ymd_roundtrip_all_calendars() {
        for cal in ALL {
            let start = cal.days_from_ymd(1999, 12, 1);
            for days in start..start + 800 {
                let (y, m, d) = cal.ymd_from_days(days);
                assert_eq!(cal.days_from_ymd(y, m, d), days, "{cal} day {days}");
            }
        }
    }

    #[test]
    fn ymd_from_negative_days() {
        let (y, m, d) = Calendar::ProlepticGregorian.ymd_from_days(-1);
        assert_eq!((y, m, d), (0, 12, 31));
    }

    #[test]
    fn weekday_of_known_dates() {
        let g = Calendar::ProlepticGregorian;
        // 2000-01-01 was a Saturday.
        assert_eq!(Calendar::weekday_from_days(g.days_from_ymd(2000, 1, 1)), 5);
        // 2024-03-11 was a Monday.
        assert_eq!(Calendar::weekday_from_days(g.days_from_ymd(2024, 3, 11)), 0);
    }

    #[test]
    fn parse_cf_names() {
        assert_eq!("standard".parse::<Calendar>().unwrap(), Calendar::ProlepticGregorian);
        assert_eq!("365_day".parse::<Calendar>().unwrap(), Calendar::NoLeap);
        assert_eq!("ALL_LEAP".parse::<Calendar>().unwrap(), Calendar::AllLeap);
        assert_eq!("360_day".parse::<Calendar>().unwrap(), Calendar::Day360);
        assert!(matches!(
            "lunar".parse::<Calendar>(),
            Err(CalendarError::UnknownCalendar { .. })
        ));
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for cal in ALL {
            assert_eq!(cal.to_string().parse::<Calendar>().unwrap(), cal);
        }
    }
}
