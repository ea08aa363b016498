//! Calendar-agnostic date-time value with second resolution.

use std::fmt;

use crate::calendar::{Calendar, SECONDS_PER_DAY};
use crate::error::CalendarError;

/// A date and time of day, interpreted in a [`Calendar`] supplied by the caller.
///
/// Fields are ordered so that the derived `Ord` is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl DateTime {
    /// Creates a `DateTime`, validating every component against `calendar`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`], [`CalendarError::InvalidDay`]
    /// or [`CalendarError::InvalidTime`] for out-of-range components.
    pub fn new(
        calendar: Calendar,
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        let max_day = calendar.days_in_month(year, month)?;
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                year,
                max_day,
            });
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CalendarError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Creates a `DateTime` at midnight.
    pub fn date(calendar: Calendar, year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        Self::new(calendar, year, month, day, 0, 0, 0)
    }

    /// Midnight on the first day of the month with index `year * 12 + month - 1`.
    pub fn month_start(month_index: i64) -> Self {
        let year = month_index.div_euclid(12) as i32;
        let month = (month_index.rem_euclid(12) + 1) as u8;
        Self {
            year,
            month,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Converts seconds since 0001-01-01T00:00:00 back into a `DateTime`.
    pub fn from_seconds(calendar: Calendar, seconds: i64) -> Self {
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        let sod = seconds.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = calendar.ymd_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (sod / 3600) as u8,
            minute: (sod % 3600 / 60) as u8,
            second: (sod % 60) as u8,
        }
    }

    /// Seconds since 0001-01-01T00:00:00 in `calendar`.
    pub fn to_seconds(self, calendar: Calendar) -> i64 {
        self.days(calendar) * SECONDS_PER_DAY + i64::from(self.seconds_of_day())
    }

    /// Whole days since 0001-01-01 in `calendar`.
    pub fn days(self, calendar: Calendar) -> i64 {
        calendar.days_from_ymd(self.year, self.month, self.day)
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the hour (0..=23).
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute (0..=59).
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Returns the second (0..=59).
    pub fn second(self) -> u8 {
        self.second
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_of_day(self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }

    /// Continuous month counter: `year * 12 + month - 1`.
    pub fn month_index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Day of year (1-based) in `calendar`.
    pub fn day_of_year(self, calendar: Calendar) -> u16 {
        (self.days(calendar) - calendar.days_before_year(self.year) + 1) as u16
    }

    /// Day of week in `calendar`, 0 = Monday.
    pub fn weekday(self, calendar: Calendar) -> u8 {
        Calendar::weekday_from_days(self.days(calendar))
    }

    /// Returns `true` when this is the last day of its month.
    pub fn is_month_end(self, calendar: Calendar) -> bool {
        self.day == calendar.month_len(self.year, self.month)
    }

    /// Midnight of the same day.
    pub fn midnight(self) -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            ..self
        }
    }

    /// Shifts by `months` calendar months, keeping the time of day.
    ///
    /// Month-end dates stay on the month end; other days are clamped to the
    /// length of the target month.
    pub fn shift_months(self, calendar: Calendar, months: i64) -> Self {
        let target = Self::month_start(self.month_index() + months);
        let len = calendar.month_len(target.year, target.month);
        let day = if self.is_month_end(calendar) {
            len
        } else {
            self.day.min(len)
        };
        Self {
            day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            ..target
        }
    }

    /// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD HH:MM:SS`.
    ///
    /// A leading `-` denotes a negative year. Fractional seconds and time
    /// zone suffixes are not accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDateString`] for malformed input and
    /// the component errors of [`DateTime::new`] for out-of-range values.
    pub fn parse(calendar: Calendar, input: &str) -> Result<Self, CalendarError> {
        let bad = || CalendarError::InvalidDateString {
            input: input.to_string(),
        };
        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (date_part, time_part) = match body.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t)),
            None => (body, None),
        };

        let mut date_fields = date_part.split('-');
        let year: i32 = date_fields.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
        let month: u8 = date_fields.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
        let day: u8 = date_fields.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
        if date_fields.next().is_some() {
            return Err(bad());
        }

        let (hour, minute, second) = match time_part {
            None => (0, 0, 0),
            Some(t) => {
                let fields: Vec<&str> = t.split(':').collect();
                if !(2..=3).contains(&fields.len()) {
                    return Err(bad());
                }
                let parse = |s: &str| s.parse::<u8>().map_err(|_| bad());
                let second = match fields.get(2) {
                    Some(s) => parse(s)?,
                    None => 0,
                };
                (parse(fields[0])?, parse(fields[1])?, second)
            }
        };

        let year = if negative { -year } else { year };
        Self::new(calendar, year, month, day, hour, minute, second)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.seconds_of_day() != 0 {
            write!(f, "T{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        }
        Ok(())
    }
}
