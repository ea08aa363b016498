//! CF time-axis decoding (`"<unit> since <reference>"`).

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use tethys_calendar::{Calendar, DateTime};

use crate::error::IoError;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Unit of CF time offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn seconds(self) -> f64 {
        match self {
            Self::Days => 86_400.0,
            Self::Hours => 3_600.0,
            Self::Minutes => 60.0,
            Self::Seconds => 1.0,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "days" | "day" | "d" => Some(Self::Days),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(Self::Hours),
            "minutes" | "minute" | "mins" | "min" => Some(Self::Minutes),
            "seconds" | "second" | "secs" | "sec" | "s" => Some(Self::Seconds),
            _ => None,
        }
    }
}

/// Parsed CF `units` attribute of a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    unit: TimeUnit,
    reference: DateTime,
}

impl TimeUnits {
    /// Parses e.g. `"days since 2000-01-01"` or
    /// `"hours since 1950-01-01 00:00:00"` in `calendar`.
    ///
    /// The reference date is read with chrono; dates chrono rejects but
    /// `calendar` accepts (such as February 30 in a 360-day calendar) are
    /// read directly.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTime`] for a malformed string, an unknown
    /// unit, or a reference date invalid in `calendar`.
    pub fn parse(units: &str, calendar: Calendar) -> Result<Self, IoError> {
        let invalid = |reason: String| IoError::InvalidTime { reason };
        let mut parts = units.trim().splitn(3, ' ');
        let (Some(unit), Some("since"), Some(reference)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid(format!("unexpected time units format: '{units}'")));
        };
        let unit = TimeUnit::parse(unit).ok_or_else(|| invalid(format!("unknown time unit '{unit}'")))?;
        let reference = parse_reference(reference, calendar)
            .map_err(|reason| invalid(format!("bad reference date in '{units}': {reason}")))?;
        Ok(Self { unit, reference })
    }

    /// Returns the offset unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns the reference instant.
    pub fn reference(&self) -> DateTime {
        self.reference
    }

    /// Converts offsets to timestamps, rounding to the nearest second.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTime`] for non-finite offsets.
    pub fn decode(&self, calendar: Calendar, offsets: &[f64]) -> Result<Vec<DateTime>, IoError> {
        let origin = self.reference.to_seconds(calendar);
        offsets
            .iter()
            .enumerate()
            .map(|(i, &offset)| {
                if !offset.is_finite() {
                    return Err(IoError::InvalidTime {
                        reason: format!("non-finite time offset at index {i}"),
                    });
                }
                let seconds = (offset * self.unit.seconds()).round() as i64;
                Ok(DateTime::from_seconds(calendar, origin + seconds))
            })
            .collect()
    }
}

fn parse_reference(s: &str, calendar: Calendar) -> Result<DateTime, String> {
    let s = s.trim();
    let s = s
        .strip_suffix(" UTC")
        .or_else(|| s.strip_suffix('Z'))
        .unwrap_or(s)
        .trim();

    let parsed = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    match parsed {
        Some(dt) => DateTime::new(
            calendar,
            dt.year(),
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
        )
        .map_err(|e| e.to_string()),
        None => DateTime::parse(calendar, s).map_err(|e| e.to_string()),
    }
}

/// Parses ISO-8601 timestamps (`YYYY-MM-DD[THH:MM[:SS]]`) in `calendar`.
pub(crate) fn parse_iso(calendar: Calendar, values: &[String]) -> Result<Vec<DateTime>, IoError> {
    values
        .iter()
        .map(|s| DateTime::parse(calendar, s).map_err(IoError::from))
        .collect()
}
