//! Sampling and resampling frequencies.
//!
//! A [`Frequency`] is a unit, a positive multiple and, for weeks, quarters
//! and years, an anchor. Aliases follow the pandas offset conventions
//! (`D`, `12H`, `MS`, `QS-DEC`, `Q-NOV`, `YS-OCT`, `W-SUN`, ...).

use std::fmt;
use std::str::FromStr;

use crate::calendar::{Calendar, SECONDS_PER_DAY};
use crate::datetime::DateTime;
use crate::error::CalendarError;

const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Longest accepted step, in years.
pub const MAX_STEP_YEARS: i64 = 10_000;

const WEEKDAY_NAMES: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Base unit of a [`Frequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreqUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl FreqUnit {
    fn seconds(self) -> Option<i64> {
        match self {
            Self::Second => Some(1),
            Self::Minute => Some(60),
            Self::Hour => Some(3600),
            Self::Day => Some(SECONDS_PER_DAY),
            Self::Week => Some(7 * SECONDS_PER_DAY),
            Self::Month | Self::Quarter | Self::Year => None,
        }
    }

    fn months(self) -> Option<i64> {
        match self {
            Self::Month => Some(1),
            Self::Quarter => Some(3),
            Self::Year => Some(12),
            _ => None,
        }
    }
}

/// Which edge of a period names it. Does not change period boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Start,
    End,
}

/// An immutable frequency descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frequency {
    unit: FreqUnit,
    multiple: u32,
    /// First month of the period for quarters and years, last weekday
    /// (0 = Monday) for weeks, unused otherwise.
    anchor: u8,
    label: Label,
}

impl Frequency {
    /// One day.
    pub const DAILY: Self = Self::fixed(FreqUnit::Day);
    /// One hour.
    pub const HOURLY: Self = Self::fixed(FreqUnit::Hour);
    /// Calendar months labelled by their first day (`MS`).
    pub const MONTH_START: Self = Self {
        unit: FreqUnit::Month,
        multiple: 1,
        anchor: 0,
        label: Label::Start,
    };
    /// Calendar years starting in January (`YS`).
    pub const YEAR_START: Self = Self {
        unit: FreqUnit::Year,
        multiple: 1,
        anchor: 1,
        label: Label::Start,
    };

    const fn fixed(unit: FreqUnit) -> Self {
        Self {
            unit,
            multiple: 1,
            anchor: 0,
            label: Label::Start,
        }
    }

    /// Creates a frequency with the default anchor for `unit`.
    ///
    /// Weeks end on Sunday; quarters and years start in January.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidFrequency`] if `multiple` is zero or
    /// the step is longer than [`MAX_STEP_YEARS`].
    pub fn new(unit: FreqUnit, multiple: u32) -> Result<Self, CalendarError> {
        if multiple == 0 {
            return Err(CalendarError::InvalidFrequency {
                alias: format!("0{unit:?}"),
                reason: "multiple must be >= 1".to_string(),
            });
        }
        let n = i64::from(multiple);
        let too_long = match (unit.seconds(), unit.months()) {
            (Some(s), _) => s * n > MAX_STEP_YEARS * 366 * SECONDS_PER_DAY,
            (None, Some(m)) => m * n > MAX_STEP_YEARS * 12,
            (None, None) => false,
        };
        if too_long {
            return Err(CalendarError::InvalidFrequency {
                alias: format!("{multiple}{unit:?}"),
                reason: format!("step exceeds {MAX_STEP_YEARS} years"),
            });
        }
        let (anchor, label) = match unit {
            FreqUnit::Week => (6, Label::End),
            FreqUnit::Quarter | FreqUnit::Year => (1, Label::Start),
            _ => (0, Label::Start),
        };
        Ok(Self {
            unit,
            multiple,
            anchor,
            label,
        })
    }

    /// Sets the first month of quarterly or yearly periods.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] for a month outside 1..=12 and
    /// [`CalendarError::InvalidFrequency`] for units without a month anchor.
    pub fn with_start_month(mut self, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        if !matches!(self.unit, FreqUnit::Quarter | FreqUnit::Year) {
            return Err(CalendarError::InvalidFrequency {
                alias: self.to_string(),
                reason: "only quarterly and yearly frequencies take a month anchor".to_string(),
            });
        }
        self.anchor = month;
        Ok(self)
    }

    /// Sets the label side used when rendering the alias.
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    /// Returns the base unit.
    pub fn unit(&self) -> FreqUnit {
        self.unit
    }

    /// Returns the multiplier.
    pub fn multiple(&self) -> u32 {
        self.multiple
    }

    /// Returns the label side.
    pub fn label(&self) -> Label {
        self.label
    }

    /// First month of each period, for quarterly and yearly frequencies.
    pub fn start_month(&self) -> Option<u8> {
        matches!(self.unit, FreqUnit::Quarter | FreqUnit::Year).then_some(self.anchor)
    }

    /// Last weekday of each period (0 = Monday), for weekly frequencies.
    pub fn week_end(&self) -> Option<u8> {
        (self.unit == FreqUnit::Week).then_some(self.anchor)
    }

    /// Step length in seconds for fixed-length units.
    pub fn step_seconds(&self) -> Option<i64> {
        self.unit.seconds().map(|s| s * i64::from(self.multiple))
    }

    /// Step length in months for calendar units.
    pub fn step_months(&self) -> Option<i64> {
        self.unit.months().map(|m| m * i64::from(self.multiple))
    }

    /// Returns `true` for month, quarter and year units.
    pub fn is_calendar_based(&self) -> bool {
        self.unit.months().is_some()
    }

    /// Compares unit and step only; anchors and labels are ignored.
    ///
    /// `24H` and `D` have the same step, `QS` and `3MS` have the same step.
    pub fn same_step(&self, other: &Self) -> bool {
        match (self.step_seconds(), other.step_seconds()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.step_months() == other.step_months(),
            _ => false,
        }
    }

    /// Returns `true` if periods of `self` can hold at least one step of `base`.
    ///
    /// Calendar months count as 28 days when compared with fixed steps. A
    /// calendar-based `base` is only compatible with calendar-based targets.
    pub fn can_resample(&self, base: &Self) -> bool {
        match (
            self.step_seconds(),
            self.step_months(),
            base.step_seconds(),
            base.step_months(),
        ) {
            (Some(target), _, Some(step), _) => target >= step,
            (_, Some(target), _, Some(step)) => target >= step,
            (_, Some(target), Some(step), _) => target * 28 * SECONDS_PER_DAY >= step,
            _ => false,
        }
    }

    /// Start of the period containing `t`.
    ///
    /// Sub-daily and daily bins are counted from midnight of the day of `t`;
    /// weekly bins start the day after the anchor weekday; monthly bins start
    /// at the month of `t`; quarterly and yearly bins align on the anchor
    /// month.
    pub fn period_start(&self, calendar: Calendar, t: DateTime) -> DateTime {
        match self.unit {
            FreqUnit::Second | FreqUnit::Minute | FreqUnit::Hour | FreqUnit::Day => {
                let step = self.step_seconds().unwrap_or(SECONDS_PER_DAY);
                let origin = t.midnight().to_seconds(calendar);
                let offset = (t.to_seconds(calendar) - origin).div_euclid(step) * step;
                DateTime::from_seconds(calendar, origin + offset)
            }
            FreqUnit::Week => {
                let days = t.days(calendar);
                let first_weekday = (self.anchor + 1) % 7;
                let back = (i64::from(Calendar::weekday_from_days(days)) - i64::from(first_weekday))
                    .rem_euclid(7);
                DateTime::from_seconds(calendar, (days - back) * SECONDS_PER_DAY)
            }
            FreqUnit::Month => DateTime::month_start(t.month_index()),
            FreqUnit::Quarter | FreqUnit::Year => {
                let span = self.step_months().unwrap_or(12);
                let index = t.month_index();
                let offset = (index - (i64::from(self.anchor) - 1)).rem_euclid(span);
                DateTime::month_start(index - offset)
            }
        }
    }

    /// Start of the period following the one that starts at `start`.
    pub fn next_period(&self, calendar: Calendar, start: DateTime) -> DateTime {
        match (self.step_seconds(), self.step_months()) {
            (Some(step), _) => DateTime::from_seconds(calendar, start.to_seconds(calendar) + step),
            (None, Some(span)) => DateTime::month_start(start.month_index() + span),
            (None, None) => start,
        }
    }
}

fn parse_month(alias: &str, name: &str) -> Result<u8, CalendarError> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u8 + 1)
        .ok_or_else(|| CalendarError::InvalidFrequency {
            alias: alias.to_string(),
            reason: format!("unknown month anchor '{name}'"),
        })
}

fn parse_weekday(alias: &str, name: &str) -> Result<u8, CalendarError> {
    WEEKDAY_NAMES
        .iter()
        .position(|d| d.eq_ignore_ascii_case(name))
        .map(|i| i as u8)
        .ok_or_else(|| CalendarError::InvalidFrequency {
            alias: alias.to_string(),
            reason: format!("unknown weekday anchor '{name}'"),
        })
}

/// Month following `end_month`, wrapping December to January.
fn start_after(end_month: u8) -> u8 {
    end_month % 12 + 1
}

/// Month preceding `start_month`, wrapping January to December.
fn end_before(start_month: u8) -> u8 {
    (start_month + 10) % 12 + 1
}

impl FromStr for Frequency {
    type Err = CalendarError;

    fn from_str(alias: &str) -> Result<Self, Self::Err> {
        let s = alias.trim();
        let invalid = |reason: &str| CalendarError::InvalidFrequency {
            alias: alias.to_string(),
            reason: reason.to_string(),
        };

        let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let multiple: u32 = if digits == 0 {
            1
        } else {
            s[..digits]
                .parse()
                .map_err(|_| invalid("multiplier is not a valid integer"))?
        };
        if multiple == 0 {
            return Err(invalid("multiple must be >= 1"));
        }

        let rest = &s[digits..];
        if rest.is_empty() {
            return Err(invalid("missing unit"));
        }
        let (base, anchor) = match rest.split_once('-') {
            Some((b, a)) => (b, Some(a)),
            None => (rest, None),
        };

        let (unit, label) = match base {
            "S" | "s" => (FreqUnit::Second, Label::Start),
            "T" | "min" => (FreqUnit::Minute, Label::Start),
            "H" | "h" => (FreqUnit::Hour, Label::Start),
            "D" | "d" => (FreqUnit::Day, Label::Start),
            "W" => (FreqUnit::Week, Label::End),
            "M" | "ME" => (FreqUnit::Month, Label::End),
            "MS" => (FreqUnit::Month, Label::Start),
            "Q" | "QE" => (FreqUnit::Quarter, Label::End),
            "QS" => (FreqUnit::Quarter, Label::Start),
            "A" | "Y" | "YE" => (FreqUnit::Year, Label::End),
            "AS" | "YS" => (FreqUnit::Year, Label::Start),
            other => return Err(invalid(&format!("unknown unit '{other}'"))),
        };

        let mut freq = Self::new(unit, multiple)
            .map_err(|_| invalid(&format!("step exceeds {MAX_STEP_YEARS} years")))?
            .with_label(label);
        match (unit, anchor) {
            (_, None) => {}
            (FreqUnit::Week, Some(day)) => freq.anchor = parse_weekday(alias, day)?,
            (FreqUnit::Quarter | FreqUnit::Year, Some(month)) => {
                let month = parse_month(alias, month)?;
                freq.anchor = match label {
                    Label::Start => month,
                    Label::End => start_after(month),
                };
            }
            (_, Some(_)) => return Err(invalid("this unit does not take an anchor")),
        }
        Ok(freq)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiple > 1 {
            write!(f, "{}", self.multiple)?;
        }
        let month_name = |m: u8| MONTH_NAMES[usize::from(m - 1)];
        match (self.unit, self.label) {
            (FreqUnit::Second, _) => f.write_str("S"),
            (FreqUnit::Minute, _) => f.write_str("T"),
            (FreqUnit::Hour, _) => f.write_str("H"),
            (FreqUnit::Day, _) => f.write_str("D"),
            (FreqUnit::Week, _) => write!(f, "W-{}", WEEKDAY_NAMES[usize::from(self.anchor)]),
            (FreqUnit::Month, Label::Start) => f.write_str("MS"),
            (FreqUnit::Month, Label::End) => f.write_str("M"),
            (FreqUnit::Quarter, Label::Start) => write!(f, "QS-{}", month_name(self.anchor)),
            (FreqUnit::Quarter, Label::End) => {
                write!(f, "Q-{}", month_name(end_before(self.anchor)))
            }
            (FreqUnit::Year, Label::Start) => write!(f, "YS-{}", month_name(self.anchor)),
            (FreqUnit::Year, Label::End) => write!(f, "Y-{}", month_name(end_before(self.anchor))),
        }
    }
}
