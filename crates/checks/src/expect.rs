//! Target-period partition and expected record counts.

use std::fmt;
use std::ops::Range;

use tethys_calendar::{DateTime, Frequency};

use crate::axis::TimeAxis;
use crate::error::{ChecksError, FrequencyError};
use crate::grid::BaseGrid;

/// How periods cut by the start or end of a series are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryMode {
    /// Boundary periods expect their full calendar length, so a partial
    /// first or last period is missing under any strict policy.
    #[default]
    Full,
    /// Only slots between the first and last timestamp are expected.
    Clipped,
}

impl BoundaryMode {
    /// Configuration name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Clipped => "clipped",
        }
    }
}

impl std::str::FromStr for BoundaryMode {
    type Err = ChecksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "clipped" | "clip" => Ok(Self::Clipped),
            other => Err(ChecksError::InvalidConfig {
                reason: format!("unknown boundary mode '{other}' (expected 'full' or 'clipped')"),
            }),
        }
    }
}

/// A half-open interval `[start, end)` of the target frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start: DateTime,
    end: DateTime,
}

impl Period {
    /// Returns the first instant of the period.
    pub fn start(&self) -> DateTime {
        self.start
    }

    /// Returns the first instant after the period.
    pub fn end(&self) -> DateTime {
        self.end
    }

    /// Returns `true` if `t` falls inside the period.
    pub fn contains(&self, t: DateTime) -> bool {
        self.start <= t && t < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Expected base-frequency slots of one target period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodExpectation {
    period: Period,
    slots: Range<i64>,
    span: Option<(DateTime, DateTime)>,
}

impl PeriodExpectation {
    /// Returns the target period.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Number of base-frequency timestamps expected in the period.
    pub fn expected(&self) -> usize {
        usize::try_from(self.slots.end - self.slots.start).unwrap_or(0)
    }

    /// First and last expected timestamps, or `None` when nothing is expected.
    pub fn expected_span(&self) -> Option<(DateTime, DateTime)> {
        self.span
    }

    /// Grid slots of the period, relative to the first record of the series.
    pub(crate) fn slots(&self) -> Range<i64> {
        self.slots.clone()
    }
}

/// Partitions the span of `axis` into consecutive periods of `target`.
///
/// The first period contains the earliest timestamp and the last contains
/// the latest. Periods are contiguous and non-overlapping.
pub fn partition(axis: &TimeAxis, target: &Frequency) -> Vec<Period> {
    let Some((first, last)) = axis.bounds() else {
        return Vec::new();
    };
    let calendar = axis.calendar();

    let mut periods = Vec::new();
    let mut start = target.period_start(calendar, first);
    while start <= last {
        let end = target.next_period(calendar, start);
        if end <= start {
            break;
        }
        periods.push(Period { start, end });
        start = end;
    }
    periods
}

/// Computes how many `base` timestamps each `target` period should hold.
///
/// The base grid is anchored at the first timestamp of `axis` and extended
/// across every period, so with [`BoundaryMode::Full`] the first and last
/// periods are judged against their full length. Periods that contain no
/// grid slot expect zero records.
///
/// # Errors
///
/// - [`ChecksError::InvalidConfig`] if `target` is finer than `base`.
/// - [`FrequencyError::OffGrid`] if the last timestamp is not on the grid.
pub fn expected_counts(
    axis: &TimeAxis,
    target: &Frequency,
    base: &Frequency,
    boundary: BoundaryMode,
) -> Result<Vec<PeriodExpectation>, ChecksError> {
    if !target.can_resample(base) {
        return Err(ChecksError::InvalidConfig {
            reason: format!("target frequency '{target}' is finer than base frequency '{base}'"),
        });
    }
    let Some((first, last)) = axis.bounds() else {
        return Ok(Vec::new());
    };
    let grid = BaseGrid::new(axis.calendar(), first, base)?;
    let n_slots = grid
        .slot_of(last)
        .ok_or_else(|| FrequencyError::OffGrid {
            date: last.to_string(),
            freq: base.to_string(),
            origin: first.to_string(),
        })?
        + 1;

    Ok(partition(axis, target)
        .into_iter()
        .map(|period| {
            let mut slots = grid.slots_in(period.start, period.end);
            if boundary == BoundaryMode::Clipped {
                let lo = slots.start.max(0);
                slots = lo..slots.end.min(n_slots).max(lo);
            }
            let span = (!slots.is_empty())
                .then(|| (grid.time_at(slots.start), grid.time_at(slots.end - 1)));
            PeriodExpectation {
                period,
                slots,
                span,
            }
        })
        .collect())
}

/// Expectation covering the whole series as a single period.
pub(crate) fn whole_series(
    axis: &TimeAxis,
    base: &Frequency,
) -> Result<Option<PeriodExpectation>, ChecksError> {
    let Some((first, last)) = axis.bounds() else {
        return Ok(None);
    };
    let grid = BaseGrid::new(axis.calendar(), first, base)?;
    let n_slots = grid.slot_of(last).ok_or_else(|| FrequencyError::OffGrid {
        date: last.to_string(),
        freq: base.to_string(),
        origin: first.to_string(),
    })? + 1;
    Ok(Some(PeriodExpectation {
        period: Period {
            start: first,
            end: grid.time_at(n_slots),
        },
        slots: 0..n_slots,
        span: Some((first, last)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tethys_calendar::{Calendar, date_range};

    const G: Calendar = Calendar::ProlepticGregorian;

    fn d(y: i32, m: u8, day: u8) -> DateTime {
        DateTime::date(G, y, m, day).unwrap()
    }

    fn f(s: &str) -> Frequency {
        s.parse().unwrap()
    }

    fn daily_axis(start: DateTime, n: usize) -> TimeAxis {
        TimeAxis::new(G, &date_range(G, start, &Frequency::DAILY, n))
    }

    fn counts(axis: &TimeAxis, target: &str, boundary: BoundaryMode) -> Vec<usize> {
        expected_counts(axis, &f(target), &Frequency::DAILY, boundary)
            .unwrap()
            .iter()
            .map(PeriodExpectation::expected)
            .collect()
    }

    #[test]
    fn monthly_full_lengths() {
        let axis = daily_axis(d(2001, 12, 30), 66);
        assert_eq!(counts(&axis, "MS", BoundaryMode::Full), vec![31, 31, 28, 31]);
        assert_eq!(counts(&axis, "MS", BoundaryMode::Clipped), vec![2, 31, 28, 5]);
    }

    #[test]
    fn leap_february_and_calendars() {
        let axis = daily_axis(d(2000, 1, 1), 90);
        assert_eq!(counts(&axis, "MS", BoundaryMode::Full)[1], 29);

        let noleap = Calendar::NoLeap;
        let start = DateTime::date(noleap, 2000, 1, 1).unwrap();
        let axis = TimeAxis::new(noleap, &date_range(noleap, start, &Frequency::DAILY, 90));
        let feb = &expected_counts(&axis, &f("MS"), &Frequency::DAILY, BoundaryMode::Full).unwrap()[1];
        assert_eq!(feb.expected(), 28);
    }

    #[test]
    fn anchored_quarters() {
        let axis = daily_axis(d(2001, 12, 31), 378);
        assert_eq!(
            counts(&axis, "Q-NOV", BoundaryMode::Full),
            vec![90, 92, 92, 91, 90]
        );
    }

    #[test]
    fn partition_is_contiguous_and_covers_bounds() {
        let axis = daily_axis(d(2001, 12, 31), 378);
        let periods = partition(&axis, &f("YS"));
        assert_eq!(periods.len(), 3);
        assert!(periods[0].contains(d(2001, 12, 31)));
        assert!(periods[2].contains(d(2003, 1, 12)));
        for w in periods.windows(2) {
            assert_eq!(w[0].end(), w[1].start());
        }
    }

    #[test]
    fn clipped_spans_reconstruct_bounds() {
        let axis = daily_axis(d(2001, 12, 30), 66);
        let exp = expected_counts(&axis, &f("MS"), &Frequency::DAILY, BoundaryMode::Clipped).unwrap();
        assert_eq!(exp[0].expected_span().unwrap().0, d(2001, 12, 30));
        assert_eq!(exp[3].expected_span().unwrap().1, d(2002, 3, 5));
        let total: usize = exp.iter().map(PeriodExpectation::expected).sum();
        assert_eq!(total, 66);
    }

    #[test]
    fn monthly_base_into_years() {
        let ms = f("MS");
        let axis = TimeAxis::new(G, &date_range(G, d(2000, 7, 1), &ms, 12));
        let exp = expected_counts(&axis, &f("YS"), &ms, BoundaryMode::Full).unwrap();
        assert_eq!(exp.len(), 2);
        assert_eq!(exp[0].expected(), 12);
        assert_eq!(exp[1].expected(), 12);
    }

    #[test]
    fn target_finer_than_base_rejected() {
        let axis = daily_axis(d(2000, 1, 1), 10);
        assert!(matches!(
            expected_counts(&axis, &f("H"), &Frequency::DAILY, BoundaryMode::Full),
            Err(ChecksError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn empty_axis_has_no_periods() {
        let axis = TimeAxis::new(G, &[]);
        assert!(
            expected_counts(&axis, &f("MS"), &Frequency::DAILY, BoundaryMode::Full)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn boundary_mode_parse() {
        assert_eq!("full".parse::<BoundaryMode>().unwrap(), BoundaryMode::Full);
        assert_eq!("Clipped".parse::<BoundaryMode>().unwrap(), BoundaryMode::Clipped);
        assert!("partial".parse::<BoundaryMode>().is_err());
    }
}
