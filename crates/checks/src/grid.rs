//! Base-frequency grid anchored at the first timestamp of a series.
//!
//! Slot `k` sits at `origin + k * step` for fixed steps and at
//! `origin` shifted by `k * step` months for calendar steps. Slots may be
//! negative or lie beyond the last record; the grid extends both ways.

use std::ops::Range;

use tethys_calendar::{Calendar, DateTime, Frequency};

use crate::error::ChecksError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Seconds(i64),
    Months(i64),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct BaseGrid {
    calendar: Calendar,
    origin: DateTime,
    origin_seconds: i64,
    step: Step,
}

impl BaseGrid {
    pub(crate) fn new(
        calendar: Calendar,
        origin: DateTime,
        base: &Frequency,
    ) -> Result<Self, ChecksError> {
        let step = match (base.step_seconds(), base.step_months()) {
            (Some(s), _) if s > 0 => Step::Seconds(s),
            (None, Some(m)) if m > 0 => Step::Months(m),
            _ => {
                return Err(ChecksError::InvalidConfig {
                    reason: format!("base frequency '{base}' has no positive step"),
                });
            }
        };
        Ok(Self {
            calendar,
            origin,
            origin_seconds: origin.to_seconds(calendar),
            step,
        })
    }

    /// Slot index of `t`, or `None` when `t` is not on the grid.
    pub(crate) fn slot_of(&self, t: DateTime) -> Option<i64> {
        match self.step {
            Step::Seconds(step) => {
                let offset = t.to_seconds(self.calendar) - self.origin_seconds;
                (offset.rem_euclid(step) == 0).then(|| offset.div_euclid(step))
            }
            Step::Months(step) => {
                let months = t.month_index() - self.origin.month_index();
                if months.rem_euclid(step) != 0 {
                    return None;
                }
                let k = months.div_euclid(step);
                (self.time_at(k) == t).then_some(k)
            }
        }
    }

    /// Timestamp of slot `k`.
    pub(crate) fn time_at(&self, k: i64) -> DateTime {
        match self.step {
            Step::Seconds(step) => DateTime::from_seconds(self.calendar, self.origin_seconds + k * step),
            Step::Months(step) => self.origin.shift_months(self.calendar, k * step),
        }
    }

    /// Slots whose timestamps fall in `[start, end)`.
    ///
    /// For calendar steps `start` and `end` must be month starts.
    pub(crate) fn slots_in(&self, start: DateTime, end: DateTime) -> Range<i64> {
        match self.step {
            Step::Seconds(step) => {
                let lo = ceil_div(start.to_seconds(self.calendar) - self.origin_seconds, step);
                let hi = ceil_div(end.to_seconds(self.calendar) - self.origin_seconds, step);
                lo..hi.max(lo)
            }
            Step::Months(step) => {
                let origin = self.origin.month_index();
                let lo = ceil_div(start.month_index() - origin, step);
                let hi = ceil_div(end.month_index() - origin, step);
                lo..hi.max(lo)
            }
        }
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -((-a).div_euclid(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: Calendar = Calendar::ProlepticGregorian;

    fn d(y: i32, m: u8, day: u8) -> DateTime {
        DateTime::date(G, y, m, day).unwrap()
    }

    #[test]
    fn ceil_div_signs() {
        assert_eq!(ceil_div(5, 2), 3);
        assert_eq!(ceil_div(4, 2), 2);
        assert_eq!(ceil_div(-5, 2), -2);
        assert_eq!(ceil_div(0, 7), 0);
    }

    #[test]
    fn daily_slots() {
        let grid = BaseGrid::new(G, d(2001, 12, 30), &Frequency::DAILY).unwrap();
        assert_eq!(grid.slot_of(d(2001, 12, 30)), Some(0));
        assert_eq!(grid.slot_of(d(2002, 1, 1)), Some(2));
        assert_eq!(grid.slot_of(DateTime::new(G, 2002, 1, 1, 6, 0, 0).unwrap()), None);
        assert_eq!(grid.slots_in(d(2001, 12, 1), d(2002, 1, 1)), -29..2);
        assert_eq!(grid.time_at(-29), d(2001, 12, 1));
    }

    #[test]
    fn sub_daily_origin_offsets_slots() {
        let origin = DateTime::new(G, 2000, 1, 1, 6, 0, 0).unwrap();
        let grid = BaseGrid::new(G, origin, &"12H".parse().unwrap()).unwrap();
        // 06:00 and 18:00 of Jan 1 fall in the day.
        assert_eq!(grid.slots_in(d(2000, 1, 1), d(2000, 1, 2)), 0..2);
    }

    #[test]
    fn monthly_slots() {
        let grid = BaseGrid::new(G, d(2000, 1, 31), &"M".parse().unwrap()).unwrap();
        assert_eq!(grid.slot_of(d(2000, 2, 29)), Some(1));
        assert_eq!(grid.slot_of(d(2000, 2, 28)), None);
        assert_eq!(grid.slots_in(d(2000, 1, 1), d(2001, 1, 1)), 0..12);
    }
}
