//! Time-axis view and frequency inference.

use tethys_calendar::{Calendar, DateTime, FreqUnit, Frequency, Label, SECONDS_PER_DAY};

use crate::series::TimeSeries;

/// Spacing inferred from the timestamps of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredFrequency {
    /// Fewer than two timestamps: nothing to infer.
    Degenerate,
    /// No two distinct timestamps.
    Irregular,
    /// The minimal spacing between distinct timestamps.
    Regular(Frequency),
}

impl InferredFrequency {
    /// The inferred frequency, if any.
    pub fn frequency(&self) -> Option<Frequency> {
        match self {
            Self::Regular(freq) => Some(*freq),
            _ => None,
        }
    }
}

/// Timestamps of a series together with their absolute positions.
///
/// Absolute positions are seconds since 0001-01-01 in the axis calendar,
/// computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    calendar: Calendar,
    times: Vec<DateTime>,
    seconds: Vec<i64>,
}

impl TimeAxis {
    /// Builds an axis from timestamps in `calendar`.
    pub fn new(calendar: Calendar, times: &[DateTime]) -> Self {
        let seconds = times.iter().map(|t| t.to_seconds(calendar)).collect();
        Self {
            calendar,
            times: times.to_vec(),
            seconds,
        }
    }

    /// Builds the axis of `series`.
    pub fn from_series(series: &TimeSeries) -> Self {
        Self::new(series.calendar(), series.times())
    }

    /// Returns the calendar.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Returns the timestamps in input order.
    pub fn times(&self) -> &[DateTime] {
        &self.times
    }

    /// Returns the absolute positions in input order.
    pub fn seconds(&self) -> &[i64] {
        &self.seconds
    }

    /// Number of timestamps.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the axis has no timestamps.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Earliest and latest timestamps, or `None` for an empty axis.
    pub fn bounds(&self) -> Option<(DateTime, DateTime)> {
        let first = self.times.iter().min()?;
        let last = self.times.iter().max()?;
        Some((*first, *last))
    }

    /// Infers the sampling frequency from the minimal spacing.
    ///
    /// Timestamps that all share a day of month (clamped to the length of
    /// shorter months, or all on month ends) and a time of day are read as a monthly, quarterly or yearly series.
    /// Anything else is read as a fixed step expressed in the coarsest of
    /// days, hours, minutes or seconds that divides it.
    pub fn inferred_frequency(&self) -> InferredFrequency {
        if self.len() < 2 {
            return InferredFrequency::Degenerate;
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| self.seconds[i]);
        order.dedup_by_key(|i| self.seconds[*i]);
        if order.len() < 2 {
            return InferredFrequency::Irregular;
        }
        let sorted: Vec<DateTime> = order.iter().map(|&i| self.times[i]).collect();

        if let Some(freq) = self.infer_calendar_step(&sorted) {
            return InferredFrequency::Regular(freq);
        }

        let min_step = order
            .windows(2)
            .map(|w| self.seconds[w[1]] - self.seconds[w[0]])
            .min();
        match min_step.and_then(fixed_frequency) {
            Some(freq) => InferredFrequency::Regular(freq),
            None => InferredFrequency::Irregular,
        }
    }

    fn infer_calendar_step(&self, sorted: &[DateTime]) -> Option<Frequency> {
        let first = *sorted.first()?;
        let sod = first.seconds_of_day();
        if !sorted.iter().all(|t| t.seconds_of_day() == sod) {
            return None;
        }
        // Days past the end of a short month clamp to its last day.
        let anchor_day = sorted.iter().map(|t| t.day()).max()?;
        let same_day = sorted.iter().all(|t| {
            self.calendar
                .days_in_month(t.year(), t.month())
                .is_ok_and(|len| t.day() == anchor_day.min(len))
        });
        let month_end = sorted.iter().all(|t| t.is_month_end(self.calendar));
        if !same_day && !month_end {
            return None;
        }
        let label = if month_end && first.day() != 1 {
            Label::End
        } else {
            Label::Start
        };

        let months = sorted
            .windows(2)
            .map(|w| w[1].month_index() - w[0].month_index())
            .filter(|&m| m > 0)
            .min()?;
        let months = u32::try_from(months).ok()?;

        let freq = if months % 12 == 0 {
            Frequency::new(FreqUnit::Year, months / 12).ok()?
        } else if months % 3 == 0 {
            Frequency::new(FreqUnit::Quarter, months / 3).ok()?
        } else {
            return Some(Frequency::new(FreqUnit::Month, months).ok()?.with_label(label));
        };
        let start_month = match label {
            Label::Start => first.month(),
            Label::End => first.month() % 12 + 1,
        };
        Some(freq.with_start_month(start_month).ok()?.with_label(label))
    }
}

fn fixed_frequency(step: i64) -> Option<Frequency> {
    let (unit, size) = if step % SECONDS_PER_DAY == 0 {
        (FreqUnit::Day, SECONDS_PER_DAY)
    } else if step % 3600 == 0 {
        (FreqUnit::Hour, 3600)
    } else if step % 60 == 0 {
        (FreqUnit::Minute, 60)
    } else {
        (FreqUnit::Second, 1)
    };
    let multiple = u32::try_from(step / size).ok()?;
    Frequency::new(unit, multiple).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tethys_calendar::date_range;

    const G: Calendar = Calendar::ProlepticGregorian;

    fn d(y: i32, m: u8, day: u8) -> DateTime {
        DateTime::date(G, y, m, day).unwrap()
    }

    fn f(s: &str) -> Frequency {
        s.parse().unwrap()
    }

    fn infer(times: &[DateTime]) -> InferredFrequency {
        TimeAxis::new(G, times).inferred_frequency()
    }

    #[test]
    fn degenerate_and_irregular() {
        assert_eq!(infer(&[]), InferredFrequency::Degenerate);
        assert_eq!(infer(&[d(2000, 1, 1)]), InferredFrequency::Degenerate);
        assert_eq!(
            infer(&[d(2000, 1, 1), d(2000, 1, 1)]),
            InferredFrequency::Irregular
        );
    }

    #[test]
    fn daily_and_sub_daily() {
        let days = date_range(G, d(2000, 1, 1), &Frequency::DAILY, 10);
        assert_eq!(infer(&days), InferredFrequency::Regular(Frequency::DAILY));

        let halves = date_range(G, d(2000, 1, 1), &f("12H"), 10);
        assert_eq!(infer(&halves).frequency().unwrap().step_seconds(), Some(43_200));

        let quarter_hours = date_range(G, d(2000, 1, 1), &f("15min"), 10);
        assert_eq!(infer(&quarter_hours).frequency().unwrap().to_string(), "15T");
    }

    #[test]
    fn minimal_spacing_wins() {
        let times = [d(2000, 1, 1), d(2000, 1, 2), d(2000, 1, 5)];
        assert_eq!(infer(&times), InferredFrequency::Regular(Frequency::DAILY));
    }

    #[test]
    fn unordered_input_is_sorted_first() {
        let times = [d(2000, 1, 3), d(2000, 1, 1), d(2000, 1, 2)];
        assert_eq!(infer(&times), InferredFrequency::Regular(Frequency::DAILY));
    }

    #[test]
    fn monthly_start_and_end() {
        let ms = date_range(G, d(2000, 1, 1), &f("MS"), 6);
        assert_eq!(infer(&ms).frequency().unwrap().to_string(), "MS");

        let me = date_range(G, d(2000, 1, 31), &f("M"), 6);
        assert_eq!(infer(&me).frequency().unwrap().to_string(), "M");
    }

    #[test]
    fn quarterly_and_yearly_anchors() {
        let q = date_range(G, d(2000, 12, 1), &f("QS-DEC"), 4);
        assert_eq!(infer(&q).frequency().unwrap().to_string(), "QS-DEC");

        let wy = date_range(G, d(2000, 9, 30), &f("Y-SEP"), 3);
        assert_eq!(infer(&wy).frequency().unwrap().to_string(), "Y-SEP");
    }

    #[test]
    fn bounds_use_min_and_max() {
        let axis = TimeAxis::new(G, &[d(2000, 1, 3), d(2000, 1, 1), d(2000, 1, 2)]);
        assert_eq!(axis.bounds(), Some((d(2000, 1, 1), d(2000, 1, 3))));
        assert_eq!(TimeAxis::new(G, &[]).bounds(), None);
    }
}
