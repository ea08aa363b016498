//! Observed-versus-expected record counts per period.

use crate::expect::{Period, PeriodExpectation};
use crate::grid::BaseGrid;

/// Counts for one group of expected slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coverage {
    /// Base-frequency timestamps expected.
    pub expected: usize,
    /// Expected timestamps holding a non-missing value.
    pub valid: usize,
    /// Longest run of consecutive missing slots.
    pub longest_gap: usize,
}

impl Coverage {
    /// Builds counts from per-slot presence flags.
    pub fn from_presence(present: &[bool]) -> Self {
        let absent: Vec<bool> = present.iter().map(|p| !p).collect();
        Self {
            expected: present.len(),
            valid: present.iter().filter(|p| **p).count(),
            longest_gap: tethys_stats::longest_run(&absent),
        }
    }

    /// Expected slots without a valid value.
    pub fn missing(&self) -> usize {
        self.expected.saturating_sub(self.valid)
    }

    /// Fraction of expected slots that are missing; `1.0` when nothing is expected.
    pub fn missing_fraction(&self) -> f64 {
        if self.expected == 0 {
            1.0
        } else {
            self.missing() as f64 / self.expected as f64
        }
    }
}

/// Coverage of one target period, with an optional per-month breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodCoverage {
    period: Period,
    total: Coverage,
    months: Vec<Coverage>,
}

impl PeriodCoverage {
    /// Returns the target period.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Counts over the whole period.
    pub fn total(&self) -> Coverage {
        self.total
    }

    /// Counts per calendar month inside the period.
    ///
    /// Empty when the breakdown was not requested or when the base step is
    /// a month or longer.
    pub fn months(&self) -> &[Coverage] {
        &self.months
    }
}

/// Evaluates coverage of each expectation.
///
/// `present[k]` tells whether grid slot `k` (counted from the first record)
/// holds a valid value; slots outside `0..present.len()` are absent.
pub(crate) fn evaluate(
    grid: &BaseGrid,
    expectations: &[PeriodExpectation],
    present: &[bool],
    monthly: bool,
) -> Vec<PeriodCoverage> {
    expectations
        .iter()
        .map(|exp| {
            let flags: Vec<bool> = exp
                .slots()
                .map(|k| {
                    usize::try_from(k)
                        .ok()
                        .and_then(|k| present.get(k).copied())
                        .unwrap_or(false)
                })
                .collect();
            let months = if monthly {
                monthly_breakdown(grid, exp, &flags)
            } else {
                Vec::new()
            };
            PeriodCoverage {
                period: exp.period(),
                total: Coverage::from_presence(&flags),
                months,
            }
        })
        .collect()
}

fn monthly_breakdown(grid: &BaseGrid, exp: &PeriodExpectation, flags: &[bool]) -> Vec<Coverage> {
    let mut months = Vec::new();
    let mut current: Option<i64> = None;
    let mut group: Vec<bool> = Vec::new();
    for (k, &flag) in exp.slots().zip(flags) {
        let month = grid.time_at(k).month_index();
        if current != Some(month) && !group.is_empty() {
            months.push(Coverage::from_presence(&group));
            group.clear();
        }
        current = Some(month);
        group.push(flag);
    }
    if !group.is_empty() {
        months.push(Coverage::from_presence(&group));
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn coverage_counts() {
        let c = Coverage::from_presence(&[true, false, false, true, false]);
        assert_eq!(c.expected, 5);
        assert_eq!(c.valid, 2);
        assert_eq!(c.missing(), 3);
        assert_eq!(c.longest_gap, 2);
        assert_relative_eq!(c.missing_fraction(), 0.6);
    }

    #[test]
    fn empty_coverage_is_fully_missing() {
        let c = Coverage::default();
        assert_relative_eq!(c.missing_fraction(), 1.0);
        assert_eq!(c.missing(), 0);
    }
}
