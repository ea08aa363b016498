//! End-to-end pipeline: validate frequency, expect, count, mask, reduce.

use tethys_calendar::{Calendar, DateTime};
use tracing::debug;

use crate::axis::TimeAxis;
use crate::config::CheckConfig;
use crate::coverage::{self, PeriodCoverage};
use crate::error::ChecksError;
use crate::expect::{self, Period, PeriodExpectation};
use crate::grid::BaseGrid;
use crate::series::TimeSeries;
use crate::validate::validate_frequency;

/// Records of one target period, handed to a reducer.
#[derive(Debug, Clone, Copy)]
pub struct PeriodRecords<'a> {
    period: Period,
    calendar: Calendar,
    times: &'a [DateTime],
    values: &'a [f64],
}

impl<'a> PeriodRecords<'a> {
    /// Returns the target period.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns the series calendar.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Timestamps inside the period.
    pub fn times(&self) -> &'a [DateTime] {
        self.times
    }

    /// Values inside the period, `NaN` where missing.
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Non-missing values.
    pub fn valid(&self) -> impl Iterator<Item = f64> + 'a {
        self.values.iter().copied().filter(|v| !v.is_nan())
    }

    /// Returns `true` if no record falls inside the period.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-period output of [`Validator::compute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    coverage: Vec<PeriodCoverage>,
    values: Vec<f64>,
    missing: Vec<bool>,
}

impl Resampled {
    /// Number of periods.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no periods.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reduced values; `NaN` for masked periods.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Missingness verdict per period.
    pub fn missing(&self) -> &[bool] {
        &self.missing
    }

    /// Coverage per period.
    pub fn coverage(&self) -> &[PeriodCoverage] {
        &self.coverage
    }

    /// Iterates `(period, value, missing)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (Period, f64, bool)> + '_ {
        self.coverage
            .iter()
            .zip(&self.values)
            .zip(&self.missing)
            .map(|((c, v), m)| (c.period(), *v, *m))
    }
}

/// Output of [`Validator::reduce_whole`].
#[derive(Debug, Clone, PartialEq)]
pub struct WholeSeries {
    /// Reduced value; `NaN` when masked.
    pub value: f64,
    /// Missingness verdict for the series span.
    pub missing: bool,
    /// Coverage over the series span.
    pub coverage: PeriodCoverage,
}

/// Validates series against a [`CheckConfig`] and applies missingness masks.
///
/// # Example
///
/// ```
/// use tethys_calendar::{Calendar, DateTime, Frequency};
/// use tethys_checks::{CheckConfig, TimeSeries, Validator};
///
/// let cal = Calendar::ProlepticGregorian;
/// let start = DateTime::date(cal, 2001, 12, 30).unwrap();
/// let series = TimeSeries::regular(cal, start, &Frequency::DAILY, vec![1.0; 66]);
///
/// let validator = Validator::new(CheckConfig::new(Frequency::DAILY, "MS".parse().unwrap())).unwrap();
/// assert_eq!(validator.missing_mask(&series).unwrap(), vec![true, false, false, true]);
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    config: CheckConfig,
}

struct Evaluation {
    coverage: Vec<PeriodCoverage>,
    missing: Vec<bool>,
    /// Record index range of each period.
    records: Vec<std::ops::Range<usize>>,
}

impl Validator {
    /// Creates a validator, rejecting an invalid configuration up front.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksError::InvalidConfig`] if the configuration fails
    /// [`CheckConfig::validate`].
    pub fn new(config: CheckConfig) -> Result<Self, ChecksError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Checks length and frequency regularity of `series`.
    ///
    /// # Errors
    ///
    /// - [`ChecksError::EmptySeries`] for an empty series.
    /// - [`ChecksError::InsufficientData`] below `min_records`.
    /// - [`ChecksError::Frequency`] if the axis is irregular.
    pub fn check_frequency(&self, series: &TimeSeries) -> Result<TimeAxis, ChecksError> {
        if series.is_empty() {
            return Err(ChecksError::EmptySeries);
        }
        if series.len() < self.config.min_records() {
            return Err(ChecksError::InsufficientData {
                n: series.len(),
                min: self.config.min_records(),
            });
        }
        let axis = TimeAxis::from_series(series);
        validate_frequency(&axis, self.config.base())?;
        Ok(axis)
    }

    /// Expected record counts per target period.
    pub fn expectations(&self, series: &TimeSeries) -> Result<Vec<PeriodExpectation>, ChecksError> {
        let axis = self.check_frequency(series)?;
        expect::expected_counts(
            &axis,
            self.config.target(),
            self.config.base(),
            self.config.boundary(),
        )
    }

    /// Coverage per target period.
    pub fn coverage(&self, series: &TimeSeries) -> Result<Vec<PeriodCoverage>, ChecksError> {
        Ok(self.evaluate(series)?.coverage)
    }

    /// Missingness verdict per target period (`true` = masked).
    pub fn missing_mask(&self, series: &TimeSeries) -> Result<Vec<bool>, ChecksError> {
        Ok(self.evaluate(series)?.missing)
    }

    /// Reduces each target period with `reducer` and masks missing periods.
    ///
    /// `reducer` only runs for periods that pass the missingness policy;
    /// masked periods hold `NaN`.
    #[tracing::instrument(skip_all, fields(n = series.len(), target = %self.config.target()))]
    pub fn compute<F>(&self, series: &TimeSeries, reducer: F) -> Result<Resampled, ChecksError>
    where
        F: Fn(&PeriodRecords<'_>) -> f64,
    {
        let eval = self.evaluate(series)?;
        let values = eval
            .coverage
            .iter()
            .zip(&eval.records)
            .zip(&eval.missing)
            .map(|((cov, range), &missing)| {
                if missing {
                    return f64::NAN;
                }
                reducer(&PeriodRecords {
                    period: cov.period(),
                    calendar: series.calendar(),
                    times: &series.times()[range.clone()],
                    values: &series.values()[range.clone()],
                })
            })
            .collect();
        Ok(Resampled {
            coverage: eval.coverage,
            values,
            missing: eval.missing,
        })
    }

    /// Reduces the whole series to one value, masked by the policy.
    ///
    /// The series span (first to last record) is treated as a single period.
    pub fn reduce_whole<F>(&self, series: &TimeSeries, reducer: F) -> Result<WholeSeries, ChecksError>
    where
        F: Fn(&PeriodRecords<'_>) -> f64,
    {
        let axis = self.check_frequency(series)?;
        let Some(whole) = expect::whole_series(&axis, self.config.base())? else {
            return Err(ChecksError::EmptySeries);
        };
        let (first, _) = axis.bounds().ok_or(ChecksError::EmptySeries)?;
        let grid = BaseGrid::new(axis.calendar(), first, self.config.base())?;
        let present = presence(series);
        let monthly = self.monthly_breakdown();
        let coverage = coverage::evaluate(&grid, std::slice::from_ref(&whole), &present, monthly)
            .pop()
            .ok_or(ChecksError::EmptySeries)?;
        let missing = self.config.policy().is_missing(&coverage);
        let value = if missing {
            f64::NAN
        } else {
            reducer(&PeriodRecords {
                period: whole.period(),
                calendar: series.calendar(),
                times: series.times(),
                values: series.values(),
            })
        };
        Ok(WholeSeries {
            value,
            missing,
            coverage,
        })
    }

    fn monthly_breakdown(&self) -> bool {
        self.config.policy().needs_monthly_breakdown() && !self.config.base().is_calendar_based()
    }

    fn evaluate(&self, series: &TimeSeries) -> Result<Evaluation, ChecksError> {
        let axis = self.check_frequency(series)?;
        let expectations = expect::expected_counts(
            &axis,
            self.config.target(),
            self.config.base(),
            self.config.boundary(),
        )?;
        let (first, _) = axis.bounds().ok_or(ChecksError::EmptySeries)?;
        let grid = BaseGrid::new(axis.calendar(), first, self.config.base())?;

        // A validated axis is strictly increasing with one step between
        // records, so record `i` occupies grid slot `i`.
        let present = presence(series);
        let coverage = coverage::evaluate(&grid, &expectations, &present, self.monthly_breakdown());
        let missing: Vec<bool> = coverage
            .iter()
            .map(|c| self.config.policy().is_missing(c))
            .collect();
        let n = series.len() as i64;
        let records = expectations
            .iter()
            .map(|e| {
                let (lo, hi) = record_bounds(e, &grid, n);
                lo..hi
            })
            .collect();

        debug!(
            n_periods = coverage.len(),
            n_missing = missing.iter().filter(|m| **m).count(),
            policy = self.config.policy().name(),
            "coverage evaluated"
        );
        Ok(Evaluation {
            coverage,
            missing,
            records,
        })
    }
}

fn presence(series: &TimeSeries) -> Vec<bool> {
    series.values().iter().map(|v| !v.is_nan()).collect()
}

/// Record index range falling inside the period of `exp`.
fn record_bounds(exp: &PeriodExpectation, grid: &BaseGrid, n: i64) -> (usize, usize) {
    let period = exp.period();
    let slots = grid.slots_in(period.start(), period.end());
    let lo = slots.start.clamp(0, n);
    let hi = slots.end.clamp(lo, n);
    (lo as usize, hi as usize)
}
