//! Serializable coverage and indicator reports.

use serde::{Deserialize, Serialize};
use tethys_checks::PeriodCoverage;

/// Top-level report for one run over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// CF calendar of the input.
    pub calendar: String,
    /// Base frequency alias.
    pub base_freq: String,
    /// Target frequency alias.
    pub target_freq: String,
    /// Missingness policy name.
    pub policy: String,
    /// Boundary mode name.
    pub boundary: String,
    /// One entry per processed variable.
    pub variables: Vec<VariableReport>,
}

/// Results for one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableReport {
    /// Variable name in the input dataset.
    pub name: String,
    /// Indicator identifier, when an indicator was computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
    /// Output units, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// Number of masked periods.
    pub masked: usize,
    /// Per-period results, in chronological order.
    pub periods: Vec<PeriodReport>,
}

impl VariableReport {
    /// Creates a report, counting masked periods.
    pub fn new(name: impl Into<String>, periods: Vec<PeriodReport>) -> Self {
        let masked = periods.iter().filter(|p| p.missing).count();
        Self {
            name: name.into(),
            indicator: None,
            units: None,
            masked,
            periods,
        }
    }

    /// Records the indicator that produced the values.
    pub fn with_indicator(mut self, identifier: impl Into<String>, units: impl Into<String>) -> Self {
        self.indicator = Some(identifier.into());
        let units = units.into();
        self.units = (!units.is_empty()).then_some(units);
        self
    }
}

/// One period of a [`VariableReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// First instant of the period.
    pub start: String,
    /// First instant after the period.
    pub end: String,
    /// Expected base-frequency records.
    pub expected: usize,
    /// Records with a valid value.
    pub valid: usize,
    /// Missingness verdict.
    pub missing: bool,
    /// Reduced value; `null` when masked or not computed.
    pub value: Option<f64>,
}

impl PeriodReport {
    /// Builds a period entry from its coverage, verdict and reduced value.
    ///
    /// `NaN` values are stored as `None`.
    pub fn from_coverage(coverage: &PeriodCoverage, missing: bool, value: Option<f64>) -> Self {
        let period = coverage.period();
        let total = coverage.total();
        Self {
            start: period.start().to_string(),
            end: period.end().to_string(),
            expected: total.expected,
            valid: total.valid,
            missing,
            value: value.filter(|v| !v.is_nan()),
        }
    }
}
