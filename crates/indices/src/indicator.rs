//! Indicator descriptors and their execution through the coverage checks.

use tethys_calendar::Frequency;
use tethys_checks::{CheckConfig, PeriodRecords, Resampled, TimeSeries, Validator, WholeSeries};
use tracing::info;

use crate::cf::{self, Attributes, Compliance};
use crate::error::IndicesError;

/// A reducer bound to one input series.
pub type Reducer = Box<dyn Fn(&PeriodRecords<'_>) -> f64 + Send + Sync>;

/// Builds a [`Reducer`], fixing any whole-series statistic it depends on.
pub type ReducerFactory = fn(&TimeSeries) -> Reducer;

/// How an indicator maps a series to output values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Computation {
    /// One value per period of `freq` (overridable per run).
    Resampling {
        /// Default resampling frequency.
        freq: Frequency,
    },
    /// One value for the whole series.
    Reducing,
}

/// Output of [`Indicator::compute`].
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutput {
    /// Per-period values of a resampling indicator.
    Periods(Resampled),
    /// Single value of a reducing indicator.
    Whole(WholeSeries),
}

impl IndicatorOutput {
    /// Number of masked outputs.
    pub fn masked(&self) -> usize {
        match self {
            Self::Periods(r) => r.missing().iter().filter(|m| **m).count(),
            Self::Whole(w) => usize::from(w.missing),
        }
    }
}

/// A named indicator: metadata, CF requirements and a reducer.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    pub(crate) identifier: &'static str,
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) units: &'static str,
    pub(crate) src_freq: Frequency,
    pub(crate) standard_name: Option<&'static str>,
    pub(crate) computation: Computation,
    pub(crate) reducer: ReducerFactory,
}

impl Indicator {
    /// Returns the identifier used for lookups and output names.
    pub fn identifier(&self) -> &'static str {
        self.identifier
    }

    /// Returns the human-readable title.
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Returns the one-line description.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the output units (empty for dimensionless).
    pub fn units(&self) -> &'static str {
        self.units
    }

    /// Returns the sampling frequency the input must have.
    pub fn src_freq(&self) -> &Frequency {
        &self.src_freq
    }

    /// Returns the CF `standard_name` the input must carry, if any.
    pub fn standard_name(&self) -> Option<&'static str> {
        self.standard_name
    }

    /// Returns the computation kind.
    pub fn computation(&self) -> Computation {
        self.computation
    }

    /// Checks the CF attributes of the input.
    ///
    /// # Errors
    ///
    /// Returns [`IndicesError::MissingAttribute`] or [`IndicesError::CfCheck`]
    /// when the `standard_name` does not match.
    pub fn cfcheck(&self, attrs: &Attributes) -> Result<(), IndicesError> {
        match self.standard_name {
            Some(expected) => cf::check_valid(attrs, "standard_name", expected),
            None => Ok(()),
        }
    }

    /// Default check configuration: source frequency as base, `freq` (or
    /// the indicator's own frequency) as target.
    pub fn check_config(&self, freq: Option<Frequency>) -> CheckConfig {
        let target = match (freq, self.computation) {
            (Some(f), _) => f,
            (None, Computation::Resampling { freq }) => freq,
            (None, Computation::Reducing) => Frequency::YEAR_START,
        };
        CheckConfig::new(self.src_freq, target)
    }

    /// Runs the CF check, the coverage checks and the reducer.
    ///
    /// # Errors
    ///
    /// - CF errors (see [`cfcheck`](Self::cfcheck)) under
    ///   [`Compliance::Raise`].
    /// - [`IndicesError::InvalidConfig`] if the base frequency of `config`
    ///   is not the indicator's source frequency.
    /// - [`IndicesError::Checks`] for invalid configuration or an
    ///   irregular time axis.
    pub fn compute(
        &self,
        series: &TimeSeries,
        attrs: &Attributes,
        config: &CheckConfig,
        compliance: Compliance,
    ) -> Result<IndicatorOutput, IndicesError> {
        cf::enforce(self.cfcheck(attrs), compliance)?;
        if !config.base().same_step(&self.src_freq) {
            return Err(IndicesError::InvalidConfig {
                reason: format!(
                    "{} needs '{}' input, configured base frequency is '{}'",
                    self.identifier,
                    self.src_freq,
                    config.base()
                ),
            });
        }

        let validator = Validator::new(config.clone())?;
        let reducer = (self.reducer)(series);
        let output = match self.computation {
            Computation::Resampling { .. } => IndicatorOutput::Periods(
                validator.compute(series, |r: &PeriodRecords<'_>| reducer(r))?,
            ),
            Computation::Reducing => IndicatorOutput::Whole(
                validator.reduce_whole(series, |r: &PeriodRecords<'_>| reducer(r))?,
            ),
        };
        info!(
            indicator = self.identifier,
            masked = output.masked(),
            "indicator computed"
        );
        Ok(output)
    }
}
