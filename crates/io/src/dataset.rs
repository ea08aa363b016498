//! Decoded dataset: one time axis shared by named variables.

use std::collections::BTreeMap;

use tethys_calendar::{Calendar, DateTime};
use tethys_checks::TimeSeries;

use crate::error::IoError;

/// One variable of a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub(crate) values: Vec<f64>,
    pub(crate) attrs: BTreeMap<String, String>,
}

impl Variable {
    /// Values aligned with the dataset time axis; `NaN` where missing.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// CF attributes, rendered as strings.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Shortcut for the `units` attribute.
    pub fn units(&self) -> Option<&str> {
        self.attrs.get("units").map(String::as_str)
    }

    /// Number of non-missing values.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// A time axis in one calendar and the variables defined on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub(crate) calendar: Calendar,
    pub(crate) times: Vec<DateTime>,
    pub(crate) variables: BTreeMap<String, Variable>,
}

impl Dataset {
    /// Returns the calendar of the time axis.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Returns the decoded timestamps.
    pub fn times(&self) -> &[DateTime] {
        &self.times
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Looks up a variable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if `name` is absent.
    pub fn variable(&self, name: &str) -> Result<&Variable, IoError> {
        self.variables.get(name).ok_or_else(|| IoError::MissingVariable {
            name: name.to_string(),
        })
    }

    /// Builds the time series of one variable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingVariable`] if `name` is absent.
    pub fn series(&self, name: &str) -> Result<TimeSeries, IoError> {
        let var = self.variable(name)?;
        TimeSeries::new(self.calendar, self.times.clone(), var.values.clone()).map_err(|e| {
            IoError::Validation {
                count: 1,
                details: format!("variable '{name}': {e}"),
            }
        })
    }
}
