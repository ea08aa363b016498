//! JSON dataset reader configuration and orchestration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tethys_calendar::Calendar;
use tracing::{debug, info};

use crate::cf_time::{self, TimeUnits};
use crate::dataset::{Dataset, Variable};
use crate::error::IoError;
use crate::validate::{ValidationCollector, validate_fill_value, validate_lengths};

/// Attributes whose numeric value marks missing data.
const FILL_ATTRS: [&str; 2] = ["_FillValue", "missing_value"];

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading JSON datasets.
///
/// The [`Default`] implementation reads every variable, assumes the CF
/// default calendar (`standard`) when the file names none, and masks fill
/// values.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Calendar used when the file has no `calendar` entry.
    default_calendar: Calendar,
    /// Variables to keep, or `None` for all.
    variables: Option<Vec<String>>,
    /// Whether `_FillValue` / `missing_value` entries become `NaN`.
    mask_fill_values: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            default_calendar: Calendar::ProlepticGregorian,
            variables: None,
            mask_fill_values: true,
        }
    }
}

impl ReaderConfig {
    /// Set the calendar assumed when the file names none.
    pub fn with_default_calendar(mut self, calendar: Calendar) -> Self {
        self.default_calendar = calendar;
        self
    }

    /// Keep only the named variables.
    pub fn with_variables<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.variables = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable fill-value masking.
    pub fn with_mask_fill_values(mut self, mask: bool) -> Self {
        self.mask_fill_values = mask;
        self
    }

    /// Returns the fallback calendar.
    pub fn default_calendar(&self) -> Calendar {
        self.default_calendar
    }

    /// Returns the variable selection.
    pub fn variables(&self) -> Option<&[String]> {
        self.variables.as_deref()
    }

    /// Returns whether fill values are masked.
    pub fn mask_fill_values(&self) -> bool {
        self.mask_fill_values
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the variable selection is empty or
    /// contains blank names.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if let Some(names) = &self.variables {
            if names.is_empty() {
                c.push("variable selection is empty");
            }
            if names.iter().any(|n| n.trim().is_empty()) {
                c.push("variable selection contains a blank name");
            }
        }
        c.finish()
    }
}

// ---------------------------------------------------------------------------
// Raw JSON layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDataset {
    #[serde(default)]
    calendar: Option<String>,
    time: RawTime,
    variables: BTreeMap<String, RawVariable>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTime {
    Encoded { units: String, values: Vec<f64> },
    Iso(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVariable {
    values: Vec<Option<f64>>,
    #[serde(default)]
    attrs: BTreeMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// read_json / parse_json
// ---------------------------------------------------------------------------

/// Read a dataset from a JSON file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] or [`IoError::Read`] for file access
/// problems, and the errors of [`parse_json`] otherwise.
pub fn read_json(path: &Path, config: &ReaderConfig) -> Result<Dataset, IoError> {
    config.validate()?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read dataset file");
    parse_json(&text, config)
}

/// Decode a dataset from JSON text.
///
/// The time axis is either `{"units": "<unit> since <date>", "values": [...]}`
/// or a list of ISO timestamps. `null` values and values equal to a
/// variable's `_FillValue` or `missing_value` become `NaN`.
///
/// # Errors
///
/// - [`IoError::Json`] for malformed JSON.
/// - [`IoError::Calendar`] for an unknown calendar or a bad ISO timestamp.
/// - [`IoError::InvalidTime`] for bad CF time units or offsets.
/// - [`IoError::MissingVariable`] for a selected variable that is absent.
/// - [`IoError::Validation`] for length mismatches or non-numeric fill values.
pub fn parse_json(text: &str, config: &ReaderConfig) -> Result<Dataset, IoError> {
    config.validate()?;
    let raw: RawDataset = serde_json::from_str(text)?;

    let calendar = match &raw.calendar {
        Some(name) => name.parse::<Calendar>()?,
        None => config.default_calendar,
    };

    let times = match &raw.time {
        RawTime::Encoded { units, values } => {
            TimeUnits::parse(units, calendar)?.decode(calendar, values)?
        }
        RawTime::Iso(strings) => cf_time::parse_iso(calendar, strings)?,
    };

    let mut raw_vars = raw.variables;
    if let Some(names) = &config.variables {
        let mut selected = BTreeMap::new();
        for name in names {
            let var = raw_vars
                .remove(name)
                .ok_or_else(|| IoError::MissingVariable { name: name.clone() })?;
            selected.insert(name.clone(), var);
        }
        raw_vars = selected;
    }

    validate_lengths(
        times.len(),
        raw_vars.iter().map(|(n, v)| (n.as_str(), v.values.len())),
    )
    .finish()?;

    let mut c = ValidationCollector::new();
    let mut variables = BTreeMap::new();
    for (name, raw_var) in raw_vars {
        let attrs: BTreeMap<String, String> = raw_var
            .attrs
            .into_iter()
            .map(|(k, v)| {
                let s = match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, s)
            })
            .collect();

        let mut fills = Vec::new();
        if config.mask_fill_values {
            for key in FILL_ATTRS {
                if let Some(raw) = attrs.get(key) {
                    match validate_fill_value(&name, key, raw) {
                        Ok(v) => fills.push(v),
                        Err(msg) => c.push(msg),
                    }
                }
            }
        }

        let values = raw_var
            .values
            .into_iter()
            .map(|v| match v {
                Some(x) if !fills.contains(&x) => x,
                _ => f64::NAN,
            })
            .collect();
        variables.insert(name, Variable { values, attrs });
    }
    c.finish()?;

    info!(
        calendar = %calendar,
        n_times = times.len(),
        n_variables = variables.len(),
        "dataset decoded"
    );
    Ok(Dataset {
        calendar,
        times,
        variables,
    })
}
