//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus standalone helpers that check
//! the layout of a decoded dataset.

use crate::error::IoError;

/// Gathers every layout problem of a dataset before failing, so one read
/// reports all of them as a single [`IoError::Validation`].
#[derive(Debug, Default)]
pub(crate) struct ValidationCollector {
    messages: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.messages.len()
    }

    /// `Ok(())` when nothing was recorded, otherwise every message joined
    /// with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        match self.messages.len() {
            0 => Ok(()),
            count => Err(IoError::Validation {
                count,
                details: self.messages.join("; "),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that every variable has one value per timestamp.
pub(crate) fn validate_lengths<'a>(
    time_len: usize,
    variables: impl IntoIterator<Item = (&'a str, usize)>,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (name, len) in variables {
        if len != time_len {
            c.push(format!(
                "variable '{name}' has {len} values, time axis has {time_len}"
            ));
        }
    }
    c
}

/// Check that a fill value is a usable number.
pub(crate) fn validate_fill_value(name: &str, key: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("variable '{name}': {key} '{raw}' is not a number"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
