//! CF metadata checks run before an indicator computes.

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::warn;

use crate::error::IndicesError;

/// CF attributes of a variable, keyed by attribute name.
pub type Attributes = BTreeMap<String, String>;

/// What to do when a CF check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compliance {
    /// Fail the computation.
    #[default]
    Raise,
    /// Log a warning and carry on.
    Warn,
}

impl FromStr for Compliance {
    type Err = IndicesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raise" => Ok(Self::Raise),
            "warn" => Ok(Self::Warn),
            other => Err(IndicesError::InvalidConfig {
                reason: format!("unknown cf compliance '{other}' (expected 'raise' or 'warn')"),
            }),
        }
    }
}

/// Checks that attribute `key` equals `expected`.
///
/// A trailing `*` in `expected` matches any suffix.
///
/// # Errors
///
/// - [`IndicesError::MissingAttribute`] if `key` is absent.
/// - [`IndicesError::CfCheck`] if the value does not match.
pub fn check_valid(attrs: &Attributes, key: &str, expected: &str) -> Result<(), IndicesError> {
    let Some(found) = attrs.get(key) else {
        return Err(IndicesError::MissingAttribute {
            key: key.to_string(),
        });
    };
    let matches = match expected.strip_suffix('*') {
        Some(prefix) => found.starts_with(prefix),
        None => found == expected,
    };
    if matches {
        Ok(())
    } else {
        Err(IndicesError::CfCheck {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.clone(),
        })
    }
}

/// Applies `compliance` to the outcome of a check.
pub(crate) fn enforce(
    result: Result<(), IndicesError>,
    compliance: Compliance,
) -> Result<(), IndicesError> {
    match (result, compliance) {
        (Err(e), Compliance::Warn) => {
            warn!(error = %e, "CF check failed");
            Ok(())
        }
        (result, _) => result,
    }
}
