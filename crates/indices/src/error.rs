//! Error types for the tethys-indices crate.

use tethys_checks::ChecksError;

/// Error type for all fallible operations in the tethys-indices crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndicesError {
    /// A CF attribute does not carry the value the indicator requires.
    #[error("variable has a non-conforming {key}: got '{found}', expected '{expected}'")]
    CfCheck {
        /// Attribute name.
        key: String,
        /// Required value.
        expected: String,
        /// Value found on the variable.
        found: String,
    },

    /// A CF attribute required by the indicator is absent.
    #[error("variable does not have a '{key}' attribute")]
    MissingAttribute {
        /// Attribute name.
        key: String,
    },

    /// No indicator with this identifier exists.
    #[error("unknown indicator: '{identifier}'")]
    UnknownIndicator {
        /// The identifier that was provided.
        identifier: String,
    },

    /// Returned when configuration is inconsistent with the indicator.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Coverage validation failed.
    #[error(transparent)]
    Checks(#[from] ChecksError),
}
