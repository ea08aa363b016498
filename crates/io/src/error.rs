//! Error types for tethys-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the tethys-io crate.
///
/// Covers file access failures, malformed JSON, CF time decoding problems,
/// calendar conversion issues, and validation of the dataset layout.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file exists but cannot be read.
    #[error("failed to read {}: {reason}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when an output file cannot be written.
    #[error("failed to write {}: {reason}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from serde_json.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying JSON failure.
        reason: String,
    },

    /// Wraps an error originating from the tethys-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a requested variable is not present in the dataset.
    #[error("variable '{name}' not found")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// Returned when a time value or time units string cannot be decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

impl From<tethys_calendar::CalendarError> for IoError {
    fn from(e: tethys_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.json"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.json");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "variable 'q' has 3 values, time axis has 4; variable 't' has 5 values, time axis has 4"
                .to_string(),
        };
        assert!(err.to_string().starts_with("2 validation error(s): variable 'q'"));
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "tas".to_string(),
        };
        assert_eq!(err.to_string(), "variable 'tas' not found");
    }

    #[test]
    fn display_invalid_time() {
        let err = IoError::InvalidTime {
            reason: "unknown unit 'fortnights'".to_string(),
        };
        assert_eq!(err.to_string(), "invalid time: unknown unit 'fortnights'");
    }

    #[test]
    fn from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: IoError = json_err.into();
        assert!(matches!(err, IoError::Json { .. }));
    }

    #[test]
    fn from_calendar_error() {
        let cal_err = tethys_calendar::CalendarError::InvalidMonth { month: 13 };
        let err: IoError = cal_err.into();
        assert!(matches!(err, IoError::Calendar { .. }));
        assert!(err.to_string().contains("calendar error"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
