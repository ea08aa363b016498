//! Error types for the tethys-checks crate.

/// A time axis that is irregular with respect to its declared base frequency.
///
/// Always fatal: the caller has to fix the input. No partial result is
/// produced once one of these is raised.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrequencyError {
    /// The spacing inferred from the timestamps differs from the declared step.
    #[error("inconsistent frequency: expected '{expected}', found '{found}'")]
    InconsistentFrequency {
        /// Declared base frequency.
        expected: String,
        /// Frequency inferred from the minimal timestamp spacing.
        found: String,
    },

    /// One or more timestamps occur more than once.
    #[error("duplicate dates: {count} repeated timestamp(s): {dates}")]
    DuplicateDates {
        /// Number of extra occurrences.
        count: usize,
        /// Repeated timestamps, truncated for long lists.
        dates: String,
    },

    /// Consecutive timestamps are further apart than the declared step.
    #[error("missing/gap in series: {count} step(s) differ from '{expected}': {details}")]
    Gap {
        /// Number of irregular steps.
        count: usize,
        /// Declared base frequency.
        expected: String,
        /// Offending `before -> after` pairs, truncated for long lists.
        details: String,
    },

    /// A timestamp is not later than its predecessor.
    #[error("time axis is not increasing: {previous} is followed by {next}")]
    NotIncreasing {
        /// Earlier position in the input.
        previous: String,
        /// Later position in the input.
        next: String,
    },

    /// A timestamp does not sit on the base grid anchored at the first timestamp.
    #[error("timestamp {date} is not on the '{freq}' grid starting at {origin}")]
    OffGrid {
        /// Offending timestamp.
        date: String,
        /// Base frequency.
        freq: String,
        /// First timestamp of the series.
        origin: String,
    },
}

/// Error type for all fallible operations in the tethys-checks crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChecksError {
    /// The time axis failed frequency validation.
    #[error(transparent)]
    Frequency(#[from] FrequencyError),

    /// Returned when the input series has no records.
    #[error("input series is empty")]
    EmptySeries,

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when the series is shorter than the configured minimum.
    #[error("insufficient data: got {n} records, need at least {min}")]
    InsufficientData {
        /// Number of records.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a missingness policy name is not recognised.
    #[error("unknown missingness policy: '{name}'")]
    UnknownPolicy {
        /// The name that was provided.
        name: String,
    },
}
