//! Error types for the tethys-calendar crate.

/// Error type for all fallible operations in the tethys-calendar crate.
///
/// Covers invalid date components for a given calendar, unknown CF
/// calendar names, malformed date strings, and frequency aliases that
/// cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for {year}-{month:02} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The year for which the day is invalid.
        year: i32,
        /// The maximum valid day for the given month in this calendar.
        max_day: u8,
    },

    /// Returned when a time-of-day component is out of range.
    #[error("invalid time of day: {hour:02}:{minute:02}:{second:02}")]
    InvalidTime {
        /// Hour component.
        hour: u8,
        /// Minute component.
        minute: u8,
        /// Second component.
        second: u8,
    },

    /// Returned when a CF calendar name is not recognised.
    #[error("unknown calendar: '{name}'")]
    UnknownCalendar {
        /// The calendar name that was provided.
        name: String,
    },

    /// Returned when a date string cannot be parsed.
    #[error("invalid date string: '{input}'")]
    InvalidDateString {
        /// The offending input.
        input: String,
    },

    /// Returned when a frequency alias cannot be parsed.
    #[error("invalid frequency '{alias}': {reason}")]
    InvalidFrequency {
        /// The frequency alias that was provided.
        alias: String,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_month() {
        let err = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_invalid_day() {
        let err = CalendarError::InvalidDay {
            day: 29,
            month: 2,
            year: 2001,
            max_day: 28,
        };
        assert_eq!(err.to_string(), "invalid day: 29 for 2001-02 (max 28)");
    }

    #[test]
    fn error_invalid_frequency() {
        let err = CalendarError::InvalidFrequency {
            alias: "Q-FOO".to_string(),
            reason: "unknown month anchor 'FOO'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid frequency 'Q-FOO': unknown month anchor 'FOO'"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
