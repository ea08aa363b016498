//! Frequency validation of a time axis against a declared base frequency.
//!
//! Checks run in a fixed order and the first failing check is reported:
//!
//! 1. the inferred spacing must equal the declared step,
//! 2. no timestamp may repeat,
//! 3. every consecutive pair must be exactly one step apart.

use tethys_calendar::Frequency;
use tracing::debug;

use crate::axis::{InferredFrequency, TimeAxis};
use crate::error::FrequencyError;

/// Maximum number of offending entries listed in an error message.
const MAX_LISTED: usize = 10;

// ---------------------------------------------------------------------------
// IssueCollector
// ---------------------------------------------------------------------------

/// Accumulates offending entries and turns them into a single error.
///
/// Only the first [`MAX_LISTED`] entries are kept verbatim; the rest are
/// counted and summarised.
struct IssueCollector {
    listed: Vec<String>,
    count: usize,
}

impl IssueCollector {
    fn new() -> Self {
        Self {
            listed: Vec::new(),
            count: 0,
        }
    }

    fn push(&mut self, msg: impl Into<String>) {
        if self.listed.len() < MAX_LISTED {
            self.listed.push(msg.into());
        }
        self.count += 1;
    }

    /// `Ok(())` when nothing was pushed, otherwise the error built by `make`
    /// from the total count and the joined entries.
    fn finish(
        self,
        make: impl FnOnce(usize, String) -> FrequencyError,
    ) -> Result<(), FrequencyError> {
        if self.count == 0 {
            return Ok(());
        }
        let mut details = self.listed.join(", ");
        if self.count > self.listed.len() {
            details.push_str(&format!(", ... and {} more", self.count - self.listed.len()));
        }
        Err(make(self.count, details))
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Validates that `axis` is a regular sequence at `expected`.
///
/// An empty or single-element axis passes. The spacing check is skipped
/// when no spacing can be inferred.
///
/// # Errors
///
/// - [`FrequencyError::InconsistentFrequency`] if the minimal spacing is not
///   the declared step.
/// - [`FrequencyError::DuplicateDates`] if any timestamp repeats.
/// - [`FrequencyError::NotIncreasing`] if a timestamp is not after its
///   predecessor.
/// - [`FrequencyError::Gap`] if consecutive timestamps are more than one
///   step apart.
pub fn validate_frequency(axis: &TimeAxis, expected: &Frequency) -> Result<(), FrequencyError> {
    let inferred = axis.inferred_frequency();
    debug!(n = axis.len(), expected = %expected, ?inferred, "validating time axis");

    if let InferredFrequency::Regular(found) = inferred
        && !found.same_step(expected)
    {
        return Err(FrequencyError::InconsistentFrequency {
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }

    check_duplicates(axis)?;
    check_steps(axis, expected)
}

fn check_duplicates(axis: &TimeAxis) -> Result<(), FrequencyError> {
    let mut order: Vec<usize> = (0..axis.len()).collect();
    order.sort_by_key(|&i| (axis.seconds()[i], i));

    let mut c = IssueCollector::new();
    for w in order.windows(2) {
        if axis.seconds()[w[0]] == axis.seconds()[w[1]] {
            c.push(axis.times()[w[1]].to_string());
        }
    }
    c.finish(|count, dates| FrequencyError::DuplicateDates { count, dates })
}

fn check_steps(axis: &TimeAxis, expected: &Frequency) -> Result<(), FrequencyError> {
    let calendar = axis.calendar();
    let times = axis.times();
    let seconds = axis.seconds();

    let mut c = IssueCollector::new();
    for i in 1..axis.len() {
        if seconds[i] <= seconds[i - 1] {
            return Err(FrequencyError::NotIncreasing {
                previous: times[i - 1].to_string(),
                next: times[i].to_string(),
            });
        }
        let regular = match (expected.step_seconds(), expected.step_months()) {
            (Some(step), _) => seconds[i] - seconds[i - 1] == step,
            (None, Some(months)) => {
                let elapsed = times[i - 1].month_index() - times[0].month_index();
                times[0].shift_months(calendar, elapsed + months) == times[i]
            }
            (None, None) => true,
        };
        if !regular {
            c.push(format!("{} -> {}", times[i - 1], times[i]));
        }
    }
    c.finish(|count, details| FrequencyError::Gap {
        count,
        expected: expected.to_string(),
        details,
    })
}
