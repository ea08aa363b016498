//! Configuration for coverage validation.

use tethys_calendar::Frequency;

use crate::error::ChecksError;
use crate::expect::BoundaryMode;
use crate::policy::MissingPolicy;

/// Configuration for a [`Validator`](crate::Validator).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use tethys_checks::{BoundaryMode, CheckConfig, MissingPolicy};
/// use tethys_calendar::Frequency;
///
/// let config = CheckConfig::new(Frequency::DAILY, "YS-OCT".parse().unwrap())
///     .with_policy(MissingPolicy::wmo())
///     .with_boundary(BoundaryMode::Clipped);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    base: Frequency,
    target: Frequency,
    policy: MissingPolicy,
    boundary: BoundaryMode,
    min_records: usize,
}

impl CheckConfig {
    /// Creates a configuration resampling `base` data into `target` periods.
    ///
    /// Defaults: `policy = Any`, `boundary = Full`, `min_records = 1`.
    pub fn new(base: Frequency, target: Frequency) -> Self {
        Self {
            base,
            target,
            policy: MissingPolicy::Any,
            boundary: BoundaryMode::Full,
            min_records: 1,
        }
    }

    /// Sets the missingness policy.
    pub fn with_policy(mut self, policy: MissingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how boundary periods are counted.
    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sets the minimum series length accepted.
    pub fn with_min_records(mut self, n: usize) -> Self {
        self.min_records = n;
        self
    }

    // --- Accessors ---

    /// Returns the base (source) frequency.
    pub fn base(&self) -> &Frequency {
        &self.base
    }

    /// Returns the target (resampling) frequency.
    pub fn target(&self) -> &Frequency {
        &self.target
    }

    /// Returns the missingness policy.
    pub fn policy(&self) -> &MissingPolicy {
        &self.policy
    }

    /// Returns the boundary mode.
    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Returns the minimum series length.
    pub fn min_records(&self) -> usize {
        self.min_records
    }

    /// Validates this configuration.
    ///
    /// Checks policy parameter ranges, that `target` periods can hold at
    /// least one `base` step, and that `min_records` is positive.
    pub fn validate(&self) -> Result<(), ChecksError> {
        self.policy.validate()?;
        if !self.target.can_resample(&self.base) {
            return Err(ChecksError::InvalidConfig {
                reason: format!(
                    "target frequency '{}' is finer than base frequency '{}'",
                    self.target, self.base
                ),
            });
        }
        if self.min_records == 0 {
            return Err(ChecksError::InvalidConfig {
                reason: "min_records must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self::new(Frequency::DAILY, Frequency::YEAR_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_valid() {
        let config = CheckConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target().to_string(), "YS-JAN");
        assert_eq!(config.policy(), &MissingPolicy::Any);
        assert_eq!(config.boundary(), BoundaryMode::Full);
    }

    #[test]
    fn finer_target_rejected() {
        let config = CheckConfig::new(Frequency::DAILY, Frequency::HOURLY);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("finer than base"));
    }

    #[test]
    fn bad_policy_rejected() {
        let config = CheckConfig::default().with_policy(MissingPolicy::Fraction { tolerance: 2.0 });
        assert!(matches!(config.validate(), Err(ChecksError::InvalidConfig { .. })));
    }

    #[test]
    fn zero_min_records_rejected() {
        let config = CheckConfig::default().with_min_records(0);
        assert!(config.validate().is_err());
    }
}
