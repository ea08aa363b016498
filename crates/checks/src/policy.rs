//! Missingness policies: turn a period's coverage into a mask verdict.

use crate::coverage::PeriodCoverage;
use crate::error::ChecksError;

/// Rule deciding whether a period has too little data to be trusted.
///
/// Every policy except [`Skip`](Self::Skip) flags periods in which no
/// base-frequency timestamp is expected at all.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MissingPolicy {
    /// Missing if any expected timestamp has no valid value.
    #[default]
    Any,
    /// Missing if the missing fraction exceeds `tolerance`.
    Fraction {
        /// Largest acceptable missing fraction, in `[0, 1)`.
        tolerance: f64,
    },
    /// Missing if fewer than `n` valid values are present.
    AtLeast {
        /// Minimum number of valid values.
        n: usize,
    },
    /// Per calendar month: missing if the missing fraction exceeds
    /// `max_missing_fraction` or a run of missing slots exceeds
    /// `max_consecutive`. The period is missing if any month is.
    Wmo {
        /// Largest acceptable missing fraction per month.
        max_missing_fraction: f64,
        /// Longest acceptable run of consecutive missing slots.
        max_consecutive: usize,
    },
    /// Never missing.
    Skip,
}

/// Optional parameters accompanying a policy name.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolicyOptions {
    /// For `fraction`.
    pub tolerance: Option<f64>,
    /// For `at_least`.
    pub n: Option<usize>,
    /// For `wmo`.
    pub max_missing_fraction: Option<f64>,
    /// For `wmo`.
    pub max_consecutive: Option<usize>,
}

impl MissingPolicy {
    /// Default WMO monthly missing fraction (11 of 31 days).
    pub const WMO_MAX_MISSING_FRACTION: f64 = 11.0 / 31.0;
    /// Default WMO run length.
    pub const WMO_MAX_CONSECUTIVE: usize = 5;

    /// WMO policy with default thresholds.
    pub fn wmo() -> Self {
        Self::Wmo {
            max_missing_fraction: Self::WMO_MAX_MISSING_FRACTION,
            max_consecutive: Self::WMO_MAX_CONSECUTIVE,
        }
    }

    /// Resolves a policy from its configuration name and options.
    ///
    /// Accepted names are `any`, `fraction` (alias `pct`), `at_least`
    /// (aliases `at_least_n`, `atleast`), `wmo` and `skip`.
    ///
    /// # Errors
    ///
    /// - [`ChecksError::UnknownPolicy`] for an unrecognised name.
    /// - [`ChecksError::InvalidConfig`] for a missing required option, an
    ///   option the policy does not use, or an out-of-range value.
    pub fn from_name(name: &str, opts: PolicyOptions) -> Result<Self, ChecksError> {
        let key = name.trim().to_lowercase();
        let policy = match key.as_str() {
            "any" => Self::Any,
            "fraction" | "pct" => Self::Fraction {
                tolerance: opts.tolerance.ok_or_else(|| required(&key, "tolerance"))?,
            },
            "at_least" | "at_least_n" | "atleast" => Self::AtLeast {
                n: opts.n.ok_or_else(|| required(&key, "n"))?,
            },
            "wmo" => Self::Wmo {
                max_missing_fraction: opts
                    .max_missing_fraction
                    .unwrap_or(Self::WMO_MAX_MISSING_FRACTION),
                max_consecutive: opts.max_consecutive.unwrap_or(Self::WMO_MAX_CONSECUTIVE),
            },
            "skip" => Self::Skip,
            _ => {
                return Err(ChecksError::UnknownPolicy {
                    name: name.to_string(),
                });
            }
        };

        let unused = [
            ("tolerance", opts.tolerance.is_some(), matches!(policy, Self::Fraction { .. })),
            ("n", opts.n.is_some(), matches!(policy, Self::AtLeast { .. })),
            (
                "max_missing_fraction",
                opts.max_missing_fraction.is_some(),
                matches!(policy, Self::Wmo { .. }),
            ),
            (
                "max_consecutive",
                opts.max_consecutive.is_some(),
                matches!(policy, Self::Wmo { .. }),
            ),
        ];
        if let Some((option, _, _)) = unused.iter().find(|(_, given, used)| *given && !*used) {
            return Err(ChecksError::InvalidConfig {
                reason: format!("option '{option}' does not apply to policy '{}'", policy.name()),
            });
        }

        policy.validate()?;
        Ok(policy)
    }

    /// Canonical configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Fraction { .. } => "fraction",
            Self::AtLeast { .. } => "at_least",
            Self::Wmo { .. } => "wmo",
            Self::Skip => "skip",
        }
    }

    /// Checks parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ChecksError> {
        match *self {
            Self::Fraction { tolerance } => check_fraction("tolerance", tolerance),
            Self::AtLeast { n } if n == 0 => Err(ChecksError::InvalidConfig {
                reason: "at_least.n must be >= 1".to_string(),
            }),
            Self::Wmo {
                max_missing_fraction,
                ..
            } => check_fraction("max_missing_fraction", max_missing_fraction),
            _ => Ok(()),
        }
    }

    /// Returns `true` when the verdict needs per-month counts.
    pub fn needs_monthly_breakdown(&self) -> bool {
        matches!(self, Self::Wmo { .. })
    }

    /// Decides whether a period is missing.
    pub fn is_missing(&self, coverage: &PeriodCoverage) -> bool {
        let total = coverage.total();
        if matches!(self, Self::Skip) {
            return false;
        }
        if total.expected == 0 {
            return true;
        }
        match *self {
            Self::Any => total.valid < total.expected,
            Self::Fraction { tolerance } => total.missing_fraction() > tolerance,
            Self::AtLeast { n } => total.valid < n,
            Self::Wmo {
                max_missing_fraction,
                max_consecutive,
            } => {
                let months = if coverage.months().is_empty() {
                    std::slice::from_ref(&total)
                } else {
                    coverage.months()
                };
                months.iter().any(|m| {
                    m.missing_fraction() > max_missing_fraction || m.longest_gap > max_consecutive
                })
            }
            Self::Skip => false,
        }
    }
}

fn required(policy: &str, option: &str) -> ChecksError {
    ChecksError::InvalidConfig {
        reason: format!("policy '{policy}' requires option '{option}'"),
    }
}

fn check_fraction(field: &str, value: f64) -> Result<(), ChecksError> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ChecksError::InvalidConfig {
            reason: format!("{field} must be in [0, 1), got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_aliases() {
        let opts = PolicyOptions::default();
        assert_eq!(MissingPolicy::from_name("any", opts).unwrap(), MissingPolicy::Any);
        assert_eq!(MissingPolicy::from_name("WMO", opts).unwrap(), MissingPolicy::wmo());
        assert_eq!(MissingPolicy::from_name("skip", opts).unwrap(), MissingPolicy::Skip);

        let pct = PolicyOptions {
            tolerance: Some(0.1),
            ..Default::default()
        };
        assert_eq!(
            MissingPolicy::from_name("pct", pct).unwrap(),
            MissingPolicy::Fraction { tolerance: 0.1 }
        );

        let n = PolicyOptions {
            n: Some(20),
            ..Default::default()
        };
        for alias in ["at_least", "at_least_n", "atleast"] {
            assert_eq!(
                MissingPolicy::from_name(alias, n).unwrap(),
                MissingPolicy::AtLeast { n: 20 }
            );
        }
    }

    #[test]
    fn unknown_name_rejected() {
        assert_eq!(
            MissingPolicy::from_name("median", PolicyOptions::default()).unwrap_err(),
            ChecksError::UnknownPolicy {
                name: "median".to_string(),
            }
        );
    }

    #[test]
    fn missing_or_stray_options_rejected() {
        assert!(matches!(
            MissingPolicy::from_name("fraction", PolicyOptions::default()),
            Err(ChecksError::InvalidConfig { .. })
        ));
        let stray = PolicyOptions {
            n: Some(3),
            ..Default::default()
        };
        let err = MissingPolicy::from_name("any", stray).unwrap_err();
        assert!(err.to_string().contains("'n' does not apply to policy 'any'"));
    }

    #[test]
    fn ranges_validated() {
        for tolerance in [-0.1, 1.0, f64::NAN] {
            assert!(MissingPolicy::Fraction { tolerance }.validate().is_err(), "{tolerance}");
        }
        assert!(MissingPolicy::AtLeast { n: 0 }.validate().is_err());
        assert!(MissingPolicy::wmo().validate().is_ok());
    }

    #[test]
    fn monthly_breakdown_only_for_wmo() {
        assert!(MissingPolicy::wmo().needs_monthly_breakdown());
        assert!(!MissingPolicy::Any.needs_monthly_breakdown());
    }
}
