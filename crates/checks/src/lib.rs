//! # tethys-checks
//!
//! Temporal-coverage validation for resampled climate and hydrology
//! indicators. A series sampled at a declared base frequency is checked
//! for regularity, partitioned into target-frequency periods, compared
//! against the number of records each period should hold, and masked
//! period by period according to a [`MissingPolicy`].
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries"] --> B["validate_frequency"]
//!     B -->|"regular axis"| C["expected_counts"]
//!     C --> D["Coverage per period"]
//!     D -->|"MissingPolicy::is_missing"| E["mask"]
//!     E --> F["Validator::compute"]
//!     R["reducer"] --> F
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tethys_calendar::{Calendar, DateTime, Frequency};
//! use tethys_checks::{CheckConfig, MissingPolicy, TimeSeries, Validator};
//!
//! let cal = Calendar::ProlepticGregorian;
//! let start = DateTime::date(cal, 2001, 12, 31).unwrap();
//! let series = TimeSeries::regular(cal, start, &Frequency::DAILY, vec![1.0; 378]);
//!
//! let config = CheckConfig::new(Frequency::DAILY, "Q-NOV".parse().unwrap())
//!     .with_policy(MissingPolicy::Any);
//! let validator = Validator::new(config).unwrap();
//!
//! let out = validator.compute(&series, |r| r.valid().sum()).unwrap();
//! assert_eq!(out.missing(), &[true, false, false, false, true]);
//! assert_eq!(out.values()[1], 92.0);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `series` | Input container of timestamps and values |
//! | `axis` | Time axis and frequency inference |
//! | `validate` | Regularity checks against the base frequency |
//! | `expect` | Period partition and expected counts |
//! | `coverage` | Observed counts per period and per month |
//! | `policy` | Missingness policies |
//! | `config` | Validator configuration |
//! | `orchestrator` | End-to-end masking and reduction |
//! | `error` | Error types |

mod axis;
mod config;
mod coverage;
mod error;
mod expect;
mod grid;
mod orchestrator;
mod policy;
mod series;
mod validate;

pub use axis::{InferredFrequency, TimeAxis};
pub use config::CheckConfig;
pub use coverage::{Coverage, PeriodCoverage};
pub use error::{ChecksError, FrequencyError};
pub use expect::{BoundaryMode, Period, PeriodExpectation, expected_counts, partition};
pub use orchestrator::{PeriodRecords, Resampled, Validator, WholeSeries};
pub use policy::{MissingPolicy, PolicyOptions};
pub use series::TimeSeries;
pub use validate::validate_frequency;
