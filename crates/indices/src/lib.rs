//! # tethys-indices
//!
//! Climate and hydrology indicators computed through the coverage checks
//! of [`tethys_checks`]. An [`Indicator`] bundles metadata, the CF
//! `standard_name` its input must carry, the source frequency, and a
//! reducer. Resampling indicators produce one value per period; reducing
//! indicators produce one value for the whole series.
//!
//! ## Quick Start
//!
//! ```
//! use tethys_calendar::{Calendar, DateTime, Frequency};
//! use tethys_checks::TimeSeries;
//! use tethys_indices::{Attributes, Compliance, IndicatorOutput, lookup};
//!
//! let cal = Calendar::NoLeap;
//! let start = DateTime::date(cal, 2000, 1, 1).unwrap();
//! let series = TimeSeries::regular(cal, start, &Frequency::DAILY, vec![283.15; 730]);
//! let mut attrs = Attributes::new();
//! attrs.insert("standard_name".into(), "air_temperature".into());
//!
//! let tg_mean = lookup("tg_mean").unwrap();
//! let config = tg_mean.check_config(None);
//! let out = tg_mean.compute(&series, &attrs, &config, Compliance::Raise).unwrap();
//! let IndicatorOutput::Periods(years) = out else { unreachable!() };
//! assert_eq!(years.missing(), &[false, false]);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `indicator` | Indicator descriptor, computation kinds, execution |
//! | `catalog` | Registry and lookup |
//! | `cf` | CF attribute checks |
//! | `streamflow` | Streamflow reducers |
//! | `temperature` | Temperature reducers |
//! | `error` | Error types |

mod catalog;
mod cf;
mod error;
mod indicator;
pub mod streamflow;
mod temperature;

pub use catalog::{catalog, lookup};
pub use cf::{Attributes, Compliance, check_valid};
pub use error::IndicesError;
pub use indicator::{Computation, Indicator, IndicatorOutput, Reducer, ReducerFactory};
