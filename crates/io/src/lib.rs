//! # tethys-io
//!
//! Read climate and hydrology datasets from JSON and write coverage
//! reports back to JSON. Time axes are either CF-encoded offsets
//! (`"days since 2000-01-01"`) decoded in the dataset calendar, or ISO
//! timestamps. Missing values (`null`, `_FillValue`, `missing_value`)
//! become `NaN`.
//!
//! ```
//! use tethys_io::{ReaderConfig, parse_json};
//!
//! let text = r#"{
//!     "calendar": "noleap",
//!     "time": {"units": "days since 2000-02-27", "values": [0, 1, 2]},
//!     "variables": {"q": {"values": [1.0, null, -9999.0],
//!                         "attrs": {"_FillValue": -9999.0, "units": "m3 s-1"}}}
//! }"#;
//! let ds = parse_json(text, &ReaderConfig::default()).unwrap();
//! assert_eq!(ds.times()[2].to_string(), "2000-03-01");
//! assert_eq!(ds.variable("q").unwrap().valid_count(), 1);
//! ```

mod cf_time;
mod dataset;
mod error;
mod reader;
mod report;
mod validate;
mod writer;

pub use cf_time::{TimeUnit, TimeUnits};
pub use dataset::{Dataset, Variable};
pub use error::IoError;
pub use reader::{ReaderConfig, parse_json, read_json};
pub use report::{PeriodReport, Report, VariableReport};
pub use writer::{WriterConfig, read_report, write_report};
