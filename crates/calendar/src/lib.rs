//! # tethys-calendar
//!
//! Pure calendar arithmetic for CF calendars and pandas-style resampling
//! frequencies. No host date library is involved: every conversion is
//! integer arithmetic over `(year, month, day)` triples, so month and year
//! lengths behave identically for every calendar kind.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Calendar"] -->|"days_in_month / days_before_year"| B["day counts"]
//!     C["DateTime"] -->|".to_seconds(cal)"| D["epoch seconds"]
//!     D -->|"DateTime::from_seconds(cal, s)"| C
//!     E["alias string"] -->|"parse()"| F["Frequency"]
//!     F -->|".period_start() / .next_period()"| C
//!     F -->|"date_range()"| G["Vec of DateTime"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tethys_calendar::{Calendar, DateTime, Frequency, date_range};
//!
//! let cal = Calendar::ProlepticGregorian;
//! assert_eq!(cal.days_in_month(2000, 2).unwrap(), 29);
//! assert_eq!(Calendar::NoLeap.days_in_month(2000, 2).unwrap(), 28);
//!
//! // Seasons anchored on December.
//! let djf: Frequency = "QS-DEC".parse().unwrap();
//! let t = DateTime::date(cal, 2002, 1, 15).unwrap();
//! assert_eq!(djf.period_start(cal, t), DateTime::date(cal, 2001, 12, 1).unwrap());
//!
//! let days = date_range(cal, t, &Frequency::DAILY, 3);
//! assert_eq!(days.len(), 3);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `calendar` | Calendar kinds and month/year length arithmetic |
//! | `datetime` | Date-time value, epoch-second conversion, ISO parsing |
//! | `frequency` | Frequency aliases, period flooring and stepping |
//! | `sequence` | Regular date sequence generation |
//! | `error` | Error types |

mod calendar;
mod datetime;
mod error;
mod frequency;
mod sequence;

pub use calendar::{Calendar, SECONDS_PER_DAY};
pub use datetime::DateTime;
pub use error::CalendarError;
pub use frequency::{FreqUnit, Frequency, Label, MAX_STEP_YEARS};
pub use sequence::date_range;
