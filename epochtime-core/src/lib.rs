//! # epochtime core
//!
//! Converts human-readable timestamps (`YYYY-MM-DD HH:MM:SS`) into Unix
//! epoch seconds and publishes them as string parameters of a load-testing
//! script host.
//!
//! ## Features
//!
//! - **Fixed-pattern scanning**: the same rules as `sscanf("%d-%d-%d %d:%d:%d")`
//! - **mktime-style normalization**: out-of-range fields carry over instead of failing
//! - **Injectable zone**: system local time by default, a pinned UTC offset, or any chrono zone
//! - **Injectable host**: results and diagnostics go through [`ScriptHost`]
//!
//! ## Example
//!
//! ```
//! use epochtime_core::{ParamStore, TimestampConverter, TimezonePolicy};
//!
//! let converter = TimestampConverter::new(TimezonePolicy::Fixed(120)).unwrap();
//! let mut host = ParamStore::new();
//!
//! converter.convert(&mut host, "2017-07-17 10:00:00", "epochVar");
//! assert_eq!(host.get("epochVar"), Some("1500278400"));
//! ```

// Public modules
pub mod calendar;
pub mod convert;
pub mod error;
pub mod host;
pub mod scan;
pub mod zone;

// Re-exports for convenience
pub use calendar::CalendarTime;
pub use convert::{FORMAT_ERROR_MESSAGE, TimestampConverter, human_epoch_time};
pub use error::ConvertError;
pub use host::{ParamStore, ScriptHost};
pub use scan::scan_calendar;
pub use zone::{FixedZone, LocalZone, TimezonePolicy, TzZone, ZoneConversion};
