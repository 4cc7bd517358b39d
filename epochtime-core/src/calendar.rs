//! Calendar-time record produced by the scanner.
//!
//! The fields hold exactly what was written in the input, with a full year
//! and a 1-based month. Nothing is range-checked here: out-of-range values
//! are carried into the next larger unit by [`CalendarTime::normalize`],
//! the same way the C `mktime` routine treats a `struct tm`.
//!
//! # Examples
//!
//! ```
//! use epochtime_core::CalendarTime;
//!
//! let cal = CalendarTime::new(2019, 2, 29, 0, 0, 0);
//! let naive = cal.normalize().unwrap();
//! assert_eq!(naive.to_string(), "2019-03-01 00:00:00");
//! ```

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::ConvertError;

const SECONDS_PER_DAY: i64 = 86_400;

/// Date and time components as scanned from a human timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTime {
    pub year: i32,   // full year, e.g. 2017
    pub month: i32,  // 1-12
    pub day: i32,    // 1-31
    pub hour: i32,   // 0-23
    pub minute: i32, // 0-59
    pub second: i32, // 0-59
}

impl CalendarTime {
    pub fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Resolve the fields to a wall-clock date-time, carrying overflow.
    ///
    /// Months outside 1-12 roll the year first; day, hour, minute and second
    /// are then added as an offset from the first of that month, so
    /// `2017-13-01` is `2018-01-01` and `2019-02-29` is `2019-03-01`.
    /// The offset is summed in `i64`, which holds any combination of `i32` fields.
    pub fn normalize(&self) -> Result<NaiveDateTime, ConvertError> {
        let out_of_range = || ConvertError::OutOfRange(*self);

        // RUST CONCEPT: Euclidean division keeps negative months in 0..12
        let months = i64::from(self.month) - 1;
        let year = i64::from(self.year) + months.div_euclid(12);
        let month = months.rem_euclid(12) as u32 + 1;
        let year = i32::try_from(year).map_err(|_| out_of_range())?;

        let month_start = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(out_of_range)?;

        let offset = (i64::from(self.day) - 1) * SECONDS_PER_DAY
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second);
        let delta = TimeDelta::try_seconds(offset).ok_or_else(out_of_range)?;

        month_start
            .checked_add_signed(delta)
            .ok_or_else(out_of_range)
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
