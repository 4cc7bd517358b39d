//! Zone conversion: the step that turns wall-clock fields into epoch seconds.
//!
//! This trait lets embedding applications pick how a scanned timestamp is
//! interpreted without the converter depending on one policy. The default
//! is the platform's local time, which is what a script host running on a
//! load generator normally expects. Tests and hosts that need reproducible
//! values pin a fixed offset instead.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use epochtime_core::{FixedZone, ZoneConversion};
//!
//! let zone = FixedZone::utc();
//! let naive = NaiveDate::from_ymd_opt(1970, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! assert_eq!(zone.to_epoch(naive).unwrap(), 0);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};

use crate::error::ConvertError;

pub trait ZoneConversion {
    /// Interpret `local` as wall-clock time in this zone.
    ///
    /// Follows `mktime` with `tm_isdst = 0`: a time repeated when the clock
    /// is set back is read as standard time, which is the later of the two
    /// instants. A time skipped when the clock is set forward is read with
    /// the offset in effect just before the transition.
    fn to_epoch(&self, local: NaiveDateTime) -> Result<i64, ConvertError>;

    /// Short name for logs, e.g. `local` or `+02:00`
    fn describe(&self) -> String;
}

fn resolve<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> Result<i64, ConvertError> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(instant) => Ok(instant.timestamp()),
        // Standard time has the smaller offset, so its instant is the later one
        LocalResult::Ambiguous(first, second) => Ok(first.timestamp().max(second.timestamp())),
        LocalResult::None => {
            let offset = offset_before_gap(zone, local)
                .ok_or(ConvertError::NonexistentLocalTime(local))?;
            Ok(local.and_utc().timestamp() - i64::from(offset))
        }
    }
}

// Offset in seconds of the wall clock just before a forward transition.
// An hour back covers ordinary DST gaps; a day back covers zones that
// skipped a whole date.
fn offset_before_gap<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> Option<i32> {
    [TimeDelta::hours(1), TimeDelta::days(1)]
        .into_iter()
        .filter_map(|step| local.checked_sub_signed(step))
        .find_map(|before| zone.from_local_datetime(&before).latest())
        .map(|instant| instant.offset().fix().local_minus_utc())
}

/// Any chrono zone, e.g. a named IANA zone from `chrono-tz`
#[derive(Debug, Clone)]
pub struct TzZone<Tz> {
    zone: Tz,
}

impl<Tz: TimeZone + fmt::Debug> TzZone<Tz> {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }
}

impl<Tz: TimeZone + fmt::Debug> ZoneConversion for TzZone<Tz> {
    fn to_epoch(&self, local: NaiveDateTime) -> Result<i64, ConvertError> {
        resolve(&self.zone, local)
    }

    fn describe(&self) -> String {
        format!("{:?}", self.zone)
    }
}

/// Platform local time, including its daylight-saving rules
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalZone;

impl LocalZone {
    pub fn new() -> Self {
        LocalZone
    }
}

impl ZoneConversion for LocalZone {
    fn to_epoch(&self, local: NaiveDateTime) -> Result<i64, ConvertError> {
        resolve(&Local, local)
    }

    fn describe(&self) -> String {
        "local".to_string()
    }
}

/// A constant offset from UTC
#[derive(Debug, Clone, Copy)]
pub struct FixedZone {
    offset: FixedOffset,
}

impl FixedZone {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Offset in minutes, positive east of UTC (UTC+02:00 is 120)
    pub fn east_minutes(minutes: i32) -> Result<Self, ConvertError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or_else(|| ConvertError::InvalidTimezone(format!("{} minutes", minutes)))
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }
}

impl ZoneConversion for FixedZone {
    fn to_epoch(&self, local: NaiveDateTime) -> Result<i64, ConvertError> {
        resolve(&self.offset, local)
    }

    fn describe(&self) -> String {
        self.offset.to_string()
    }
}

// RUST CONCEPT: Configuration value parsed from text
// Accepted forms: local, utc, +HH:MM, -HH:MM, +HHMM, +HH
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimezonePolicy {
    #[default]
    Local,
    Utc,
    Fixed(i32), // minutes east of UTC
}

impl TimezonePolicy {
    pub fn build(&self) -> Result<Box<dyn ZoneConversion>, ConvertError> {
        match self {
            TimezonePolicy::Local => Ok(Box::new(LocalZone::new())),
            TimezonePolicy::Utc => Ok(Box::new(FixedZone::utc())),
            TimezonePolicy::Fixed(minutes) => Ok(Box::new(FixedZone::east_minutes(*minutes)?)),
        }
    }
}

impl FromStr for TimezonePolicy {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConvertError::InvalidTimezone(s.to_string());
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(TimezonePolicy::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(TimezonePolicy::Utc);
        }

        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };

        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let (hours, minutes) = match digits.len() {
            2 => (&digits[..2], "0"),
            4 => (&digits[..2], &digits[2..]),
            _ => return Err(invalid()),
        };
        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(TimezonePolicy::Fixed(sign * (hours * 60 + minutes)))
    }
}

impl fmt::Display for TimezonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimezonePolicy::Local => write!(f, "local"),
            TimezonePolicy::Utc => write!(f, "utc"),
            TimezonePolicy::Fixed(minutes) => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}
