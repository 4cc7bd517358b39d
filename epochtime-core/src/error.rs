use std::fmt;

use chrono::NaiveDateTime;

use crate::calendar::CalendarTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    // Fewer than six fields could be scanned; `offset` is the byte where scanning stopped
    FormatMismatch { fields: usize, offset: usize },
    OutOfRange(CalendarTime),
    NonexistentLocalTime(NaiveDateTime),
    InvalidTimezone(String),
}

// RUST CONCEPT: Implementing traits for custom error types
// Display gives the message that reaches the host's error channel
impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::FormatMismatch { fields, offset } => write!(
                f,
                "Format mismatch: scanned {} of 6 fields, stopped at byte {}",
                fields, offset
            ),
            ConvertError::OutOfRange(cal) => {
                write!(f, "Date out of range: {}", cal)
            }
            ConvertError::NonexistentLocalTime(naive) => {
                write!(f, "Local time does not exist in this zone: {}", naive)
            }
            ConvertError::InvalidTimezone(spec) => {
                write!(f, "Invalid timezone '{}': expected local, utc or +HH:MM", spec)
            }
        }
    }
}

impl std::error::Error for ConvertError {}
