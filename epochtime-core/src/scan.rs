// Fixed-pattern scanner for human timestamps
//
// Follows the C `sscanf("%d-%d-%d %d:%d:%d")` rules: integers skip leading
// whitespace and take an optional sign, literals must match exactly, the
// single space matches any run of whitespace (including none) and anything
// after the last field is ignored.

use crate::calendar::CalendarTime;
use crate::error::ConvertError;

pub const FIELD_COUNT: usize = 6;

// RUST CONCEPT: The pattern as data rather than code
#[derive(Debug, Clone, Copy, PartialEq)]
enum Directive {
    Int,
    Literal(u8),
    Whitespace,
}

const HUMAN_TIME_PATTERN: [Directive; 11] = [
    Directive::Int,
    Directive::Literal(b'-'),
    Directive::Int,
    Directive::Literal(b'-'),
    Directive::Int,
    Directive::Whitespace,
    Directive::Int,
    Directive::Literal(b':'),
    Directive::Int,
    Directive::Literal(b':'),
    Directive::Int,
];

struct Scanner<'a> {
    input: &'a [u8],
    offset: usize, // Byte offset of the next unread character
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            offset: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.offset).copied()
    }

    // C isspace also accepts vertical tab
    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == 0x0b {
                self.offset += 1;
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, literal: u8) -> bool {
        if self.peek() == Some(literal) {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    // %d: optional sign then at least one digit; overflow is a mismatch
    fn scan_int(&mut self) -> Option<i32> {
        self.skip_whitespace();

        let negative = match self.peek() {
            Some(b'-') => {
                self.offset += 1;
                true
            }
            Some(b'+') => {
                self.offset += 1;
                false
            }
            _ => false,
        };

        let digits_start = self.offset;
        let mut value: i64 = 0;
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)?
                .checked_add(i64::from(b - b'0'))?;
            self.offset += 1;
        }

        if self.offset == digits_start {
            return None;
        }

        let value = if negative { -value } else { value };
        i32::try_from(value).ok()
    }
}

/// Scan the six fields of `YYYY-MM-DD HH:MM:SS` into a calendar record.
///
/// Returns [`ConvertError::FormatMismatch`] with the number of fields read
/// when the input stops matching before the sixth field.
pub fn scan_calendar(input: &str) -> Result<CalendarTime, ConvertError> {
    let mut scanner = Scanner::new(input);
    let mut fields = [0i32; FIELD_COUNT];
    let mut scanned = 0;

    for directive in HUMAN_TIME_PATTERN {
        let matched = match directive {
            Directive::Int => match scanner.scan_int() {
                Some(value) => {
                    fields[scanned] = value;
                    scanned += 1;
                    true
                }
                None => false,
            },
            Directive::Literal(literal) => scanner.expect(literal),
            Directive::Whitespace => {
                scanner.skip_whitespace();
                true
            }
        };

        if !matched {
            return Err(ConvertError::FormatMismatch {
                fields: scanned,
                offset: scanner.offset,
            });
        }
    }

    let [year, month, day, hour, minute, second] = fields;
    Ok(CalendarTime::new(year, month, day, hour, minute, second))
}
