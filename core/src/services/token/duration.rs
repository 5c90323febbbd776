//! Parser for signed, composable elapsed-time expressions such as `1h`,
//! `1h20m`, `1.5s` or `-300ms`.
//!
//! Grammar: an optional `+` or `-`, then one or more terms of a decimal
//! number (optionally fractional) followed by a unit. The bare string `0`
//! needs no unit. Accepted units are `ns`, `us`, `µs`, `μs`, `ms`, `s`, `m`
//! and `h`. The magnitude must fit in a signed 64-bit count of nanoseconds.

use chrono::Duration;

use crate::errors::ValidationError;

/// Largest magnitude accepted before applying the sign (|i64::MIN|)
const MAX_NANOS: u64 = 1 << 63;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        // micro sign (U+00B5) and Greek small letter mu (U+03BC)
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parses a duration expression into a signed `chrono::Duration`.
///
/// Fractional parts are resolved to nanoseconds and truncated toward zero.
///
/// # Errors
///
/// `ValidationError::InvalidDuration` for empty input, a term without digits,
/// a missing or unknown unit, or a value outside the 64-bit nanosecond range.
///
/// # Example
///
/// ```
/// use st_core::services::token::parse_duration;
///
/// assert_eq!(parse_duration("1h20m").unwrap().num_minutes(), 80);
/// assert_eq!(parse_duration("-300ms").unwrap().num_milliseconds(), -300);
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, ValidationError> {
    let invalid = |reason: &'static str| ValidationError::InvalidDuration {
        input: input.to_string(),
        reason,
    };

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, has_whole, after_whole) =
            leading_int(rest).ok_or_else(|| invalid("value out of range"))?;
        rest = after_whole;

        let (fraction, scale, has_fraction) = match rest.strip_prefix('.') {
            Some(after_dot) => {
                let (fraction, scale, has_digits, after_fraction) = leading_fraction(after_dot);
                rest = after_fraction;
                (fraction, scale, has_digits)
            }
            None => (0, 1.0, false),
        };

        if !has_whole && !has_fraction {
            return Err(invalid("expected a number"));
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(invalid("missing unit"));
        }
        let unit = unit_nanos(&rest[..unit_end]).ok_or_else(|| invalid("unknown unit"))?;
        rest = &rest[unit_end..];

        if whole > MAX_NANOS / unit {
            return Err(invalid("value out of range"));
        }
        let mut term = whole * unit;
        if fraction > 0 {
            term += (fraction as f64 * (unit as f64 / scale)) as u64;
            if term > MAX_NANOS {
                return Err(invalid("value out of range"));
            }
        }

        total += term;
        if total > MAX_NANOS {
            return Err(invalid("value out of range"));
        }
    }

    let nanos = if negative {
        if total == MAX_NANOS {
            i64::MIN
        } else {
            -(total as i64)
        }
    } else if total > i64::MAX as u64 {
        return Err(invalid("value out of range"));
    } else {
        total as i64
    };

    Ok(Duration::nanoseconds(nanos))
}

/// Consumes leading ASCII digits. Returns `None` on overflow past `MAX_NANOS`.
fn leading_int(s: &str) -> Option<(u64, bool, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for byte in s[..digits].bytes() {
        if value > MAX_NANOS / 10 {
            return None;
        }
        value = value * 10 + u64::from(byte - b'0');
        if value > MAX_NANOS {
            return None;
        }
    }
    Some((value, digits > 0, &s[digits..]))
}

/// Consumes leading fractional digits. Digits beyond 64-bit precision are
/// skipped rather than rejected.
fn leading_fraction(s: &str) -> (u64, f64, bool, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut saturated = false;
    for byte in s[..digits].bytes() {
        if saturated {
            continue;
        }
        if value > (i64::MAX as u64) / 10 {
            saturated = true;
            continue;
        }
        let next = value * 10 + u64::from(byte - b'0');
        if next > MAX_NANOS {
            saturated = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, digits > 0, &s[digits..])
}
