//! Parsing of human-readable duration strings such as `"180s"` or `"1m30s"`.
//!
//! The grammar matches the duration strings accepted by the hive tooling: a
//! sequence of decimal numbers, each with an optional fraction and a unit
//! suffix. Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. The
//! lone string `"0"` is accepted without a unit.

use std::iter::Peekable;
use std::str::Chars;
use std::time::Duration;

use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Largest representable duration, in nanoseconds (signed 64-bit range).
const MAX_NANOS: u128 = i64::MAX as u128;

/// Fraction digits beyond this precision are ignored.
const MAX_FRACTION_DIGITS: u32 = 18;

/// Errors raised while parsing a duration string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    /// The string is empty or not a sequence of number/unit pairs.
    #[error("invalid duration \"{input}\"")]
    Invalid {
        /// Offending input.
        input: String,
    },
    /// A number was not followed by a unit.
    #[error("missing unit in duration \"{input}\"")]
    MissingUnit {
        /// Offending input.
        input: String,
    },
    /// The unit suffix is not recognised.
    #[error("unknown unit \"{unit}\" in duration \"{input}\"")]
    UnknownUnit {
        /// Unrecognised unit.
        unit: String,
        /// Offending input.
        input: String,
    },
    /// Negative durations cannot be forwarded as wait times.
    #[error("negative duration \"{input}\" is not supported")]
    Negative {
        /// Offending input.
        input: String,
    },
    /// The duration does not fit the supported range.
    #[error("duration \"{input}\" is out of range")]
    Overflow {
        /// Offending input.
        input: String,
    },
}

/// Parses a duration string such as `"5s"`, `"1.5h"` or `"2h45m"`.
///
/// # Errors
///
/// Returns [`DurationParseError`] when the input is empty, negative, lacks a
/// unit, uses an unknown unit or exceeds the supported range.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let mut chars = input.chars().peekable();

    match chars.peek() {
        Some('-') => {
            return Err(DurationParseError::Negative {
                input: input.to_owned(),
            });
        }
        Some('+') => {
            chars.next();
        }
        _ => {}
    }

    if chars.clone().eq("0".chars()) {
        return Ok(Duration::ZERO);
    }
    if chars.peek().is_none() {
        return Err(invalid(input));
    }

    let mut total: u128 = 0;
    while chars.peek().is_some() {
        let component = parse_component(&mut chars, input)?;
        total = total
            .checked_add(component)
            .filter(|nanos| *nanos <= MAX_NANOS)
            .ok_or_else(|| overflow(input))?;
    }

    let nanos = u64::try_from(total).map_err(|_| overflow(input))?;
    Ok(Duration::from_nanos(nanos))
}

/// Parses one `<number>[.<fraction>]<unit>` component, returning nanoseconds.
fn parse_component(
    chars: &mut Peekable<Chars<'_>>,
    input: &str,
) -> Result<u128, DurationParseError> {
    let (whole, whole_digits) = take_integer(chars, input)?;

    let mut fraction: u128 = 0;
    let mut scale: u128 = 1;
    let mut fraction_digits = 0_u32;
    if chars.peek() == Some(&'.') {
        chars.next();
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            chars.next();
            fraction_digits += 1;
            if fraction_digits <= MAX_FRACTION_DIGITS {
                fraction = fraction * 10 + u128::from(digit);
                scale *= 10;
            }
        }
    }
    if whole_digits == 0 && fraction_digits == 0 {
        return Err(invalid(input));
    }

    let unit = take_unit(chars);
    if unit.is_empty() {
        return Err(DurationParseError::MissingUnit {
            input: input.to_owned(),
        });
    }
    let unit_nanos = unit_to_nanos(&unit).ok_or_else(|| DurationParseError::UnknownUnit {
        unit: unit.clone(),
        input: input.to_owned(),
    })?;

    let whole_nanos = whole
        .checked_mul(unit_nanos)
        .ok_or_else(|| overflow(input))?;
    let fraction_nanos = fraction
        .checked_mul(unit_nanos)
        .and_then(|scaled| scaled.checked_div(scale))
        .ok_or_else(|| overflow(input))?;

    whole_nanos
        .checked_add(fraction_nanos)
        .filter(|nanos| *nanos <= MAX_NANOS)
        .ok_or_else(|| overflow(input))
}

fn take_integer(
    chars: &mut Peekable<Chars<'_>>,
    input: &str,
) -> Result<(u128, u32), DurationParseError> {
    let mut value: u128 = 0;
    let mut digits = 0_u32;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        digits += 1;
        value = value
            .checked_mul(10)
            .and_then(|shifted| shifted.checked_add(u128::from(digit)))
            .filter(|candidate| *candidate <= MAX_NANOS)
            .ok_or_else(|| overflow(input))?;
    }
    Ok((value, digits))
}

fn take_unit(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut unit = String::new();
    while let Some(c) = chars.peek().copied() {
        if c == '.' || c.is_ascii_digit() {
            break;
        }
        unit.push(c);
        chars.next();
    }
    unit
}

fn unit_to_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        // U+00B5 micro sign and U+03BC Greek small letter mu.
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

fn invalid(input: &str) -> DurationParseError {
    DurationParseError::Invalid {
        input: input.to_owned(),
    }
}

fn overflow(input: &str) -> DurationParseError {
    DurationParseError::Overflow {
        input: input.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::zero("0", Duration::ZERO)]
    #[case::zero_seconds("0s", Duration::ZERO)]
    #[case::plus_zero("+0", Duration::ZERO)]
    #[case::seconds("5s", Duration::from_secs(5))]
    #[case::explicit_plus("+5s", Duration::from_secs(5))]
    #[case::millis("300ms", Duration::from_millis(300))]
    #[case::micros("250us", Duration::from_micros(250))]
    #[case::micro_sign("250\u{b5}s", Duration::from_micros(250))]
    #[case::nanos("42ns", Duration::from_nanos(42))]
    #[case::minutes("3m", Duration::from_secs(180))]
    #[case::compound("1m30s", Duration::from_secs(90))]
    #[case::hours_minutes("2h45m", Duration::from_secs(2 * 3600 + 45 * 60))]
    #[case::fractional_hours("1.5h", Duration::from_secs(5400))]
    #[case::leading_dot(".5s", Duration::from_millis(500))]
    #[case::trailing_dot("1.s", Duration::from_secs(1))]
    fn parses_valid_durations(#[case] input: &str, #[case] expected: Duration) {
        assert_eq!(parse_duration(input).expect("valid duration"), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::sign_only("+")]
    #[case::dot_only(".s")]
    #[case::unit_only("s")]
    fn rejects_malformed_input(#[case] input: &str) {
        assert!(matches!(
            parse_duration(input),
            Err(DurationParseError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case::bare_number("5")]
    #[case::second_component("1m30")]
    fn rejects_missing_unit(#[case] input: &str) {
        assert!(matches!(
            parse_duration(input),
            Err(DurationParseError::MissingUnit { .. })
        ));
    }

    #[test]
    fn rejects_unknown_unit() {
        let error = parse_duration("5d").expect_err("days are not a unit");
        assert_eq!(
            error,
            DurationParseError::UnknownUnit {
                unit: String::from("d"),
                input: String::from("5d"),
            }
        );
    }

    #[test]
    fn rejects_spaced_unit() {
        assert!(matches!(
            parse_duration("5 s"),
            Err(DurationParseError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn rejects_negative_durations() {
        for case in ["-5s", "-0", "-1.5h"] {
            assert!(
                matches!(
                    parse_duration(case),
                    Err(DurationParseError::Negative { ref input }) if input == case
                ),
                "{case} must be rejected"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_durations() {
        assert!(matches!(
            parse_duration("9999999999h"),
            Err(DurationParseError::Overflow { .. })
        ));
    }

    #[test]
    fn error_message_names_input() {
        let error = parse_duration("soon").expect_err("not a duration");
        assert!(error.to_string().contains("soon"), "got {error}");
    }
}
