//! Numeric helpers that raise kinded errors.
//!
//! `foo` and `bar` are two call layers without handlers: whatever `parse_int`
//! or `divide` raises passes through them unchanged.

use crate::error::{Error, Result};
use crate::kind::{self, Kind};
use std::num::IntErrorKind;

/// Application refinement of [`kind::VALUE`] for rejected inputs.
pub static FOO: Kind = Kind::refine("FooError", &kind::VALUE);

/// Parse a base-10 integer.
///
/// Surrounding whitespace is ignored, a leading `+` or `-` is accepted and
/// single underscores may separate digits (`"1_000"`).
///
/// # Errors
///
/// - [`kind::VALUE`] for anything that is not a decimal integer literal.
/// - [`kind::OVERFLOW`] when the literal does not fit in an `i64`.
pub fn parse_int(s: &str) -> Result<i64> {
    let invalid = || Error::value(format!("invalid literal for int() with base 10: '{s}'"));

    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let bytes = unsigned.as_bytes();
    let well_formed = !bytes.is_empty()
        && bytes.iter().enumerate().all(|(i, &b)| match b {
            b'0'..=b'9' => true,
            b'_' => {
                i > 0
                    && bytes[i - 1].is_ascii_digit()
                    && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
            }
            _ => false,
        });
    if !well_formed {
        return Err(invalid());
    }

    let digits: String = trimmed.chars().filter(|&c| c != '_').collect();
    digits.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::new(
            &kind::OVERFLOW,
            format!("int too large to convert: '{s}'"),
        ),
        _ => invalid(),
    })
}

/// True division of `a` by `b`.
///
/// # Errors
///
/// [`kind::ZERO_DIVISION`] when `b == 0`.
#[track_caller]
pub fn divide(a: i64, b: i64) -> Result<f64> {
    if b == 0 {
        return Err(Error::zero_division("division by zero"));
    }
    Ok(a as f64 / b as f64)
}

/// `10 / int(s)`.
pub fn foo(s: &str) -> Result<f64> {
    divide(10, parse_int(s)?)
}

/// `foo(s) * 2`.
pub fn bar(s: &str) -> Result<f64> {
    Ok(foo(s)? * 2.0)
}

/// Like [`foo`], but rejects zero with a [`FOO`] error before dividing.
pub fn checked_foo(s: &str) -> Result<f64> {
    let n = parse_int(s)?;
    if n == 0 {
        return Err(Error::new(&FOO, format!("invalid value: {s}")));
    }
    divide(10, n)
}

/// Like [`checked_foo`], but raises a plain [`kind::VALUE`] error.
pub fn validated_foo(s: &str) -> Result<f64> {
    let n = parse_int(s)?;
    if n == 0 {
        return Err(Error::value(format!("invalid value: {s}")));
    }
    divide(10, n)
}
