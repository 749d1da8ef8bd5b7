#![forbid(unsafe_code)]

//! Coercion of loosely typed content dimensions into pixel counts.
//!
//! Sizes often arrive as strings (`"300px"`, `" 42 "`) or floats produced by
//! layout measurement. Placement only accepts `u32`, so everything passes
//! through here first and a malformed value becomes an error instead of a
//! NaN flowing through the arithmetic.

use std::fmt;

/// Reasons a dimension could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// No leading decimal digits were found.
    NotANumber(String),
    /// The value was negative.
    Negative,
    /// The value was NaN or infinite.
    NotFinite,
    /// The value does not fit in a `u32`.
    Overflow,
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(input) => write!(f, "dimension is not a number: {input:?}"),
            Self::Negative => write!(f, "dimension must not be negative"),
            Self::NotFinite => write!(f, "dimension must be finite"),
            Self::Overflow => write!(f, "dimension exceeds u32::MAX"),
        }
    }
}

impl std::error::Error for DimensionError {}

/// Parse the leading decimal integer of `input`.
///
/// Leading and trailing whitespace and an optional `+` sign are accepted;
/// anything after the digits (units such as `px`, a fractional part) is
/// ignored.
///
/// ```
/// use callout_core::dimension::parse_dimension;
///
/// assert_eq!(parse_dimension("300px"), Ok(300));
/// assert_eq!(parse_dimension(" 12.9 "), Ok(12));
/// assert!(parse_dimension("wide").is_err());
/// ```
pub fn parse_dimension(input: &str) -> Result<u32, DimensionError> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(DimensionError::NotANumber(input.to_string()));
    }
    let digits = &rest[..digits_len];

    if negative {
        // "-0" is still zero.
        return if digits.bytes().all(|b| b == b'0') {
            Ok(0)
        } else {
            Err(DimensionError::Negative)
        };
    }

    digits.parse::<u32>().map_err(|_| DimensionError::Overflow)
}

/// Coerce a floating dimension to whole pixels, truncating toward zero.
///
/// ```
/// use callout_core::dimension::coerce_dimension;
///
/// assert_eq!(coerce_dimension(99.99), Ok(99));
/// assert!(coerce_dimension(f64::NAN).is_err());
/// ```
pub fn coerce_dimension(value: f64) -> Result<u32, DimensionError> {
    if !value.is_finite() {
        return Err(DimensionError::NotFinite);
    }
    let truncated = value.trunc();
    if truncated < 0.0 {
        return Err(DimensionError::Negative);
    }
    if truncated > f64::from(u32::MAX) {
        return Err(DimensionError::Overflow);
    }
    Ok(truncated as u32)
}
