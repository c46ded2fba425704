//! Integer formatting and parsing for bases 2 through 16.
//!
//! The serializer and deserializer move numbers through these routines
//! rather than `core::fmt`, so formatting needs no formatter machinery
//! and parsing reports [`Error::Number`](crate::Error::Number) instead
//! of panicking or wrapping on overflow.
//!
//! Formatting writes into a caller-owned [`NumBuf`] and hands back a
//! borrowed byte slice; nothing here allocates.
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::num::{parse_signed, NumBuf};
//!
//! let mut buf = NumBuf::new();
//! assert_eq!(buf.format_signed(-255, 16), b"-FF");
//! assert_eq!(parse_signed(b"-255", 10), Ok(-255));
//! ```

use crate::error::{Error, Result};

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Scratch space large enough for any 64-bit integer in any supported
/// base: a sign plus 64 binary digits.
#[derive(Clone, Debug)]
pub struct NumBuf {
    bytes: [u8; Self::CAPACITY],
}

impl NumBuf {
    /// Sign byte plus `i64::MIN` in base 2.
    pub const CAPACITY: usize = 65;

    #[must_use]
    pub const fn new() -> Self {
        NumBuf {
            bytes: [0; Self::CAPACITY],
        }
    }

    /// Formats `value` in `base`, minimal digits, uppercase above 9.
    ///
    /// # Panics
    ///
    /// Panics if `base` is outside `2..=16`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stackjson::num::NumBuf;
    ///
    /// let mut buf = NumBuf::new();
    /// assert_eq!(buf.format_unsigned(0, 10), b"0");
    /// assert_eq!(buf.format_unsigned(123, 10), b"123");
    /// assert_eq!(buf.format_unsigned(255, 16), b"FF");
    /// ```
    pub fn format_unsigned(&mut self, value: u64, base: u32) -> &[u8] {
        assert!((2..=16).contains(&base), "base out of range");
        let digits = self.digits_backward(value, u64::from(base));
        &self.bytes[digits..]
    }

    /// Formats `value` in `base` with a leading `-` when negative.
    ///
    /// The magnitude goes through unsigned negation, so `i64::MIN`
    /// formats correctly.
    ///
    /// # Panics
    ///
    /// Panics if `base` is outside `2..=16`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stackjson::num::NumBuf;
    ///
    /// let mut buf = NumBuf::new();
    /// assert_eq!(buf.format_signed(-123, 10), b"-123");
    /// assert_eq!(
    ///     buf.format_signed(i64::MIN, 10),
    ///     b"-9223372036854775808",
    /// );
    /// ```
    pub fn format_signed(&mut self, value: i64, base: u32) -> &[u8] {
        assert!((2..=16).contains(&base), "base out of range");
        let start = self.digits_backward(value.unsigned_abs(), u64::from(base));
        if value < 0 {
            self.bytes[start - 1] = b'-';
            &self.bytes[start - 1..]
        } else {
            &self.bytes[start..]
        }
    }

    /// Fills digits from the end of the buffer toward the front and
    /// returns the index of the first digit. Index 0 stays free for a
    /// sign.
    fn digits_backward(&mut self, mut value: u64, base: u64) -> usize {
        let mut at = Self::CAPACITY;
        loop {
            at -= 1;
            self.bytes[at] = DIGITS[(value % base) as usize];
            value /= base;
            if value == 0 {
                return at;
            }
        }
    }
}

impl Default for NumBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of `byte` as a digit in `base`, if it is one.
#[inline]
fn digit(byte: u8, base: u32) -> Option<u64> {
    let value = match byte {
        b'0'..=b'9' => u32::from(byte - b'0'),
        b'a'..=b'f' => u32::from(byte - b'a') + 10,
        b'A'..=b'F' => u32::from(byte - b'A') + 10,
        _ => return None,
    };
    (value < base).then_some(u64::from(value))
}

/// Parses `text` as an unsigned integer in `base`.
///
/// Fails with [`Error::Number`] on empty input, on any byte that is not
/// a digit for `base`, and on overflow past `u64::MAX`.
///
/// # Panics
///
/// Panics if `base` is outside `2..=16`.
///
/// # Examples
///
/// ```rust
/// use stackjson::num::parse_unsigned;
/// use stackjson::Error;
///
/// assert_eq!(parse_unsigned(b"123", 10), Ok(123));
/// assert_eq!(parse_unsigned(b"ff", 16), Ok(255));
/// assert_eq!(parse_unsigned(b"", 10), Err(Error::Number));
/// assert_eq!(parse_unsigned(b"12x", 10), Err(Error::Number));
/// ```
pub fn parse_unsigned(text: &[u8], base: u32) -> Result<u64> {
    assert!((2..=16).contains(&base), "base out of range");
    if text.is_empty() {
        return Err(Error::Number);
    }
    let mut value: u64 = 0;
    for &byte in text {
        let digit = digit(byte, base).ok_or(Error::Number)?;
        value = value
            .checked_mul(u64::from(base))
            .and_then(|v| v.checked_add(digit))
            .ok_or(Error::Number)?;
    }
    Ok(value)
}

/// Parses `text` as a signed integer in `base`, with one optional
/// leading `-`.
///
/// Fails with [`Error::Number`] whenever [`parse_unsigned`] would, and
/// when the magnitude does not fit `i64`.
///
/// # Panics
///
/// Panics if `base` is outside `2..=16`.
///
/// # Examples
///
/// ```rust
/// use stackjson::num::parse_signed;
/// use stackjson::Error;
///
/// assert_eq!(parse_signed(b"-123", 10), Ok(-123));
/// assert_eq!(parse_signed(b"9223372036854775807", 10), Ok(i64::MAX));
/// assert_eq!(parse_signed(b"-9223372036854775808", 10), Ok(i64::MIN));
/// assert_eq!(parse_signed(b"9223372036854775808", 10), Err(Error::Number));
/// ```
pub fn parse_signed(text: &[u8], base: u32) -> Result<i64> {
    let (negative, digits) = match text {
        [b'-', rest @ ..] => (true, rest),
        _ => (false, text),
    };
    let magnitude = parse_unsigned(digits, base)?;
    if negative {
        if magnitude > i64::MIN.unsigned_abs() {
            return Err(Error::Number);
        }
        Ok(magnitude.wrapping_neg() as i64)
    } else {
        i64::try_from(magnitude).map_err(|_| Error::Number)
    }
}
