//! Base64 codec for binary buffer values.
//!
//! Standard alphabet (`A-Z a-z 0-9 + /`) with `=` padding. Byte buffer
//! values travel through JSON as base64 inside string literals, so the
//! serializer and deserializer both route through this module; the
//! functions are public because the encoding is useful on its own.
//!
//! Decoding skips ASCII whitespace, treats the first `=` as end of
//! data, and checks destination capacity before each output group is
//! written. Both an invalid character and a too-small destination fail
//! with [`Error::Format`](crate::Error::Format); encoding into a
//! too-small destination fails with [`Error::Space`](crate::Error::Space).
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::base64::{decode, encode, encoded_len};
//!
//! let mut text = [0u8; 8];
//! let used = encode(b"HELLO\0", &mut text).unwrap();
//! assert_eq!(&text[..used], b"SEVMTE8A");
//! assert_eq!(used, encoded_len(6));
//!
//! let mut bytes = [0u8; 8];
//! let used = decode(b"SEVMTE8A", &mut bytes).unwrap();
//! assert_eq!(&bytes[..used], b"HELLO\0");
//! ```

use core::cell::Cell;

use crate::error::{Error, Result};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Exact encoded length for `len` input bytes: `4 * ceil(len / 3)`.
#[must_use]
pub const fn encoded_len(len: usize) -> usize {
    4 * (len / 3 + (len % 3 != 0) as usize)
}

/// Value of `byte` in the alphabet, if it is part of it.
#[inline]
fn sextet(byte: u8) -> Option<u32> {
    match byte {
        b'A'..=b'Z' => Some(u32::from(byte - b'A')),
        b'a'..=b'z' => Some(u32::from(byte - b'a') + 26),
        b'0'..=b'9' => Some(u32::from(byte - b'0') + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

/// Encodes one input chunk of 1 to 3 bytes into 4 output characters,
/// padding with `=`.
pub(crate) fn encode_group(chunk: &[u8]) -> [u8; 4] {
    debug_assert!(!chunk.is_empty() && chunk.len() <= 3);
    let a = u32::from(chunk[0]);
    let b = u32::from(chunk.get(1).copied().unwrap_or(0));
    let c = u32::from(chunk.get(2).copied().unwrap_or(0));
    let triple = (a << 16) | (b << 8) | c;
    let mut out = [
        ALPHABET[(triple >> 18) as usize & 0x3F],
        ALPHABET[(triple >> 12) as usize & 0x3F],
        ALPHABET[(triple >> 6) as usize & 0x3F],
        ALPHABET[triple as usize & 0x3F],
    ];
    if chunk.len() < 3 {
        out[3] = b'=';
    }
    if chunk.len() < 2 {
        out[2] = b'=';
    }
    out
}

/// Encodes `input` into `output`, returning the number of bytes written.
///
/// Fails with [`Error::Space`] when `output` is shorter than
/// [`encoded_len`]`(input.len())`.
///
/// # Examples
///
/// ```rust
/// use stackjson::base64::encode;
/// use stackjson::Error;
///
/// let mut out = [0u8; 4];
/// assert_eq!(encode(b"ab", &mut out), Ok(4));
/// assert_eq!(&out, b"YWI=");
/// assert_eq!(encode(b"abcd", &mut out), Err(Error::Space));
/// ```
pub fn encode(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let needed = encoded_len(input.len());
    if output.len() < needed {
        return Err(Error::Space);
    }
    let mut at = 0;
    for chunk in input.chunks(3) {
        output[at..at + 4].copy_from_slice(&encode_group(chunk));
        at += 4;
    }
    Ok(needed)
}

/// Decodes `input` into `output`, returning the number of bytes written.
///
/// ASCII whitespace is skipped; the first `=` ends the data and the
/// remainder of `input` is ignored. A trailing lone sextet carries no
/// whole byte and is dropped. Fails with [`Error::Format`] on any other
/// byte outside the alphabet or when `output` cannot hold the decoded
/// data.
///
/// # Examples
///
/// ```rust
/// use stackjson::base64::decode;
/// use stackjson::Error;
///
/// let mut out = [0u8; 4];
/// assert_eq!(decode(b"YWI=", &mut out), Ok(2));
/// assert_eq!(&out[..2], b"ab");
/// assert_eq!(decode(b"Y!I=", &mut out), Err(Error::Format));
/// ```
pub fn decode(input: &[u8], output: &mut [u8]) -> Result<usize> {
    decode_cells(input, Cell::from_mut(output).as_slice_of_cells())
}

/// [`decode`] writing through shared storage, for buffer values bound
/// into a tree.
pub(crate) fn decode_cells(input: &[u8], output: &[Cell<u8>]) -> Result<usize> {
    let mut acc: u32 = 0;
    let mut sextets = 0;
    let mut len = 0;

    for &byte in input {
        if byte.is_ascii_whitespace() {
            continue;
        }
        if byte == b'=' {
            break;
        }
        acc = (acc << 6) | sextet(byte).ok_or(Error::Format)?;
        sextets += 1;
        if sextets == 4 {
            if len + 3 > output.len() {
                return Err(Error::Format);
            }
            output[len].set((acc >> 16) as u8);
            output[len + 1].set((acc >> 8) as u8);
            output[len + 2].set(acc as u8);
            len += 3;
            acc = 0;
            sextets = 0;
        }
    }

    match sextets {
        3 => {
            if len + 2 > output.len() {
                return Err(Error::Format);
            }
            output[len].set((acc >> 10) as u8);
            output[len + 1].set((acc >> 2) as u8);
            len += 2;
        }
        2 => {
            if len + 1 > output.len() {
                return Err(Error::Format);
            }
            output[len].set((acc >> 4) as u8);
            len += 1;
        }
        _ => {}
    }

    Ok(len)
}
