//! Build version reporting.
//!
//! The version word packs `major.minor.patch` into the low three
//! bytes, one byte per part, with the compiled feature set in the byte
//! above them. Embedded peers use it to check codec compatibility over
//! a wire or a log line without string handling.

use crate::error::{Error, Result};

/// One dotted part of `CARGO_PKG_VERSION`, parsed at compile time.
/// Parts must fit the one-byte packing.
const fn part(text: &str) -> u32 {
    let bytes = text.as_bytes();
    let mut value = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i].wrapping_sub(b'0');
        assert!(digit < 10, "version parts must be decimal");
        value = value * 10 + digit as u32;
        i += 1;
    }
    assert!(value <= 0xFF, "version parts must fit one byte");
    value
}

const TRIPLE: u32 = part(env!("CARGO_PKG_VERSION_MAJOR")) << 16
    | part(env!("CARGO_PKG_VERSION_MINOR")) << 8
    | part(env!("CARGO_PKG_VERSION_PATCH"));

const FEATURES: u32 = cfg!(feature = "escape") as u32
    | (cfg!(feature = "walk") as u32) << 1
    | (cfg!(feature = "std") as u32) << 2;

/// The version word for this build.
///
/// Bits 0..24 hold `major.minor.patch` (patch in the least significant
/// byte); bits 24.. hold the feature bitmask: bit 24 `escape`, bit 25
/// `walk`, bit 26 `std`. An unstamped 0.0.0 build fails with
/// [`Error::Version`].
///
/// ```rust
/// let word = stackjson::version().unwrap();
/// assert_ne!(word & 0x00FF_FFFF, 0);
/// ```
pub fn version() -> Result<u32> {
    if TRIPLE == 0 {
        return Err(Error::Version);
    }
    Ok(FEATURES << 24 | TRIPLE)
}
