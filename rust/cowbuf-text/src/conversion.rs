//! Transcoding between UTF-16 code units and external encodings.
//!
//! Lossy conversions replace malformed input with U+FFFD (or `?` when the
//! target cannot represent a character) and never fail. Strict conversions
//! report the offset of the first malformed unit as
//! [`ErrorKind::InvalidEncoding`](cowbuf_common::error::ErrorKind::InvalidEncoding).

use cowbuf_common::{Result, error::Error};

use crate::utf8_validation::from_utf8_lossy_fast;

const REPLACEMENT_CHAR_BYTES: [u8; 3] = [0xEF, 0xBF, 0xBD];
const REPLACEMENT_CHAR_UNIT: u16 = 0xFFFD;

/// Decodes UTF-8 into UTF-16 code units, replacing every maximal malformed
/// subsequence with U+FFFD.
///
/// Returns whether any replacement took place.
pub fn utf8_to_utf16<E: Extend<u16>>(input: &[u8], target: &mut E) -> bool {
    let (text, repaired) = from_utf8_lossy_fast(input);
    target.extend(text.encode_utf16());
    repaired
}

/// Decodes well-formed UTF-8 into UTF-16 code units.
pub fn utf8_to_utf16_strict<E: Extend<u16>>(input: &[u8], target: &mut E) -> Result<()> {
    match simdutf8::compat::from_utf8(input) {
        Ok(text) => {
            target.extend(text.encode_utf16());
            Ok(())
        }
        Err(e) => Err(Error::invalid_encoding("UTF-8", e.valid_up_to())),
    }
}

/// Encodes UTF-16 code units as UTF-8; unpaired surrogates become U+FFFD.
pub fn utf16_to_utf8_lossy<I: Iterator<Item = u16>>(input: I, target: &mut Vec<u8>) {
    let mut dst = [0u8; 4];
    for ch in std::char::decode_utf16(input) {
        match ch {
            Ok(ch) => target.extend(ch.encode_utf8(&mut dst).as_bytes()),
            Err(_) => target.extend(&REPLACEMENT_CHAR_BYTES),
        }
    }
}

/// Encodes UTF-16 code units as UTF-8, failing on the first unpaired
/// surrogate.
pub fn utf16_to_utf8_strict<I: Iterator<Item = u16>>(
    input: I,
    target: &mut Vec<u8>,
) -> Result<()> {
    let mut dst = [0u8; 4];
    let mut offset = 0usize;
    for ch in std::char::decode_utf16(input) {
        let ch = ch.map_err(|_| Error::invalid_encoding("UTF-16", offset))?;
        offset += ch.len_utf16();
        target.extend(ch.encode_utf8(&mut dst).as_bytes());
    }
    Ok(())
}

/// Widens Latin-1 bytes to UTF-16 code units. Lossless.
pub fn latin1_to_utf16<E: Extend<u16>>(input: &[u8], target: &mut E) {
    target.extend(input.iter().map(|&b| u16::from(b)));
}

/// Narrows UTF-16 code units to Latin-1. Every character outside of Latin-1,
/// and every unpaired surrogate, becomes a single `?`.
pub fn utf16_to_latin1<E: Extend<u8>>(input: &[u16], target: &mut E) {
    target.extend(
        std::char::decode_utf16(input.iter().copied())
            .map(|ch| ch.ok().and_then(|ch| u8::try_from(ch).ok()).unwrap_or(b'?')),
    );
}

/// Encodes UTF-32 code points as UTF-16 code units; values that are not
/// Unicode scalar values become U+FFFD.
pub fn utf32_to_utf16_lossy<I: Iterator<Item = u32>, E: Extend<u16>>(input: I, target: &mut E) {
    let mut dst = [0u16; 2];
    for ch in widestring::decode_utf32_lossy(input) {
        target.extend(ch.encode_utf16(&mut dst).iter().copied());
    }
}

/// Encodes UTF-32 code points as UTF-16 code units, failing on the first
/// value that is not a Unicode scalar value.
pub fn utf32_to_utf16_strict<I: Iterator<Item = u32>, E: Extend<u16>>(
    input: I,
    target: &mut E,
) -> Result<()> {
    let mut dst = [0u16; 2];
    for (offset, ch) in widestring::decode_utf32(input).enumerate() {
        let ch = ch.map_err(|_| Error::invalid_encoding("UTF-32", offset))?;
        target.extend(ch.encode_utf16(&mut dst).iter().copied());
    }
    Ok(())
}

/// Decodes UTF-16 code units into UTF-32 code points; unpaired surrogates
/// become U+FFFD.
pub fn utf16_to_utf32<E: Extend<u32>>(input: &[u16], target: &mut E) {
    target.extend(std::char::decode_utf16(input.iter().copied()).map(|ch| {
        ch.map(u32::from)
            .unwrap_or(u32::from(REPLACEMENT_CHAR_UNIT))
    }));
}
