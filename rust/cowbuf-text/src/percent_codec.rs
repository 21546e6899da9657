//! Percent encoding (RFC 3986) with a configurable escape character.

use cowbuf_common::{
    Result,
    error::{Codec, DecodingFailure, Error},
    verify_arg,
};

use crate::hex_codec::{UPPER_DIGITS, hex_val};

#[inline]
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Checks that `percent` can serve as the escape character.
pub fn verify_percent(percent: u8) -> Result<()> {
    verify_arg!(percent, percent.is_ascii_graphic() && !percent.is_ascii_hexdigit());
    Ok(())
}

/// Percent-encodes `input`.
///
/// Unreserved characters are kept unless listed in `include`; bytes listed in
/// `exclude` are always kept. The escape character itself is always encoded.
pub fn encode(input: &[u8], exclude: &[u8], include: &[u8], percent: u8) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    for &b in input {
        let keep = b != percent
            && ((is_unreserved(b) && !include.contains(&b)) || exclude.contains(&b));
        if keep {
            output.push(b);
        } else {
            output.extend([
                percent,
                UPPER_DIGITS[usize::from(b >> 4)],
                UPPER_DIGITS[usize::from(b & 0xF)],
            ]);
        }
    }
    output
}

/// Decodes `input`, failing on an escape that is truncated or not followed by
/// two hex digits.
pub fn decode(input: &[u8], percent: u8) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        let b = input[i];
        if b != percent {
            output.push(b);
            i += 1;
            continue;
        }
        if i + 2 >= input.len() {
            return Err(reject(DecodingFailure::IllegalInputLength, i));
        }
        let hi = hex_val(input[i + 1])
            .ok_or_else(|| reject(DecodingFailure::IllegalCharacter, i + 1))?;
        let lo = hex_val(input[i + 2])
            .ok_or_else(|| reject(DecodingFailure::IllegalCharacter, i + 2))?;
        output.push((hi << 4) | lo);
        i += 3;
    }
    Ok(output)
}

/// Decodes `input`, copying malformed escapes through unchanged.
pub fn decode_lenient(input: &[u8], percent: u8) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        let b = input[i];
        let escaped = (b == percent)
            .then(|| Some((hex_val(*input.get(i + 1)?)?, hex_val(*input.get(i + 2)?)?)))
            .flatten();
        match escaped {
            Some((hi, lo)) => {
                output.push((hi << 4) | lo);
                i += 3;
            }
            None => {
                output.push(b);
                i += 1;
            }
        }
    }
    output
}

fn reject(failure: DecodingFailure, offset: usize) -> Error {
    log::debug!("rejected percent-encoded input at offset {offset}: {failure}");
    Error::decoding(Codec::Percent, failure, offset)
}
