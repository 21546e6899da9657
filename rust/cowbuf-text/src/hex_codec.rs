//! Hexadecimal encoding of byte sequences.

use cowbuf_common::{
    Result,
    error::{Codec, DecodingFailure, Error},
};

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
pub(crate) const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[inline]
pub(crate) fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Encodes every byte as two lowercase hex digits, optionally inserting
/// `separator` between bytes.
pub fn encode(input: &[u8], separator: Option<u8>) -> Vec<u8> {
    let per_byte = if separator.is_some() { 3 } else { 2 };
    let mut output = Vec::with_capacity((input.len() * per_byte).saturating_sub(per_byte - 2));
    for (i, &b) in input.iter().enumerate() {
        if let Some(sep) = separator.filter(|_| i > 0) {
            output.push(sep);
        }
        output.push(LOWER_DIGITS[usize::from(b >> 4)]);
        output.push(LOWER_DIGITS[usize::from(b & 0xF)]);
    }
    output
}

/// Decodes a sequence of hex digit pairs. Any character that is not a hex
/// digit, including whitespace and separators, is rejected.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    if let Some(offset) = input.iter().position(|&b| hex_val(b).is_none()) {
        return Err(reject(DecodingFailure::IllegalCharacter, offset));
    }
    if input.len() % 2 != 0 {
        return Err(reject(DecodingFailure::IllegalInputLength, input.len()));
    }
    Ok(input
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect())
}

/// Decodes hex digits, skipping every other character. An odd number of
/// digits is read as if a leading `0` were present.
pub fn decode_lenient(input: &[u8]) -> Vec<u8> {
    let digits: Vec<u8> = input.iter().filter_map(|&b| hex_val(b)).collect();
    let mut output = Vec::with_capacity(digits.len().div_ceil(2));
    let (head, pairs) = digits.split_at(digits.len() % 2);
    output.extend(head.iter().copied());
    output.extend(pairs.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]));
    output
}

#[inline]
fn nibble(b: u8) -> u8 {
    hex_val(b).unwrap_or_default()
}

fn reject(failure: DecodingFailure, offset: usize) -> Error {
    log::debug!("rejected hex input at offset {offset}: {failure}");
    Error::decoding(Codec::Hex, failure, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(b"", None), b"");
        assert_eq!(encode(b"", Some(b':')), b"");
        assert_eq!(encode(&[0x00, 0xAB, 0x7F], None), b"00ab7f");
        assert_eq!(encode(&[0x00, 0xAB, 0x7F], Some(b':')), b"00:ab:7f");
        assert_eq!(encode(&[0x10], Some(b' ')), b"10");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(b"00ab7F").unwrap(), vec![0x00, 0xAB, 0x7F]);
        assert_eq!(decode(b"").unwrap(), b"");

        let err = decode(b"0a b").unwrap_err();
        assert_eq!(err.decoding_failure(), Some(DecodingFailure::IllegalCharacter));
        let err = decode(b"abc").unwrap_err();
        assert_eq!(err.decoding_failure(), Some(DecodingFailure::IllegalInputLength));
    }

    #[test]
    fn test_decode_lenient() {
        assert_eq!(decode_lenient(b"00:ab:7f"), vec![0x00, 0xAB, 0x7F]);
        assert_eq!(decode_lenient(b"abc"), vec![0x0A, 0xBC]);
        assert_eq!(decode_lenient(b"zz"), b"");
        assert_eq!(decode_lenient(b"f"), vec![0x0F]);
    }
}
