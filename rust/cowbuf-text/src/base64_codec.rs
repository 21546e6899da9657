//! Base64 encoding and decoding in the standard and URL-safe alphabets.
//!
//! Decoding runs in one of two modes. The lenient mode (the default) skips
//! bytes outside of the alphabet, stops at the first `=` and drops a dangling
//! sixth-bit character; it never fails. The strict mode
//! ([`Base64Options::ABORT_ON_DECODING_ERRORS`]) rejects any malformed input
//! with a [`DecodingFailure`] and the offset of the offending byte.

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use bitflags::bitflags;
use cowbuf_common::{
    Result,
    error::{Codec, DecodingFailure, Error},
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Base64Options: u32 {
        /// Use the URL-safe alphabet (`-` and `_` instead of `+` and `/`).
        const URL_ENCODING = 1;
        /// Do not pad the encoded output with `=`.
        const OMIT_TRAILING_EQUALS = 2;
        /// Fail on malformed input instead of skipping it.
        const ABORT_ON_DECODING_ERRORS = 4;
    }
}

const fn engine_config(padding: bool) -> GeneralPurposeConfig {
    GeneralPurposeConfig::new()
        .with_encode_padding(padding)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true)
}

const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, engine_config(true));
const STANDARD_NO_PAD: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, engine_config(false));
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, engine_config(true));
const URL_SAFE_NO_PAD: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, engine_config(false));

fn engine(options: Base64Options) -> &'static GeneralPurpose {
    let url = options.contains(Base64Options::URL_ENCODING);
    let pad = !options.contains(Base64Options::OMIT_TRAILING_EQUALS);
    match (url, pad) {
        (false, true) => &STANDARD,
        (false, false) => &STANDARD_NO_PAD,
        (true, true) => &URL_SAFE,
        (true, false) => &URL_SAFE_NO_PAD,
    }
}

#[inline]
fn is_alphabet_byte(b: u8, options: Base64Options) -> bool {
    match b {
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => true,
        b'+' | b'/' => !options.contains(Base64Options::URL_ENCODING),
        b'-' | b'_' => options.contains(Base64Options::URL_ENCODING),
        _ => false,
    }
}

/// Encodes `input` as Base64 text.
pub fn encode(input: &[u8], options: Base64Options) -> String {
    engine(options).encode(input)
}

/// Decodes Base64 text in the mode selected by `options`.
///
/// Only the strict mode can fail.
pub fn decode(input: &[u8], options: Base64Options) -> Result<Vec<u8>> {
    if options.contains(Base64Options::ABORT_ON_DECODING_ERRORS) {
        decode_strict(input, options).inspect_err(|e| {
            log::debug!("rejected base64 input of {} bytes: {e}", input.len());
        })
    } else {
        Ok(decode_lenient(input, options))
    }
}

fn decode_strict(input: &[u8], options: Base64Options) -> Result<Vec<u8>> {
    let data_len = input
        .iter()
        .position(|&b| b == b'=')
        .unwrap_or(input.len());
    let (data, padding) = input.split_at(data_len);

    if let Some(offset) = data.iter().position(|&b| !is_alphabet_byte(b, options)) {
        return Err(Error::decoding(
            Codec::Base64,
            DecodingFailure::IllegalCharacter,
            offset,
        ));
    }
    if let Some(offset) = padding.iter().position(|&b| b != b'=') {
        return Err(Error::decoding(
            Codec::Base64,
            DecodingFailure::IllegalPadding,
            data_len + offset,
        ));
    }
    if padding.len() > 2 {
        return Err(Error::decoding(
            Codec::Base64,
            DecodingFailure::IllegalPadding,
            data_len + 2,
        ));
    }
    if !padding.is_empty() && input.len() % 4 != 0 {
        return Err(Error::decoding(
            Codec::Base64,
            DecodingFailure::IllegalInputLength,
            input.len(),
        ));
    }
    if data_len % 4 == 1 {
        return Err(Error::decoding(
            Codec::Base64,
            DecodingFailure::IllegalInputLength,
            data_len,
        ));
    }

    engine(options).decode(data).map_err(|e| {
        let (failure, offset) = match e {
            base64::DecodeError::InvalidByte(offset, _)
            | base64::DecodeError::InvalidLastSymbol(offset, _) => {
                (DecodingFailure::IllegalCharacter, offset)
            }
            base64::DecodeError::InvalidLength(offset) => {
                (DecodingFailure::IllegalInputLength, offset)
            }
            base64::DecodeError::InvalidPadding => (DecodingFailure::IllegalPadding, data_len),
        };
        Error::decoding(Codec::Base64, failure, offset)
    })
}

fn decode_lenient(input: &[u8], options: Base64Options) -> Vec<u8> {
    let mut data: Vec<u8> = input
        .iter()
        .copied()
        .take_while(|&b| b != b'=')
        .filter(|&b| is_alphabet_byte(b, options))
        .collect();
    if data.len() % 4 == 1 {
        data.pop();
    }
    engine(options).decode(&data).unwrap_or_else(|e| {
        log::debug!("lenient base64 decoding gave up: {e}");
        Vec::new()
    })
}
