//! The process-wide codec used for "local 8-bit" text.
//!
//! The codec is chosen once, either explicitly with [`set_local_codec`] or
//! lazily from the locale environment variables on first use, and is
//! read-only afterwards.

use std::sync::OnceLock;

use cowbuf_common::{Result, error::Error};

use crate::conversion;

/// Converts between UTF-16 code units and an 8-bit external encoding.
///
/// Conversions are best effort: decoding replaces malformed input with U+FFFD,
/// encoding replaces unrepresentable characters with a substitute.
pub trait TextCodec: Send + Sync + std::fmt::Debug {
    /// The canonical name of the encoding.
    fn name(&self) -> &'static str;

    /// Appends the UTF-16 decoding of `input` to `target`.
    fn decode(&self, input: &[u8], target: &mut Vec<u16>);

    /// Appends the encoding of `input` to `target`.
    fn encode(&self, input: &[u16], target: &mut Vec<u8>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl TextCodec for Utf8Codec {
    fn name(&self) -> &'static str {
        "UTF-8"
    }

    fn decode(&self, input: &[u8], target: &mut Vec<u16>) {
        conversion::utf8_to_utf16(input, target);
    }

    fn encode(&self, input: &[u16], target: &mut Vec<u8>) {
        conversion::utf16_to_utf8_lossy(input.iter().copied(), target);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1Codec;

impl TextCodec for Latin1Codec {
    fn name(&self) -> &'static str {
        "ISO-8859-1"
    }

    fn decode(&self, input: &[u8], target: &mut Vec<u16>) {
        conversion::latin1_to_utf16(input, target);
    }

    fn encode(&self, input: &[u16], target: &mut Vec<u8>) {
        conversion::utf16_to_latin1(input, target);
    }
}

static UTF8_CODEC: Utf8Codec = Utf8Codec;
static LATIN1_CODEC: Latin1Codec = Latin1Codec;

static LOCAL_CODEC: OnceLock<&'static dyn TextCodec> = OnceLock::new();

const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Returns the local 8-bit codec, selecting it from the environment on first
/// use.
pub fn local_codec() -> &'static dyn TextCodec {
    *LOCAL_CODEC.get_or_init(|| {
        let codec = codec_from_env();
        log::debug!("local 8-bit codec selected from environment: {}", codec.name());
        codec
    })
}

/// Installs the local 8-bit codec.
///
/// Fails with `InvalidOperation` once a codec is in place, including one
/// selected implicitly by an earlier [`local_codec`] call.
pub fn set_local_codec(codec: &'static dyn TextCodec) -> Result<()> {
    LOCAL_CODEC
        .set(codec)
        .map_err(|_| Error::invalid_operation("set_local_codec: codec already selected"))?;
    log::debug!("local 8-bit codec installed: {}", codec.name());
    Ok(())
}

/// Returns the codec for a POSIX locale name such as `de_DE.UTF-8`,
/// `en_US.ISO-8859-1@euro` or `C`.
///
/// The plain `C`/`POSIX` locales map to Latin-1; any codeset other than
/// Latin-1 maps to UTF-8.
pub fn codec_for_locale(locale: &str) -> &'static dyn TextCodec {
    let locale = locale.split('@').next().unwrap_or_default();
    if locale == "C" || locale == "POSIX" {
        return &LATIN1_CODEC;
    }
    let codeset = match locale.split_once('.') {
        Some((_, codeset)) => codeset,
        None => return &UTF8_CODEC,
    };
    let normalized: String = codeset
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    match normalized.as_str() {
        "iso88591" | "latin1" | "l1" => &LATIN1_CODEC,
        _ => &UTF8_CODEC,
    }
}

fn codec_from_env() -> &'static dyn TextCodec {
    LOCALE_VARIABLES
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
        .map_or(&UTF8_CODEC as &dyn TextCodec, |value| codec_for_locale(&value))
}
