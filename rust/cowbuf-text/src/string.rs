use std::fmt;

use cowbuf_array::ArrayData;
use cowbuf_common::Result;

use crate::{byte_array::ByteArray, case_conversions, conversion, local_codec};

/// A copy-on-write string of UTF-16 code units.
///
/// The content is not required to be well-formed: unpaired surrogates are
/// stored as they are and only replaced when converting to another encoding.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utf16String(ArrayData<u16>);

impl_code_unit_array!(Utf16String, u16);

impl Utf16String {
    // Conversions collect into a `Vec` first: the result is sized to its
    // content and does not carry a reserved capacity.

    /// Decodes UTF-8, replacing every maximal malformed subsequence with
    /// U+FFFD.
    pub fn from_utf8(data: &[u8]) -> Utf16String {
        let mut units: Vec<u16> = Vec::with_capacity(data.len());
        conversion::utf8_to_utf16(data, &mut units);
        units.into()
    }

    /// Decodes UTF-8, failing on the first malformed sequence.
    pub fn from_utf8_strict(data: &[u8]) -> Result<Utf16String> {
        let mut units: Vec<u16> = Vec::with_capacity(data.len());
        conversion::utf8_to_utf16_strict(data, &mut units)?;
        Ok(units.into())
    }

    /// Encodes as UTF-8; unpaired surrogates become U+FFFD.
    pub fn to_utf8(&self) -> ByteArray {
        let mut bytes: Vec<u8> = Vec::with_capacity(self.len() * 3);
        conversion::utf16_to_utf8_lossy(self.iter().copied(), &mut bytes);
        bytes.into()
    }

    /// Encodes as UTF-8, failing on the first unpaired surrogate.
    pub fn to_utf8_strict(&self) -> Result<ByteArray> {
        let mut bytes: Vec<u8> = Vec::with_capacity(self.len() * 3);
        conversion::utf16_to_utf8_strict(self.iter().copied(), &mut bytes)?;
        Ok(bytes.into())
    }

    pub fn from_latin1(data: &[u8]) -> Utf16String {
        let mut units: Vec<u16> = Vec::with_capacity(data.len());
        conversion::latin1_to_utf16(data, &mut units);
        units.into()
    }

    /// Encodes as Latin-1; every character outside of Latin-1 becomes `?`.
    pub fn to_latin1(&self) -> ByteArray {
        let mut bytes: Vec<u8> = Vec::with_capacity(self.len());
        conversion::utf16_to_latin1(self, &mut bytes);
        bytes.into()
    }

    /// Decodes text in the process-wide local 8-bit encoding.
    pub fn from_local_8bit(data: &[u8]) -> Utf16String {
        let mut units: Vec<u16> = Vec::with_capacity(data.len());
        local_codec::local_codec().decode(data, &mut units);
        units.into()
    }

    /// Encodes the text in the process-wide local 8-bit encoding.
    pub fn to_local_8bit(&self) -> ByteArray {
        let mut bytes: Vec<u8> = Vec::with_capacity(self.len());
        local_codec::local_codec().encode(self, &mut bytes);
        bytes.into()
    }

    /// Encodes UTF-32 code points; values that are not Unicode scalar values
    /// become U+FFFD.
    pub fn from_ucs4(data: &[u32]) -> Utf16String {
        let mut units: Vec<u16> = Vec::with_capacity(data.len());
        conversion::utf32_to_utf16_lossy(data.iter().copied(), &mut units);
        units.into()
    }

    /// Encodes UTF-32 code points, failing on the first value that is not a
    /// Unicode scalar value.
    pub fn from_ucs4_strict(data: &[u32]) -> Result<Utf16String> {
        let mut units: Vec<u16> = Vec::with_capacity(data.len());
        conversion::utf32_to_utf16_strict(data.iter().copied(), &mut units)?;
        Ok(units.into())
    }

    /// Decodes into UTF-32 code points; unpaired surrogates become U+FFFD.
    pub fn to_ucs4(&self) -> ArrayData<u32> {
        let mut ucs4: Vec<u32> = Vec::with_capacity(self.len());
        conversion::utf16_to_utf32(self, &mut ucs4);
        ucs4.into()
    }

    pub fn append_str(&mut self, s: &str) {
        self.0.extend(s.encode_utf16());
    }

    pub fn push_char(&mut self, ch: char) {
        let mut dst = [0u16; 2];
        self.0.append(ch.encode_utf16(&mut dst));
    }

    /// Iterates over the characters; unpaired surrogates are reported as
    /// errors.
    pub fn chars(&self) -> std::char::DecodeUtf16<std::iter::Copied<std::slice::Iter<'_, u16>>> {
        std::char::decode_utf16(self.0.as_slice().iter().copied())
    }

    pub fn to_lower(&self) -> Utf16String {
        let mut units: Vec<u16> = Vec::with_capacity(self.len());
        case_conversions::utf16_to_lowercase(self, &mut units);
        units.into()
    }

    pub fn to_upper(&self) -> Utf16String {
        let mut units: Vec<u16> = Vec::with_capacity(self.len());
        case_conversions::utf16_to_uppercase(self, &mut units);
        units.into()
    }
}

impl From<&str> for Utf16String {
    fn from(s: &str) -> Self {
        s.encode_utf16().collect::<Vec<u16>>().into()
    }
}

impl From<String> for Utf16String {
    fn from(s: String) -> Self {
        Utf16String::from(s.as_str())
    }
}

impl PartialEq<str> for Utf16String {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for Utf16String {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl fmt::Display for Utf16String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for ch in self.chars() {
            f.write_char(ch.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Utf16String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char('"')?;
        for ch in self.chars() {
            match ch {
                Ok(ch) => write!(f, "{}", ch.escape_debug())?,
                Err(e) => write!(f, "\\u{{{:x}}}", e.unpaired_surrogate())?,
            }
        }
        f.write_char('"')
    }
}
