use std::fmt;

use cowbuf_array::ArrayData;
use cowbuf_common::Result;

use crate::{
    base64_codec::{self, Base64Options},
    case_conversions::CodeUnitCase,
    hex_codec, percent_codec,
};

/// A copy-on-write array of bytes.
///
/// Case mappings treat the bytes as Latin-1 text.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteArray(ArrayData<u8>);

impl_code_unit_array!(ByteArray, u8);

impl ByteArray {
    /// Returns a copy with every byte mapped to lower case.
    pub fn to_lower(&self) -> ByteArray {
        self.map_units(CodeUnitCase::to_lower_unit)
    }

    /// Returns a copy with every byte mapped to upper case.
    pub fn to_upper(&self) -> ByteArray {
        self.map_units(CodeUnitCase::to_upper_unit)
    }

    fn map_units(&self, map: fn(u8) -> u8) -> ByteArray {
        // Shares the storage when nothing changes.
        match self.iter().position(|&b| map(b) != b) {
            None => self.clone(),
            Some(first) => {
                let mut mapped = self.clone();
                for b in &mut mapped.as_mut_slice()[first..] {
                    *b = map(*b);
                }
                mapped
            }
        }
    }

    pub fn to_base64(&self, options: Base64Options) -> ByteArray {
        base64_codec::encode(self, options).into_bytes().into()
    }

    /// Decodes Base64 text. Fails only when `options` contains
    /// [`Base64Options::ABORT_ON_DECODING_ERRORS`].
    pub fn from_base64(data: &[u8], options: Base64Options) -> Result<ByteArray> {
        base64_codec::decode(data, options).map(ByteArray::from)
    }

    /// Returns the lowercase hex encoding, with `separator` between bytes.
    pub fn to_hex(&self, separator: Option<u8>) -> ByteArray {
        hex_codec::encode(self, separator).into()
    }

    pub fn from_hex(data: &[u8]) -> Result<ByteArray> {
        hex_codec::decode(data).map(ByteArray::from)
    }

    /// Decodes hex digits, skipping any other character.
    pub fn from_hex_lenient(data: &[u8]) -> ByteArray {
        hex_codec::decode_lenient(data).into()
    }

    /// Percent-encodes the bytes with `%` as escape character.
    pub fn to_percent_encoding(&self, exclude: &[u8], include: &[u8]) -> ByteArray {
        percent_codec::encode(self, exclude, include, b'%').into()
    }

    /// Percent-encodes the bytes with a custom escape character, which must
    /// be a printable ASCII character other than a hex digit.
    pub fn to_percent_encoding_with(
        &self,
        exclude: &[u8],
        include: &[u8],
        percent: u8,
    ) -> Result<ByteArray> {
        percent_codec::verify_percent(percent)?;
        Ok(percent_codec::encode(self, exclude, include, percent).into())
    }

    pub fn from_percent_encoding(data: &[u8]) -> Result<ByteArray> {
        percent_codec::decode(data, b'%').map(ByteArray::from)
    }

    /// Decodes percent escapes introduced by `percent`, copying malformed
    /// escapes through unchanged.
    pub fn from_percent_encoding_lenient(data: &[u8], percent: u8) -> ByteArray {
        percent_codec::decode_lenient(data, percent).into()
    }
}

impl From<&str> for ByteArray {
    fn from(s: &str) -> Self {
        ByteArray::from_slice(s.as_bytes())
    }
}

impl<const N: usize> PartialEq<[u8; N]> for ByteArray {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl PartialEq<&[u8]> for ByteArray {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl fmt::Debug for ByteArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"{}\"", self.as_slice().escape_ascii())
    }
}
