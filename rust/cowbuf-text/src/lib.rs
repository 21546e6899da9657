//! Byte and UTF-16 string types over copy-on-write [`ArrayData`](cowbuf_array::ArrayData)
//! storage, and the text algorithms layered on top: transcoding between
//! UTF-8, UTF-16, UTF-32, Latin-1 and the local 8-bit encoding, Base64, hex
//! and percent encoding, case mapping, ordinal comparison and substring
//! search.

#[macro_use]
mod macros;

pub mod base64_codec;
pub mod case_conversions;
pub mod comparison;
pub mod conversion;
pub mod hex_codec;
pub mod kmp;
pub mod local_codec;
pub mod percent_codec;
pub mod search;
pub mod utf8_validation;

mod byte_array;
mod string;

pub use base64_codec::Base64Options;
pub use byte_array::ByteArray;
pub use comparison::CaseSensitivity;
pub use local_codec::{Latin1Codec, TextCodec, Utf8Codec};
pub use string::Utf16String;
