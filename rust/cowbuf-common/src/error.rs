use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn decoding(codec: Codec, failure: DecodingFailure, offset: usize) -> Error {
        Error(
            ErrorKind::Decoding {
                codec,
                failure,
                offset,
            }
            .into(),
        )
    }

    pub fn invalid_encoding(encoding: &'static str, offset: usize) -> Error {
        Error(ErrorKind::InvalidEncoding { encoding, offset }.into())
    }

    /// Returns the decoding failure kind if this error was produced by one of
    /// the binary-to-text decoders.
    pub fn decoding_failure(&self) -> Option<DecodingFailure> {
        match self.kind() {
            ErrorKind::Decoding { failure, .. } => Some(*failure),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("{codec} decoding failed at offset {offset}: {failure}")]
    Decoding {
        codec: Codec,
        failure: DecodingFailure,
        offset: usize,
    },

    #[error("invalid {encoding} sequence at offset {offset}")]
    InvalidEncoding {
        encoding: &'static str,
        offset: usize,
    },
}

/// Structured failure kinds reported by the strict binary-to-text decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DecodingFailure {
    #[error("illegal character")]
    IllegalCharacter,
    #[error("illegal input length")]
    IllegalInputLength,
    #[error("illegal padding")]
    IllegalPadding,
}

/// Binary-to-text encodings with a strict decoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Base64,
    Hex,
    Percent,
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Codec::Base64 => "base64",
            Codec::Hex => "hex",
            Codec::Percent => "percent",
        };
        f.write_str(name)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
