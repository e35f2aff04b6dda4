//! Error types for the keyword codec.

use std::fmt;
use std::io;

use crate::types::EclType;

/// Errors that can occur while encoding, decoding or scanning keywords.
#[derive(Debug)]
pub enum FortioError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A keyword name is empty, longer than 8 bytes, or not printable ASCII.
    InvalidKeywordName {
        /// The rejected name.
        name: String,
    },
    /// A `CHAR` element does not fit its 8-byte slot.
    CharTooLong {
        /// Keyword the element belongs to.
        keyword: String,
        /// The rejected value.
        value: String,
    },
    /// The 4-byte type tag is not one of the known types.
    UnknownType {
        /// The tag as found on disk.
        tag: [u8; 4],
    },
    /// A record could not be decoded (truncated or corrupt data).
    MalformedRecord {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A keyword has a different type than the caller required.
    TypeMismatch {
        /// Keyword name.
        keyword: String,
        /// Required type.
        expected: EclType,
        /// Type found.
        found: EclType,
    },
}

impl fmt::Display for FortioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidKeywordName { name } => {
                write!(f, "invalid keyword name {name:?}: must be 1 to 8 ASCII characters")
            }
            Self::CharTooLong { keyword, value } => {
                write!(f, "CHAR value {value:?} in {keyword} exceeds 8 characters")
            }
            Self::UnknownType { tag } => {
                write!(f, "unknown type tag {:?}", String::from_utf8_lossy(tag))
            }
            Self::MalformedRecord { detail } => write!(f, "malformed record: {detail}"),
            Self::TypeMismatch {
                keyword,
                expected,
                found,
            } => write!(f, "keyword {keyword} has type {found}, expected {expected}"),
        }
    }
}

impl std::error::Error for FortioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FortioError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
