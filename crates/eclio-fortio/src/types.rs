//! Keyword types and in-memory keyword values.

use std::fmt;

use crate::error::FortioError;
use crate::{BLOCK_SIZE, CHAR_BLOCK_SIZE, CHAR_LEN};

/// Element type of a keyword, as written in the 4-byte header tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EclType {
    /// 32-bit signed integer.
    Inte,
    /// 32-bit float.
    Real,
    /// 64-bit float.
    Doub,
    /// Logical, stored as a 32-bit integer (`-1` true, `0` false).
    Logi,
    /// 8-byte space-padded string.
    Char,
    /// Message marker with no data.
    Mess,
}

impl EclType {
    /// The on-disk tag.
    pub fn tag(self) -> &'static [u8; 4] {
        match self {
            Self::Inte => b"INTE",
            Self::Real => b"REAL",
            Self::Doub => b"DOUB",
            Self::Logi => b"LOGI",
            Self::Char => b"CHAR",
            Self::Mess => b"MESS",
        }
    }

    /// Parse an on-disk tag.
    pub fn from_tag(tag: &[u8; 4]) -> Result<Self, FortioError> {
        match tag {
            b"INTE" => Ok(Self::Inte),
            b"REAL" => Ok(Self::Real),
            b"DOUB" => Ok(Self::Doub),
            b"LOGI" => Ok(Self::Logi),
            b"CHAR" => Ok(Self::Char),
            b"MESS" => Ok(Self::Mess),
            _ => Err(FortioError::UnknownType { tag: *tag }),
        }
    }

    /// Bytes per element (0 for `MESS`).
    pub fn element_size(self) -> usize {
        match self {
            Self::Inte | Self::Real | Self::Logi => 4,
            Self::Doub => 8,
            Self::Char => CHAR_LEN,
            Self::Mess => 0,
        }
    }

    /// Maximum elements per data block.
    pub fn block_size(self) -> usize {
        match self {
            Self::Char => CHAR_BLOCK_SIZE,
            _ => BLOCK_SIZE,
        }
    }
}

impl fmt::Display for EclType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(std::str::from_utf8(self.tag()).unwrap_or("????"))
    }
}

/// Keyword payload.
#[derive(Clone, Debug, PartialEq)]
pub enum KeywordData {
    /// `INTE` values.
    Inte(Vec<i32>),
    /// `REAL` values.
    Real(Vec<f32>),
    /// `DOUB` values.
    Doub(Vec<f64>),
    /// `LOGI` values.
    Logi(Vec<bool>),
    /// `CHAR` values, trailing padding removed.
    Char(Vec<String>),
    /// `MESS` marker.
    Mess,
}

impl KeywordData {
    /// Element type.
    pub fn ecl_type(&self) -> EclType {
        match self {
            Self::Inte(_) => EclType::Inte,
            Self::Real(_) => EclType::Real,
            Self::Doub(_) => EclType::Doub,
            Self::Logi(_) => EclType::Logi,
            Self::Char(_) => EclType::Char,
            Self::Mess => EclType::Mess,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Inte(v) => v.len(),
            Self::Real(v) => v.len(),
            Self::Doub(v) => v.len(),
            Self::Logi(v) => v.len(),
            Self::Char(v) => v.len(),
            Self::Mess => 0,
        }
    }

    /// Whether the payload holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decoded keyword header record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordHeader {
    /// Keyword name, without padding.
    pub name: String,
    /// Number of elements in the data records.
    pub count: usize,
    /// Element type.
    pub ecl_type: EclType,
}

/// A named keyword with its payload.
///
/// # Examples
///
/// ```
/// use eclio_fortio::{EclKeyword, EclType};
///
/// let kw = EclKeyword::inte("SEQNUM", vec![3]);
/// assert_eq!(kw.ecl_type(), EclType::Inte);
/// assert_eq!(kw.as_inte().unwrap(), &[3]);
/// assert!(kw.as_doub().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EclKeyword {
    /// Keyword name, without padding.
    pub name: String,
    /// Payload.
    pub data: KeywordData,
}

impl EclKeyword {
    /// Build an `INTE` keyword.
    pub fn inte(name: impl Into<String>, values: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            data: KeywordData::Inte(values),
        }
    }

    /// Build a `REAL` keyword.
    pub fn real(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            data: KeywordData::Real(values),
        }
    }

    /// Build a `DOUB` keyword.
    pub fn doub(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: KeywordData::Doub(values),
        }
    }

    /// Build a `LOGI` keyword.
    pub fn logi(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self {
            name: name.into(),
            data: KeywordData::Logi(values),
        }
    }

    /// Build a `CHAR` keyword.
    pub fn chars(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: KeywordData::Char(values),
        }
    }

    /// Build a `MESS` keyword.
    pub fn mess(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: KeywordData::Mess,
        }
    }

    /// `INTE` values, or [`FortioError::TypeMismatch`].
    pub fn as_inte(&self) -> Result<&[i32], FortioError> {
        match &self.data {
            KeywordData::Inte(v) => Ok(v),
            other => Err(self.mismatch(EclType::Inte, other.ecl_type())),
        }
    }

    /// `REAL` values, or [`FortioError::TypeMismatch`].
    pub fn as_real(&self) -> Result<&[f32], FortioError> {
        match &self.data {
            KeywordData::Real(v) => Ok(v),
            other => Err(self.mismatch(EclType::Real, other.ecl_type())),
        }
    }

    /// `DOUB` values, or [`FortioError::TypeMismatch`].
    pub fn as_doub(&self) -> Result<&[f64], FortioError> {
        match &self.data {
            KeywordData::Doub(v) => Ok(v),
            other => Err(self.mismatch(EclType::Doub, other.ecl_type())),
        }
    }

    /// `LOGI` values, or [`FortioError::TypeMismatch`].
    pub fn as_logi(&self) -> Result<&[bool], FortioError> {
        match &self.data {
            KeywordData::Logi(v) => Ok(v),
            other => Err(self.mismatch(EclType::Logi, other.ecl_type())),
        }
    }

    /// `CHAR` values, or [`FortioError::TypeMismatch`].
    pub fn as_chars(&self) -> Result<&[String], FortioError> {
        match &self.data {
            KeywordData::Char(v) => Ok(v),
            other => Err(self.mismatch(EclType::Char, other.ecl_type())),
        }
    }

    fn mismatch(&self, expected: EclType, found: EclType) -> FortioError {
        FortioError::TypeMismatch {
            keyword: self.name.clone(),
            expected,
            found,
        }
    }

    /// Element type.
    pub fn ecl_type(&self) -> EclType {
        self.data.ecl_type()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the keyword holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for ty in [
            EclType::Inte,
            EclType::Real,
            EclType::Doub,
            EclType::Logi,
            EclType::Char,
            EclType::Mess,
        ] {
            assert_eq!(EclType::from_tag(ty.tag()).unwrap(), ty);
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = EclType::from_tag(b"C008").unwrap_err();
        assert!(matches!(err, FortioError::UnknownType { tag } if &tag == b"C008"));
    }

    #[test]
    fn block_sizes() {
        assert_eq!(EclType::Char.block_size(), 105);
        assert_eq!(EclType::Doub.block_size(), 1000);
        assert_eq!(EclType::Doub.element_size(), 8);
        assert_eq!(EclType::Mess.element_size(), 0);
    }

    #[test]
    fn typed_access_reports_mismatch() {
        let kw = EclKeyword::real("PRESSURE", vec![1.0, 2.0]);
        assert_eq!(kw.as_real().unwrap(), &[1.0, 2.0]);
        match kw.as_inte() {
            Err(FortioError::TypeMismatch {
                keyword,
                expected,
                found,
            }) => {
                assert_eq!(keyword, "PRESSURE");
                assert_eq!(expected, EclType::Inte);
                assert_eq!(found, EclType::Real);
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn mess_is_empty() {
        let kw = EclKeyword::mess("STARTSOL");
        assert!(kw.is_empty());
        assert_eq!(kw.ecl_type().to_string(), "MESS");
    }
}
