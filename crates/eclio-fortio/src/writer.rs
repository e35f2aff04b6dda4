//! Keyword stream writer.
//!
//! [`KeywordWriter`] streams keywords to any `Write` sink. Nothing is
//! written up front; an empty writer produces an empty file.

use std::io::Write;

use tracing::trace;

use crate::codec::{
    encode_char, encode_doub, encode_inte, encode_keyword, encode_logi, encode_mess, encode_real,
};
use crate::error::FortioError;
use crate::types::EclKeyword;

/// Writes keywords to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`. The typed `write_*` methods encode
/// straight from borrowed slices.
///
/// # Examples
///
/// ```
/// use eclio_fortio::{EclKeyword, KeywordReader, KeywordWriter};
///
/// let mut buf = Vec::new();
/// let mut writer = KeywordWriter::new(&mut buf);
/// writer.write_inte("SEQNUM", &[1]).unwrap();
/// writer.write_mess("STARTSOL").unwrap();
/// writer.write_real("PRESSURE", &[1.0, 2.0]).unwrap();
/// writer.write_mess("ENDSOL").unwrap();
/// assert_eq!(writer.keywords_written(), 4);
/// drop(writer);
///
/// let keywords: Vec<EclKeyword> = KeywordReader::new(buf.as_slice())
///     .keywords()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(keywords[2], EclKeyword::real("PRESSURE", vec![1.0, 2.0]));
/// ```
pub struct KeywordWriter<W: Write> {
    writer: W,
    keywords_written: u64,
}

impl<W: Write> KeywordWriter<W> {
    /// Wrap a sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            keywords_written: 0,
        }
    }

    /// Write an owned keyword.
    pub fn write_keyword(&mut self, kw: &EclKeyword) -> Result<(), FortioError> {
        encode_keyword(&mut self.writer, kw)?;
        self.written(&kw.name, kw.len())
    }

    /// Write an `INTE` keyword.
    pub fn write_inte(&mut self, name: &str, values: &[i32]) -> Result<(), FortioError> {
        encode_inte(&mut self.writer, name, values)?;
        self.written(name, values.len())
    }

    /// Write a `REAL` keyword.
    pub fn write_real(&mut self, name: &str, values: &[f32]) -> Result<(), FortioError> {
        encode_real(&mut self.writer, name, values)?;
        self.written(name, values.len())
    }

    /// Write a `DOUB` keyword.
    pub fn write_doub(&mut self, name: &str, values: &[f64]) -> Result<(), FortioError> {
        encode_doub(&mut self.writer, name, values)?;
        self.written(name, values.len())
    }

    /// Write a `LOGI` keyword.
    pub fn write_logi(&mut self, name: &str, values: &[bool]) -> Result<(), FortioError> {
        encode_logi(&mut self.writer, name, values)?;
        self.written(name, values.len())
    }

    /// Write a `CHAR` keyword.
    pub fn write_char<S: AsRef<str>>(
        &mut self,
        name: &str,
        values: &[S],
    ) -> Result<(), FortioError> {
        encode_char(&mut self.writer, name, values)?;
        self.written(name, values.len())
    }

    /// Write a `MESS` keyword.
    pub fn write_mess(&mut self, name: &str) -> Result<(), FortioError> {
        encode_mess(&mut self.writer, name)?;
        self.written(name, 0)
    }

    fn written(&mut self, name: &str, count: usize) -> Result<(), FortioError> {
        trace!(keyword = name, count, "keyword encoded");
        self.keywords_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), FortioError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of keywords written so far.
    pub fn keywords_written(&self) -> u64 {
        self.keywords_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
