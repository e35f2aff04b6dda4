//! Keyword stream reader.
//!
//! [`KeywordReader`] reads keywords from any `Read` source, decoding
//! the big-endian record format.

use std::io::Read;

use crate::codec::decode_keyword;
use crate::error::FortioError;
use crate::types::EclKeyword;

/// Reads keywords from a byte stream.
///
/// Generic over `R: Read` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
pub struct KeywordReader<R: Read> {
    reader: R,
    keywords_read: u64,
}

impl<R: Read> KeywordReader<R> {
    /// Wrap a source positioned at a keyword boundary.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            keywords_read: 0,
        }
    }

    /// Read the next keyword, or `None` if the stream is exhausted.
    pub fn next_keyword(&mut self) -> Result<Option<EclKeyword>, FortioError> {
        let kw = decode_keyword(&mut self.reader)?;
        if kw.is_some() {
            self.keywords_read += 1;
        }
        Ok(kw)
    }

    /// Number of keywords read so far.
    pub fn keywords_read(&self) -> u64 {
        self.keywords_read
    }

    /// Convert into a keyword iterator.
    pub fn keywords(self) -> KeywordIter<R> {
        KeywordIter {
            reader: self.reader,
            done: false,
        }
    }
}

/// Iterator adapter over keywords.
///
/// Yields at most one error, then stops.
pub struct KeywordIter<R: Read> {
    reader: R,
    done: bool,
}

impl<R: Read> Iterator for KeywordIter<R> {
    type Item = Result<EclKeyword, FortioError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode_keyword(&mut self.reader) {
            Ok(Some(kw)) => Some(Ok(kw)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
