//! Locate report-step records in a unified restart file.
//!
//! A unified restart file is a sequence of records, each starting with a
//! `SEQNUM` keyword. [`scan_records`] walks the file once, decoding only
//! the `SEQNUM` payloads and skipping every other data array.

use std::io::{self, Read};

use tracing::debug;

use crate::codec::{decode_body, decode_header, skip_body};
use crate::error::FortioError;
use crate::types::{EclType, KeywordData};

/// Keyword that opens every restart record.
pub const SEQNUM: &str = "SEQNUM";

/// One record found by [`scan_records`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// Report step from the `SEQNUM` payload.
    pub seqnum: i32,
    /// Byte offset of the `SEQNUM` header.
    pub offset: u64,
}

/// Result of scanning a restart file.
#[derive(Debug, Default)]
pub struct RecordScan {
    /// Records in file order.
    pub records: Vec<StepRecord>,
    /// Length of the decodable prefix, in bytes.
    pub valid_len: u64,
    /// Why decoding stopped before EOF, if it did.
    pub corrupt_tail: Option<FortioError>,
}

impl RecordScan {
    /// End of the last record that can be trusted.
    ///
    /// With a clean scan this is the decodable length. When the tail is
    /// corrupt, the record it interrupted is incomplete and ends the
    /// trusted prefix at its own `SEQNUM`.
    pub fn trusted_len(&self) -> u64 {
        match (&self.corrupt_tail, self.records.last()) {
            (Some(_), Some(last)) => last.offset,
            _ => self.valid_len,
        }
    }

    /// Offset at which a record for `step` must be written: the start of
    /// the first record with a sequence number `>= step`, or the end of
    /// the trusted prefix.
    pub fn truncation_point(&self, step: i32) -> u64 {
        let limit = self.trusted_len();
        self.records
            .iter()
            .find(|r| r.seqnum >= step)
            .map_or(limit, |r| r.offset.min(limit))
    }

    /// Sequence numbers in file order.
    pub fn seqnums(&self) -> impl Iterator<Item = i32> + '_ {
        self.records.iter().map(|r| r.seqnum)
    }
}

/// Counts bytes pulled through the inner reader.
struct Counting<R> {
    inner: R,
    pos: u64,
}

impl<R: Read> Read for Counting<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

/// Scan a restart stream for `SEQNUM` records.
///
/// Decoding errors do not fail the scan: they end it, and the error is
/// kept in [`RecordScan::corrupt_tail`] with [`RecordScan::valid_len`]
/// marking the last keyword boundary before it. Only I/O errors from the
/// underlying reader are returned.
pub fn scan_records<R: Read>(reader: R) -> Result<RecordScan, FortioError> {
    let mut r = Counting {
        inner: reader,
        pos: 0,
    };
    let mut scan = RecordScan::default();

    loop {
        let offset = r.pos;
        match next_record_start(&mut r) {
            Ok(Some(Some(seqnum))) => scan.records.push(StepRecord { seqnum, offset }),
            Ok(Some(None)) => {}
            Ok(None) => {
                scan.valid_len = offset;
                break;
            }
            Err(FortioError::Io(e)) => return Err(FortioError::Io(e)),
            Err(e) => {
                debug!(offset, error = %e, "restart scan stopped at undecodable keyword");
                scan.valid_len = offset;
                scan.corrupt_tail = Some(e);
                break;
            }
        }
    }

    debug!(
        records = scan.records.len(),
        valid_len = scan.valid_len,
        "restart file scanned"
    );
    Ok(scan)
}

/// Consume one keyword. `Some(Some(n))` for a `SEQNUM` with payload `n`,
/// `Some(None)` for any other keyword, `None` at EOF.
fn next_record_start(r: &mut dyn Read) -> Result<Option<Option<i32>>, FortioError> {
    let Some(header) = decode_header(r)? else {
        return Ok(None);
    };
    if header.name != SEQNUM {
        skip_body(r, &header)?;
        return Ok(Some(None));
    }
    if header.ecl_type != EclType::Inte {
        return Err(FortioError::TypeMismatch {
            keyword: header.name,
            expected: EclType::Inte,
            found: header.ecl_type,
        });
    }
    match decode_body(r, &header)? {
        KeywordData::Inte(v) if !v.is_empty() => Ok(Some(Some(v[0]))),
        _ => Err(FortioError::MalformedRecord {
            detail: format!("empty {SEQNUM} keyword"),
        }),
    }
}
