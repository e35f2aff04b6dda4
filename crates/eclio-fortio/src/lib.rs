//! Eclipse binary keyword files: encode, decode and scan.
//!
//! EGRID, INIT and UNRST files are flat sequences of keywords. Each
//! keyword is a header record followed by zero or more data records,
//! all framed as big-endian Fortran unformatted records.
//!
//! # Architecture
//!
//! - [`KeywordWriter`] writes keywords to any `Write` sink
//! - [`KeywordReader`] reads keywords back from any `Read` source
//! - [`scan_records`] locates `SEQNUM` record boundaries without
//!   decoding data arrays, and reports where a corrupt tail begins
//! - All I/O goes through the primitive functions in [`codec`]
//!
//! # Format
//!
//! ```text
//! [16] [NAME____ (8)] [count i32] [TYPE (4)] [16]
//! [n bytes] [block 1] [n bytes]
//! [n bytes] [block 2] [n bytes]
//! ...
//! ```
//!
//! A data block holds at most [`BLOCK_SIZE`] elements
//! ([`CHAR_BLOCK_SIZE`] for `CHAR`). `MESS` keywords and keywords with a
//! zero count have no data records.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod reader;
pub mod scan;
pub mod types;
pub mod writer;

pub use error::FortioError;
pub use reader::{KeywordIter, KeywordReader};
pub use scan::{scan_records, RecordScan, StepRecord};
pub use types::{EclKeyword, EclType, KeywordData, KeywordHeader};
pub use writer::KeywordWriter;

/// Maximum keyword name length, fixed by the 8-byte header field.
pub const NAME_LEN: usize = 8;

/// Width of one `CHAR` element.
pub const CHAR_LEN: usize = 8;

/// Maximum elements per data block for numeric and logical types.
pub const BLOCK_SIZE: usize = 1000;

/// Maximum elements per data block for `CHAR`.
pub const CHAR_BLOCK_SIZE: usize = 105;

/// Byte length of the keyword header record body.
pub const HEADER_LEN: usize = 16;
