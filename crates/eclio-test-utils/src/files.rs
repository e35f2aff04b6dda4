//! Read written files back for assertions.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use eclio_fortio::scan::SEQNUM;
use eclio_fortio::{EclKeyword, KeywordReader};

/// Every keyword in a file, in order. Panics on any decode error.
pub fn read_keywords(path: &Path) -> Vec<EclKeyword> {
    let file = File::open(path).unwrap_or_else(|e| panic!("open {}: {e}", path.display()));
    KeywordReader::new(BufReader::new(file))
        .keywords()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("decode {}: {e}", path.display()))
}

/// First keyword named `name`.
pub fn find_keyword<'a>(keywords: &'a [EclKeyword], name: &str) -> Option<&'a EclKeyword> {
    keywords.iter().find(|kw| kw.name == name)
}

/// Keywords of the restart record with sequence number `step`, starting
/// at its `SEQNUM`. Empty if the file has no such record.
pub fn restart_record(path: &Path, step: i32) -> Vec<EclKeyword> {
    let mut current = None;
    read_keywords(path)
        .into_iter()
        .filter(|kw| {
            if kw.name == SEQNUM {
                current = kw.as_inte().ok().and_then(|v| v.first().copied());
            }
            current == Some(step)
        })
        .collect()
}

/// Size of a file in bytes.
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path)
        .unwrap_or_else(|e| panic!("stat {}: {e}", path.display()))
        .len()
}
