//! Binary encode/decode for Eclipse keyword files.
//!
//! All integers and floats are big-endian. Every record is framed by a
//! leading and trailing `i32` byte count. The functions here write one
//! keyword at a time; [`KeywordWriter`](crate::KeywordWriter) and
//! [`KeywordReader`](crate::KeywordReader) wrap them for streams.

use std::io::{self, Read, Write};

use crate::error::FortioError;
use crate::types::{EclKeyword, EclType, KeywordData, KeywordHeader};
use crate::{CHAR_LEN, HEADER_LEN, NAME_LEN};

// ── Primitive writers ───────────────────────────────────────────

/// Write a big-endian i32.
pub fn write_i32_be(w: &mut dyn Write, v: i32) -> Result<(), FortioError> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a big-endian i32.
pub fn read_i32_be(r: &mut dyn Read) -> Result<i32, FortioError> {
    let mut buf = [0u8; 4];
    fill(r, &mut buf, "i32")?;
    Ok(i32::from_be_bytes(buf))
}

/// `read_exact`, reporting a short read as a malformed record.
fn fill(r: &mut dyn Read, buf: &mut [u8], what: &str) -> Result<(), FortioError> {
    r.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            FortioError::MalformedRecord {
                detail: format!("truncated {what}"),
            }
        } else {
            FortioError::Io(e)
        }
    })
}

fn read_marker(r: &mut dyn Read, keyword: &str) -> Result<usize, FortioError> {
    let mut buf = [0u8; 4];
    fill(r, &mut buf, &format!("record marker in {keyword}"))?;
    let v = i32::from_be_bytes(buf);
    usize::try_from(v).map_err(|_| FortioError::MalformedRecord {
        detail: format!("negative record marker {v} in {keyword}"),
    })
}

fn be4(c: &[u8]) -> [u8; 4] {
    [c[0], c[1], c[2], c[3]]
}

fn be8(c: &[u8]) -> [u8; 8] {
    [c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]
}

// ── Names ───────────────────────────────────────────────────────

/// Check that `name` fits the 8-byte header field.
///
/// Valid names are 1 to 8 printable ASCII characters without spaces.
pub fn validate_name(name: &str) -> Result<(), FortioError> {
    let ok = !name.is_empty()
        && name.len() <= NAME_LEN
        && name.bytes().all(|b| b.is_ascii_graphic());
    if ok {
        Ok(())
    } else {
        Err(FortioError::InvalidKeywordName {
            name: name.to_string(),
        })
    }
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode a keyword header record.
pub fn encode_header(
    w: &mut dyn Write,
    name: &str,
    count: usize,
    ecl_type: EclType,
) -> Result<(), FortioError> {
    validate_name(name)?;
    let count = i32::try_from(count).map_err(|_| FortioError::MalformedRecord {
        detail: format!("{name} has {count} elements, more than an i32 count allows"),
    })?;

    let mut padded = [b' '; NAME_LEN];
    padded[..name.len()].copy_from_slice(name.as_bytes());

    write_i32_be(w, HEADER_LEN as i32)?;
    w.write_all(&padded)?;
    write_i32_be(w, count)?;
    w.write_all(ecl_type.tag())?;
    write_i32_be(w, HEADER_LEN as i32)?;
    Ok(())
}

/// Decode a keyword header record.
///
/// Returns `Ok(None)` on clean EOF (no bytes available), `Ok(Some(header))`
/// on success, or an error on truncated/corrupt data.
pub fn decode_header(r: &mut dyn Read) -> Result<Option<KeywordHeader>, FortioError> {
    // Read the leading marker byte-by-byte to distinguish clean EOF
    // (zero bytes available) from truncation (1-3 bytes before EOF).
    let mut lead = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        match r.read(&mut lead[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(FortioError::MalformedRecord {
                    detail: format!("truncated header marker: got {filled} of 4 bytes"),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FortioError::Io(e)),
        }
    }
    let lead = i32::from_be_bytes(lead);
    if lead != HEADER_LEN as i32 {
        return Err(FortioError::MalformedRecord {
            detail: format!("header marker {lead}, expected {HEADER_LEN}"),
        });
    }

    let mut body = [0u8; HEADER_LEN];
    fill(r, &mut body, "keyword header")?;
    let tail = read_i32_be(r)?;
    if tail != lead {
        return Err(FortioError::MalformedRecord {
            detail: format!("header trailing marker {tail}, expected {lead}"),
        });
    }

    let name = std::str::from_utf8(&body[..NAME_LEN])
        .map_err(|_| FortioError::MalformedRecord {
            detail: "keyword name is not ASCII".into(),
        })?
        .trim_end()
        .to_string();
    let count = i32::from_be_bytes(be4(&body[8..12]));
    let count = usize::try_from(count).map_err(|_| FortioError::MalformedRecord {
        detail: format!("negative element count {count} for {name}"),
    })?;
    let ecl_type = EclType::from_tag(&be4(&body[12..16]))?;

    Ok(Some(KeywordHeader {
        name,
        count,
        ecl_type,
    }))
}

// ── Data encode ─────────────────────────────────────────────────

/// Write `values` as data records of at most `block_size` elements.
fn encode_blocks<T>(
    w: &mut dyn Write,
    ecl_type: EclType,
    values: &[T],
    mut put: impl FnMut(&mut Vec<u8>, &T) -> Result<(), FortioError>,
) -> Result<(), FortioError> {
    let mut buf = Vec::with_capacity(ecl_type.block_size() * ecl_type.element_size());
    for chunk in values.chunks(ecl_type.block_size()) {
        buf.clear();
        for v in chunk {
            put(&mut buf, v)?;
        }
        let marker = buf.len() as i32;
        write_i32_be(w, marker)?;
        w.write_all(&buf)?;
        write_i32_be(w, marker)?;
    }
    Ok(())
}

/// Encode an `INTE` keyword.
pub fn encode_inte(w: &mut dyn Write, name: &str, values: &[i32]) -> Result<(), FortioError> {
    encode_header(w, name, values.len(), EclType::Inte)?;
    encode_blocks(w, EclType::Inte, values, |buf, v| {
        buf.extend_from_slice(&v.to_be_bytes());
        Ok(())
    })
}

/// Encode a `REAL` keyword.
pub fn encode_real(w: &mut dyn Write, name: &str, values: &[f32]) -> Result<(), FortioError> {
    encode_header(w, name, values.len(), EclType::Real)?;
    encode_blocks(w, EclType::Real, values, |buf, v| {
        buf.extend_from_slice(&v.to_be_bytes());
        Ok(())
    })
}

/// Encode a `DOUB` keyword.
pub fn encode_doub(w: &mut dyn Write, name: &str, values: &[f64]) -> Result<(), FortioError> {
    encode_header(w, name, values.len(), EclType::Doub)?;
    encode_blocks(w, EclType::Doub, values, |buf, v| {
        buf.extend_from_slice(&v.to_be_bytes());
        Ok(())
    })
}

/// Encode a `LOGI` keyword (`true` as `-1`).
pub fn encode_logi(w: &mut dyn Write, name: &str, values: &[bool]) -> Result<(), FortioError> {
    encode_header(w, name, values.len(), EclType::Logi)?;
    encode_blocks(w, EclType::Logi, values, |buf, &v| {
        let raw: i32 = if v { -1 } else { 0 };
        buf.extend_from_slice(&raw.to_be_bytes());
        Ok(())
    })
}

/// Encode a `CHAR` keyword; each value is space-padded to 8 bytes.
pub fn encode_char<S: AsRef<str>>(
    w: &mut dyn Write,
    name: &str,
    values: &[S],
) -> Result<(), FortioError> {
    encode_header(w, name, values.len(), EclType::Char)?;
    encode_blocks(w, EclType::Char, values, |buf, v| {
        let v = v.as_ref();
        if v.len() > CHAR_LEN {
            return Err(FortioError::CharTooLong {
                keyword: name.to_string(),
                value: v.to_string(),
            });
        }
        buf.extend_from_slice(v.as_bytes());
        buf.resize(buf.len() + CHAR_LEN - v.len(), b' ');
        Ok(())
    })
}

/// Encode a `MESS` keyword (header only).
pub fn encode_mess(w: &mut dyn Write, name: &str) -> Result<(), FortioError> {
    encode_header(w, name, 0, EclType::Mess)
}

/// Encode any keyword.
pub fn encode_keyword(w: &mut dyn Write, kw: &EclKeyword) -> Result<(), FortioError> {
    match &kw.data {
        KeywordData::Inte(v) => encode_inte(w, &kw.name, v),
        KeywordData::Real(v) => encode_real(w, &kw.name, v),
        KeywordData::Doub(v) => encode_doub(w, &kw.name, v),
        KeywordData::Logi(v) => encode_logi(w, &kw.name, v),
        KeywordData::Char(v) => encode_char(w, &kw.name, v),
        KeywordData::Mess => encode_mess(w, &kw.name),
    }
}

// ── Data decode ─────────────────────────────────────────────────

/// Walk the data records of a keyword, handing each block body to `on_block`.
///
/// Every block except the last must hold exactly `block_size` elements.
fn read_blocks(
    r: &mut dyn Read,
    header: &KeywordHeader,
    mut on_block: impl FnMut(&mut dyn Read, usize) -> Result<(), FortioError>,
) -> Result<(), FortioError> {
    let size = header.ecl_type.element_size();
    if size == 0 {
        if header.count != 0 {
            return Err(FortioError::MalformedRecord {
                detail: format!("MESS keyword {} has count {}", header.name, header.count),
            });
        }
        return Ok(());
    }

    let mut remaining = header.count;
    while remaining > 0 {
        let lead = read_marker(r, &header.name)?;
        let expected = remaining.min(header.ecl_type.block_size()) * size;
        if lead != expected {
            return Err(FortioError::MalformedRecord {
                detail: format!(
                    "data block of {} is {lead} bytes, expected {expected}",
                    header.name
                ),
            });
        }
        on_block(r, lead)?;
        let tail = read_marker(r, &header.name)?;
        if tail != lead {
            return Err(FortioError::MalformedRecord {
                detail: format!(
                    "data block of {} has trailing marker {tail}, expected {lead}",
                    header.name
                ),
            });
        }
        remaining -= lead / size;
    }
    Ok(())
}

/// Decode the data records following `header`.
pub fn decode_body(r: &mut dyn Read, header: &KeywordHeader) -> Result<KeywordData, FortioError> {
    let mut bytes = Vec::new();
    read_blocks(r, header, |r, n| {
        let start = bytes.len();
        bytes.resize(start + n, 0);
        fill(r, &mut bytes[start..], &format!("data block of {}", header.name))
    })?;

    let data = match header.ecl_type {
        EclType::Inte => KeywordData::Inte(
            bytes
                .chunks_exact(4)
                .map(|c| i32::from_be_bytes(be4(c)))
                .collect(),
        ),
        EclType::Real => KeywordData::Real(
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_be_bytes(be4(c)))
                .collect(),
        ),
        EclType::Doub => KeywordData::Doub(
            bytes
                .chunks_exact(8)
                .map(|c| f64::from_be_bytes(be8(c)))
                .collect(),
        ),
        EclType::Logi => KeywordData::Logi(
            bytes
                .chunks_exact(4)
                .map(|c| i32::from_be_bytes(be4(c)) != 0)
                .collect(),
        ),
        EclType::Char => KeywordData::Char(
            bytes
                .chunks_exact(CHAR_LEN)
                .map(|c| {
                    std::str::from_utf8(c)
                        .map(|s| s.trim_end().to_string())
                        .map_err(|_| FortioError::MalformedRecord {
                            detail: format!("non-UTF-8 CHAR value in {}", header.name),
                        })
                })
                .collect::<Result<_, _>>()?,
        ),
        EclType::Mess => KeywordData::Mess,
    };
    Ok(data)
}

/// Skip the data records following `header` without decoding them.
///
/// Returns the number of bytes consumed.
pub fn skip_body(r: &mut dyn Read, header: &KeywordHeader) -> Result<u64, FortioError> {
    let mut skipped = 0u64;
    read_blocks(r, header, |r, n| {
        let copied = io::copy(&mut r.take(n as u64), &mut io::sink())?;
        if copied != n as u64 {
            return Err(FortioError::MalformedRecord {
                detail: format!("truncated data block of {}", header.name),
            });
        }
        skipped += 8 + copied;
        Ok(())
    })?;
    Ok(skipped)
}

/// Decode one keyword, or `None` on clean EOF.
pub fn decode_keyword(r: &mut dyn Read) -> Result<Option<EclKeyword>, FortioError> {
    let Some(header) = decode_header(r)? else {
        return Ok(None);
    };
    let data = decode_body(r, &header)?;
    Ok(Some(EclKeyword {
        name: header.name,
        data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode(kw: &EclKeyword) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_keyword(&mut buf, kw).unwrap();
        buf
    }

    fn decode(buf: &[u8]) -> EclKeyword {
        let mut r = buf;
        let kw = decode_keyword(&mut r).unwrap().unwrap();
        assert!(r.is_empty(), "{} trailing bytes", r.len());
        kw
    }

    // ── Byte layout ─────────────────────────────────────────────

    #[test]
    fn header_layout() {
        let buf = encode(&EclKeyword::inte("SEQNUM", vec![7]));
        let mut expected = Vec::new();
        expected.extend_from_slice(&16i32.to_be_bytes());
        expected.extend_from_slice(b"SEQNUM  ");
        expected.extend_from_slice(&1i32.to_be_bytes());
        expected.extend_from_slice(b"INTE");
        expected.extend_from_slice(&16i32.to_be_bytes());
        expected.extend_from_slice(&4i32.to_be_bytes());
        expected.extend_from_slice(&7i32.to_be_bytes());
        expected.extend_from_slice(&4i32.to_be_bytes());
        assert_eq!(buf, expected);
    }

    #[test]
    fn mess_has_no_data_records() {
        let buf = encode(&EclKeyword::mess("STARTSOL"));
        assert_eq!(buf.len(), 4 + HEADER_LEN + 4);
        assert_eq!(decode(&buf), EclKeyword::mess("STARTSOL"));
    }

    #[test]
    fn empty_keyword_has_no_data_records() {
        let buf = encode(&EclKeyword::doub("XAAQ", vec![]));
        assert_eq!(buf.len(), 4 + HEADER_LEN + 4);
        assert_eq!(decode(&buf).as_doub().unwrap(), &[] as &[f64]);
    }

    #[test]
    fn logi_true_is_minus_one() {
        let buf = encode(&EclKeyword::logi("LOGIHEAD", vec![true, false]));
        let data = &buf[24 + 4..24 + 12];
        assert_eq!(&data[..4], &(-1i32).to_be_bytes());
        assert_eq!(&data[4..], &0i32.to_be_bytes());
    }

    #[test]
    fn blocks_split_at_1000_elements() {
        let buf = encode(&EclKeyword::inte("ACTNUM", vec![1; 1500]));
        let first = i32::from_be_bytes(be4(&buf[24..28]));
        assert_eq!(first, 4000);
        let second_at = 24 + 4 + 4000 + 4;
        let second = i32::from_be_bytes(be4(&buf[second_at..second_at + 4]));
        assert_eq!(second, 2000);
        assert_eq!(buf.len(), 24 + (8 + 4000) + (8 + 2000));
    }

    #[test]
    fn char_blocks_split_at_105_elements() {
        let values: Vec<String> = (0..106).map(|i| format!("W{i}")).collect();
        let buf = encode(&EclKeyword::chars("ZWEL", values.clone()));
        let first = i32::from_be_bytes(be4(&buf[24..28]));
        assert_eq!(first, 105 * 8);
        assert_eq!(decode(&buf).as_chars().unwrap(), values.as_slice());
    }

    #[test]
    fn char_values_are_space_padded() {
        let buf = encode(&EclKeyword::chars("ZWEL", vec!["INJ".into()]));
        assert_eq!(&buf[28..36], b"INJ     ");
    }

    // ── Validation ──────────────────────────────────────────────

    #[test]
    fn invalid_names_rejected() {
        for name in ["", "STR_ULONGNAME", "HAS SPACE", "NINECHARS"] {
            let mut buf = Vec::new();
            let err = encode_inte(&mut buf, name, &[1]).unwrap_err();
            assert!(matches!(err, FortioError::InvalidKeywordName { .. }), "{name}");
            assert!(buf.is_empty());
        }
        validate_name("STR_V").unwrap();
        validate_name("EIGHTCHR").unwrap();
    }

    #[test]
    fn long_char_value_rejected() {
        let mut buf = Vec::new();
        let err = encode_char(&mut buf, "ZWEL", &["TOOLONGNAME"]).unwrap_err();
        assert!(matches!(err, FortioError::CharTooLong { .. }));
    }

    // ── Decode errors ───────────────────────────────────────────

    #[test]
    fn eof_returns_none() {
        let mut r: &[u8] = &[];
        assert!(decode_keyword(&mut r).unwrap().is_none());
    }

    #[test]
    fn partial_marker_is_error_not_eof() {
        let mut r: &[u8] = &[0, 0];
        assert!(matches!(
            decode_keyword(&mut r),
            Err(FortioError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn truncated_body_is_error() {
        let buf = encode(&EclKeyword::doub("DOUBHEAD", vec![1.0; 10]));
        let mut r = &buf[..buf.len() - 6];
        assert!(matches!(
            decode_keyword(&mut r),
            Err(FortioError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn bad_header_marker_rejected() {
        let mut buf = encode(&EclKeyword::mess("ENDSOL"));
        buf[3] = 17;
        let mut r = buf.as_slice();
        assert!(matches!(
            decode_keyword(&mut r),
            Err(FortioError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn unknown_type_rejected() {
        let mut buf = encode(&EclKeyword::mess("ENDSOL"));
        buf[16..20].copy_from_slice(b"C099");
        let mut r = buf.as_slice();
        assert!(matches!(
            decode_keyword(&mut r),
            Err(FortioError::UnknownType { .. })
        ));
    }

    #[test]
    fn mismatched_block_marker_rejected() {
        let mut buf = encode(&EclKeyword::inte("ICON", vec![1, 2, 3]));
        let tail = buf.len() - 4;
        buf[tail..].copy_from_slice(&8i32.to_be_bytes());
        let mut r = buf.as_slice();
        assert!(matches!(
            decode_keyword(&mut r),
            Err(FortioError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn skip_body_consumes_whole_keyword() {
        let mut buf = encode(&EclKeyword::real("PRESSURE", vec![2.5; 2345]));
        buf.extend(encode(&EclKeyword::mess("ENDSOL")));
        let mut r = buf.as_slice();
        let header = decode_header(&mut r).unwrap().unwrap();
        assert_eq!(header.count, 2345);
        let skipped = skip_body(&mut r, &header).unwrap();
        assert_eq!(skipped, 3 * 8 + 2345 * 4);
        assert_eq!(decode_keyword(&mut r).unwrap().unwrap().name, "ENDSOL");
    }

    // ── Round-trips ─────────────────────────────────────────────

    fn arb_name() -> impl Strategy<Value = String> {
        "[A-Z][A-Z0-9_]{0,7}"
    }

    proptest! {
        #[test]
        fn roundtrip_inte(name in arb_name(), v in prop::collection::vec(any::<i32>(), 0..2500)) {
            let kw = EclKeyword::inte(name, v);
            prop_assert_eq!(decode(&encode(&kw)), kw);
        }

        #[test]
        fn roundtrip_real(v in prop::collection::vec(-1.0e6f32..1.0e6, 0..2100)) {
            let kw = EclKeyword::real("SWAT", v);
            prop_assert_eq!(decode(&encode(&kw)), kw);
        }

        #[test]
        fn roundtrip_doub_bits(bits in prop::collection::vec(any::<u64>(), 0..1100)) {
            let v: Vec<f64> = bits.iter().map(|&b| f64::from_bits(b)).collect();
            let back = decode(&encode(&EclKeyword::doub("XWEL", v)));
            let back_bits: Vec<u64> = back.as_doub().unwrap().iter().map(|x| x.to_bits()).collect();
            prop_assert_eq!(back_bits, bits);
        }

        #[test]
        fn roundtrip_logi(v in prop::collection::vec(any::<bool>(), 0..1200)) {
            let kw = EclKeyword::logi("LOGIHEAD", v);
            prop_assert_eq!(decode(&encode(&kw)), kw);
        }

        #[test]
        fn roundtrip_char(v in prop::collection::vec("[A-Z0-9_]{0,8}", 0..250)) {
            let kw = EclKeyword::chars("ZWEL", v);
            prop_assert_eq!(decode(&encode(&kw)), kw);
        }
    }
}
