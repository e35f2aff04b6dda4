//! Criterion micro-benchmarks for the keyword codec and restart scanner.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use eclio_fortio::{scan_records, KeywordReader, KeywordWriter};

fn make_reals(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32 * 0.5).collect()
}

/// A restart-like stream: `steps` records of SEQNUM, INTEHEAD and three fields.
fn make_restart_stream(steps: i32, cells: usize) -> Vec<u8> {
    let data = make_reals(cells);
    let mut buf = Vec::new();
    let mut w = KeywordWriter::new(&mut buf);
    for step in 1..=steps {
        w.write_inte("SEQNUM", &[step]).unwrap();
        w.write_inte("INTEHEAD", &[0; 411]).unwrap();
        w.write_mess("STARTSOL").unwrap();
        for name in ["PRESSURE", "SWAT", "SGAS"] {
            w.write_real(name, &data).unwrap();
        }
        w.write_mess("ENDSOL").unwrap();
    }
    buf
}

/// Benchmark: encode a 100K-element REAL keyword.
fn bench_encode_real_100k(c: &mut Criterion) {
    let data = make_reals(100_000);

    c.bench_function("encode_real_100k", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(410_000);
            KeywordWriter::new(&mut buf)
                .write_real("PRESSURE", black_box(&data))
                .unwrap();
            black_box(buf.len());
        });
    });
}

/// Benchmark: decode the same keyword.
fn bench_decode_real_100k(c: &mut Criterion) {
    let mut encoded = Vec::new();
    KeywordWriter::new(&mut encoded)
        .write_real("PRESSURE", &make_reals(100_000))
        .unwrap();

    c.bench_function("decode_real_100k", |b| {
        b.iter(|| {
            let kw = KeywordReader::new(black_box(encoded.as_slice()))
                .next_keyword()
                .unwrap();
            black_box(kw);
        });
    });
}

/// Benchmark: find SEQNUM boundaries in 50 records of 10K cells.
fn bench_scan_50_records(c: &mut Criterion) {
    let stream = make_restart_stream(50, 10_000);

    c.bench_function("scan_50_records_10k", |b| {
        b.iter(|| {
            let scan = scan_records(black_box(stream.as_slice())).unwrap();
            black_box(scan.truncation_point(25));
        });
    });
}

criterion_group!(
    benches,
    bench_encode_real_100k,
    bench_decode_real_100k,
    bench_scan_50_records
);
criterion_main!(benches);
