//! Performance benchmarks for index construction and queries.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use franklin::{FmIndex, PackedDna};

/// Deterministic pseudo-random sequence so runs stay comparable.
fn synthetic_sequence(len: usize) -> Vec<u8> {
    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
    let mut state = 0x9e3779b97f4a7c15u64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            BASES[(state % 4) as usize]
        })
        .collect()
}

fn benchmark_build(c: &mut Criterion) {
    let seq = synthetic_sequence(100_000);
    let text = PackedDna::from_ascii(&seq).unwrap();

    c.bench_function("build_100kb", |b| {
        b.iter(|| FmIndex::build(black_box(&text)).unwrap());
    });
}

fn benchmark_queries(c: &mut Criterion) {
    let seq = synthetic_sequence(100_000);
    let text = PackedDna::from_ascii(&seq).unwrap();
    let index = FmIndex::build(&text).unwrap();

    // Seed-sized patterns sampled from the text itself.
    let patterns: Vec<Vec<u8>> = (0..64)
        .map(|i| {
            let start = (i * 1543) % (seq.len() - 14);
            seq[start..start + 14]
                .iter()
                .map(|&ch| match ch {
                    b'A' => 0,
                    b'C' => 1,
                    b'G' => 2,
                    _ => 3,
                })
                .collect()
        })
        .collect();

    c.bench_function("count_14mer", |b| {
        b.iter(|| {
            for pattern in &patterns {
                black_box(index.count(black_box(pattern)).unwrap());
            }
        });
    });

    c.bench_function("locate_14mer", |b| {
        b.iter(|| {
            for pattern in &patterns {
                black_box(index.locate(black_box(pattern)).unwrap());
            }
        });
    });

    c.bench_function("mms_14mer", |b| {
        b.iter(|| {
            for pattern in &patterns {
                black_box(index.mms(black_box(pattern)).unwrap());
            }
        });
    });
}

criterion_group!(benches, benchmark_build, benchmark_queries);
criterion_main!(benches);
