//! Benchmark suite for rbx-bytes decode throughput
//!
//! This benchmark measures:
//! - Scalar reads through a cursor (integers, floats, doubles)
//! - LZ4 block decompression on compressible and incompressible payloads
//! - Interleaved array decoding at different element counts
//!
//! # Configuration
//!
//! Benchmark behavior can be configured via environment variables:
//!
//! - `BENCH_SAMPLE_SIZE`: Number of samples to collect (default: 100)
//! - `BENCH_MEASUREMENT_TIME`: Measurement time in seconds (default: 5)
//! - `BENCH_WARM_UP_TIME`: Warm-up time in seconds (default: 3)
//!
//! # Examples
//!
//! ```bash
//! BENCH_SAMPLE_SIZE=50 BENCH_MEASUREMENT_TIME=3 cargo bench
//! ```

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;

use rbx_bytes::{decompress_block, interleaved, interleaved_i32, interleaved_vendor_f32, Cursor};

/// Configure Criterion based on environment variables
fn configure_criterion() -> Criterion {
    let mut criterion = Criterion::default();

    if let Ok(sample_size) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(size) = sample_size.parse::<usize>() {
            criterion = criterion.sample_size(size);
            eprintln!("Configured sample size: {}", size);
        } else {
            eprintln!("Warning: Invalid BENCH_SAMPLE_SIZE value: {}", sample_size);
        }
    }

    if let Ok(measurement_time) = std::env::var("BENCH_MEASUREMENT_TIME") {
        if let Ok(secs) = measurement_time.parse::<u64>() {
            criterion = criterion.measurement_time(Duration::from_secs(secs));
            eprintln!("Configured measurement time: {}s", secs);
        } else {
            eprintln!(
                "Warning: Invalid BENCH_MEASUREMENT_TIME value: {}",
                measurement_time
            );
        }
    }

    if let Ok(warm_up_time) = std::env::var("BENCH_WARM_UP_TIME") {
        if let Ok(secs) = warm_up_time.parse::<u64>() {
            criterion = criterion.warm_up_time(Duration::from_secs(secs));
            eprintln!("Configured warm-up time: {}s", secs);
        } else {
            eprintln!(
                "Warning: Invalid BENCH_WARM_UP_TIME value: {}",
                warm_up_time
            );
        }
    }

    criterion
}

/// Frame an lz4_flex block with the 12-byte block header
fn lz4_block(data: &[u8]) -> Bytes {
    let payload = lz4_flex::block::compress(data);
    let mut block = Vec::with_capacity(payload.len() + 12);
    block.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    block.extend_from_slice(&(data.len() as u32).to_le_bytes());
    block.extend_from_slice(&[0; 4]);
    block.extend_from_slice(&payload);
    Bytes::from(block)
}

/// Pseudo-random bytes from a fixed-seed xorshift
fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect()
}

fn bench_scalars(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_reads");
    let buffer = Bytes::from(noise(64 * 1024));
    group.throughput(Throughput::Bytes(buffer.len() as u64));

    group.bench_function("u32_le", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(buffer.clone());
            while let Ok(value) = cursor.read_u32_le() {
                black_box(value);
            }
        });
    });

    group.bench_function("f32_le", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(buffer.clone());
            while let Ok(value) = cursor.read_f32_le() {
                black_box(value);
            }
        });
    });

    group.bench_function("f64_be", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(buffer.clone());
            while let Ok(value) = cursor.read_f64_be() {
                black_box(value);
            }
        });
    });

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("lz4_block");

    let text: Vec<u8> = b"Workspace.Part.Anchored=true;Size=4,1,2;Color=163,162,165;"
        .iter()
        .copied()
        .cycle()
        .take(1 << 20)
        .collect();
    let inputs = [("text", text), ("noise", noise(1 << 20))];

    for (name, data) in inputs {
        let block = lz4_block(&data);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("decompress", name), &block, |b, block| {
            b.iter(|| {
                let mut cursor = Cursor::new(block.clone());
                black_box(decompress_block(&mut cursor).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_interleave(c: &mut Criterion) {
    let mut group = c.benchmark_group("interleave");

    for count in [1_000usize, 100_000] {
        let buffer = Bytes::from(noise(count * 4));
        group.throughput(Throughput::Bytes(buffer.len() as u64));

        group.bench_with_input(BenchmarkId::new("generic", count), &buffer, |b, buffer| {
            b.iter(|| {
                let cursor = Cursor::new(buffer.clone());
                black_box(interleaved(&cursor, count * 4, 4).unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("i32", count), &buffer, |b, buffer| {
            b.iter(|| {
                let mut cursor = Cursor::new(buffer.clone());
                black_box(interleaved_i32(&mut cursor, count).unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("vendor_f32", count), &buffer, |b, buffer| {
            b.iter(|| {
                let mut cursor = Cursor::new(buffer.clone());
                black_box(interleaved_vendor_f32(&mut cursor, count).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_scalars, bench_decompress, bench_interleave
}

criterion_main!(benches);
