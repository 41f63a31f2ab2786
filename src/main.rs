//! bdex - Throughput PoC
//!
//! Mengukur latency encode/decode untuk:
//! - Scalar: campuran lebar integer + float
//! - Array: blok i32 panjang
//! - Length: format pendek dan panjang

use std::time::Instant;

use bdex::protocol::{ByteInStream, ByteOutStream};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🚀 bdex Byte Streams - PoC v0.1");
    println!("===============================\n");

    benchmark_scalars();
    benchmark_arrays();
    benchmark_lengths();

    println!("\n✅ All benchmarks complete!");
    println!("\nTo inspect a file: cargo run --release --bin bdex_dump -- <file>");
}

fn benchmark_scalars() {
    println!("📊 Scalar Benchmark (mixed widths)");
    println!("----------------------------------");

    const ITERATIONS: usize = 1_000_000;
    // i8 + i24 + u32 + i48 + u64 + f64
    const RECORD_SIZE: usize = 1 + 3 + 4 + 6 + 8 + 8;

    let mut encoder = ByteOutStream::with_capacity(ITERATIONS * RECORD_SIZE);

    let start = Instant::now();
    for i in 0..ITERATIONS {
        encoder
            .put_i8(i as i8)
            .put_i24(i as i32)
            .put_u32(i as u32)
            .put_i48(-(i as i64))
            .put_u64(i as u64)
            .put_f64(i as f64);
    }
    let encode_duration = start.elapsed();

    let mut decoder = ByteInStream::new(encoder.data());
    let mut checksum = 0u64;

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        decoder.get_i8();
        decoder.get_i24();
        decoder.get_u32();
        decoder.get_i48();
        checksum = checksum.wrapping_add(decoder.get_u64().unwrap_or(0));
        decoder.get_f64();
    }
    let decode_duration = start.elapsed();

    let encode_ns = encode_duration.as_nanos() as f64 / ITERATIONS as f64;
    let decode_ns = decode_duration.as_nanos() as f64 / ITERATIONS as f64;

    println!("  Records: {} ({} bytes each)", ITERATIONS, RECORD_SIZE);
    println!("  Encode latency: {:.2} ns/record", encode_ns);
    println!("  Decode latency: {:.2} ns/record", decode_ns);
    println!(
        "  Stream state: valid={} empty={} (checksum {})\n",
        decoder.is_valid(),
        decoder.is_empty(),
        checksum
    );
}

fn benchmark_arrays() {
    println!("📊 Array Benchmark (i32 blocks)");
    println!("-------------------------------");

    const ITERATIONS: usize = 10_000;
    const BLOCK: usize = 1024;

    let values: Vec<i32> = (0..BLOCK as i32).collect();
    let mut encoder = ByteOutStream::with_capacity(BLOCK * 4);

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        encoder.reset();
        encoder.put_array_i32(&values);
    }
    let encode_duration = start.elapsed();

    let mut out = vec![0i32; BLOCK];
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut decoder = ByteInStream::new(encoder.data());
        decoder.get_array_i32(&mut out);
    }
    let decode_duration = start.elapsed();

    let bytes = (ITERATIONS * BLOCK * 4) as f64;
    println!("  Block: {} elements", BLOCK);
    println!(
        "  Encode throughput: {:.2} MB/sec",
        bytes / encode_duration.as_secs_f64() / 1_000_000.0
    );
    println!(
        "  Decode throughput: {:.2} MB/sec",
        bytes / decode_duration.as_secs_f64() / 1_000_000.0
    );
    println!("  Round-trip intact: {}\n", out == values);
}

fn benchmark_lengths() {
    println!("📊 Length Benchmark (1/4 byte forms)");
    println!("------------------------------------");

    const ITERATIONS: usize = 1_000_000;

    let mut encoder = ByteOutStream::new();
    let start = Instant::now();
    for i in 0..ITERATIONS {
        encoder.put_length(i % 512);
    }
    let encode_duration = start.elapsed();

    let mut decoder = ByteInStream::new(encoder.data());
    let mut mismatches = 0usize;
    let start = Instant::now();
    for i in 0..ITERATIONS {
        if decoder.get_length() != Some(i % 512) {
            mismatches += 1;
        }
    }
    let decode_duration = start.elapsed();

    println!("  Encoded size: {} bytes", encoder.length());
    println!(
        "  Encode latency: {:.2} ns/op",
        encode_duration.as_nanos() as f64 / ITERATIONS as f64
    );
    println!(
        "  Decode latency: {:.2} ns/op",
        decode_duration.as_nanos() as f64 / ITERATIONS as f64
    );
    println!("  Mismatches: {}", mismatches);
}
