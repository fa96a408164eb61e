use std::hint::black_box;
use std::io::Cursor;

use bebu_buffer::Buffer;
use bebu_stream::{BinaryRead, BinaryReader, BinaryWrite, BinaryWriter};
use bebu_tests::Manifest;
use bebu_wire::primitive::{decode_u64, encode_u64};
use bebu_wire::width::select_width;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_primitives(c: &mut Criterion) {
    c.bench_function("encode_decode_u64", |b| {
        b.iter(|| decode_u64(&encode_u64(black_box(0x0102_0304_0506_0708))).unwrap());
    });

    c.bench_function("select_width", |b| {
        b.iter(|| select_width(black_box(70_000u64), black_box(true)).unwrap());
    });
}

fn bench_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");

    for count in [10u32, 1_000, 100_000] {
        let manifest = Manifest::sample(count);
        let mut encoded = Buffer::new();
        encoded.write(&manifest).unwrap();
        let bytes = encoded.bytes();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("write", count), &manifest, |b, m| {
            b.iter(|| {
                let mut buffer = Buffer::new();
                buffer.write(m).unwrap();
                buffer
            });
        });
        group.bench_with_input(BenchmarkId::new("read", count), &bytes, |b, data| {
            b.iter(|| {
                let mut buffer = Buffer::from_bytes(data);
                let mut out = Manifest::default();
                buffer.read(&mut out).unwrap();
                out
            });
        });
    }

    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");

    for count in [10u32, 1_000, 100_000] {
        let manifest = Manifest::sample(count);
        let mut writer = BinaryWriter::new(Vec::new());
        writer.write_object(&manifest).unwrap();
        let bytes = writer.into_inner();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("write", count), &manifest, |b, m| {
            b.iter(|| {
                let mut writer = BinaryWriter::new(Vec::with_capacity(bytes.len()));
                writer.write_object(m).unwrap();
                writer.bytes_transferred()
            });
        });
        group.bench_with_input(BenchmarkId::new("read", count), &bytes, |b, data| {
            b.iter(|| {
                let mut reader = BinaryReader::new(Cursor::new(data.as_slice()));
                let mut out = Manifest::default();
                reader.read_object(&mut out).unwrap();
                out
            });
        });
    }

    group.finish();
}

fn bench_delimited(c: &mut Criterion) {
    let mut text = "x".repeat(4096).into_bytes();
    text.push(0);

    let mut group = c.benchmark_group("read_string_z");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("bytewise", |b| {
        b.iter(|| {
            BinaryReader::new(Cursor::new(text.as_slice()))
                .read_string_z()
                .unwrap()
        });
    });
    group.bench_function("buffered", |b| {
        b.iter(|| {
            BinaryReader::buffered(Cursor::new(text.as_slice()))
                .read_string_z()
                .unwrap()
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_primitives,
    bench_buffer,
    bench_stream,
    bench_delimited
);
criterion_main!(benches);
