//! Benchmarks for listing rendering and end-to-end inspection.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use archpeek_core::InspectionRequest;
use archpeek_core::InspectorConfig;
use archpeek_core::catalog::AcceptedPaths;
use archpeek_core::inspect;
use archpeek_core::render::render;
use archpeek_core::test_utils::Compression;
use archpeek_core::test_utils::TarTestBuilder;
use archpeek_core::test_utils::ZipTestBuilder;
use archpeek_core::test_utils::compress;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use std::fs;
use tempfile::TempDir;

/// Creates a ZIP archive with many small files spread over a few directories.
fn create_many_small_files_zip(file_count: usize) -> Vec<u8> {
    (0..file_count)
        .fold(ZipTestBuilder::new(), |zip, i| {
            zip.add_file(&format!("dir{}/file{i:04}.txt", i % 8), format!("content{i}").as_bytes())
        })
        .build()
}

/// Creates a TAR archive with a single large file.
fn create_large_file_tar(size_bytes: usize) -> Vec<u8> {
    TarTestBuilder::new()
        .add_file("large_file.bin", &vec![0xAB_u8; size_bytes])
        .build()
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for count in [100, 1000, 10000] {
        let paths: AcceptedPaths = (0..count)
            .map(|i| format!("a/b{}/c/file{i:05}.txt", i % 16))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &paths, |b, paths| {
            b.iter(|| render("bench.zip", paths));
        });
    }

    group.finish();
}

fn benchmark_zip_inspection(c: &mut Criterion) {
    let mut group = c.benchmark_group("zip_inspection");
    let config = InspectorConfig::default();

    for file_count in [10, 100, 1000] {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bench.zip");
        fs::write(&path, create_many_small_files_zip(file_count)).unwrap();
        group.throughput(Throughput::Elements(file_count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(file_count), &path, |b, path| {
            b.iter(|| {
                let request = InspectionRequest::new("bench.zip", path, "bench", "application/zip");
                inspect(request, &config)
            });
        });
    }

    group.finish();
}

fn benchmark_compressed_tar(c: &mut Criterion) {
    let mut group = c.benchmark_group("compressed_tar");
    let config = InspectorConfig::default();
    let size_bytes = 10 * 1024 * 1024;
    let tar = create_large_file_tar(size_bytes);
    group.throughput(Throughput::Bytes(size_bytes as u64));

    for (label, compression, media_type) in [
        ("none", Compression::None, "application/x-tar"),
        ("gzip", Compression::Gzip, "application/gzip"),
        ("xz", Compression::Xz, "application/x-xz-compressed-tar"),
        ("zstd", Compression::Zstd, "application/x-zstd-compressed-tar"),
    ] {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bench.tar");
        fs::write(&path, compress(&tar, compression)).unwrap();

        group.bench_with_input(BenchmarkId::new("codec", label), &path, |b, path| {
            b.iter(|| {
                let request = InspectionRequest::new("bench.tar", path, "bench", media_type);
                inspect(request, &config)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_render,
    benchmark_zip_inspection,
    benchmark_compressed_tar
);
criterion_main!(benches);
