use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use switchlog::*;

fn emit(c: &mut Criterion) {
    let tmp = tempfile::tempdir().unwrap();
    let config = LogConfig::new()
        .level(LogLevel::Warning)
        .file_path(tmp.path().join("bench.log"))
        .max_log_size(16 * 1024 * 1024)
        .log_file_count(2);

    let mut group = c.benchmark_group("emit");
    group.throughput(Throughput::Elements(1));

    let silent = create("silent", &config).unwrap();
    group.bench_function("silent", |b| {
        b.iter(|| log_warn!(silent, "value: {}", criterion::black_box(42)))
    });

    let file = create("file", &config).unwrap();
    group.bench_function("file/disabled", |b| {
        b.iter(|| log_debug!(file, "value: {}", criterion::black_box(42)))
    });
    group.bench_function("file/enabled", |b| {
        b.iter(|| log_warn!(file, "value: {}", criterion::black_box(42)))
    });

    group.finish();
    file.destroy().unwrap();
}

criterion_group!(benches, emit);
criterion_main!(benches);
