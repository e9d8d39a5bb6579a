//! Criterion benchmarks for stackdriver_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use stackdriver_logger::prelude::*;
use std::io;
use std::sync::Arc;

fn logger(level: Severity) -> Logger {
    Logger::builder()
        .config(Config::new(level, "bench", "1.0"))
        .output(Sink::new(io::sink()))
        .build()
}

// ============================================================================
// Derivation Benchmarks
// ============================================================================

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation");
    group.throughput(Throughput::Elements(1));

    let base = logger(Severity::Info).with_fields([("service", "api"), ("region", "eu")]);

    group.bench_function("with_fields", |b| {
        b.iter(|| black_box(base.with_fields([("request_id", "abc-123")])));
    });

    group.bench_function("with_level", |b| {
        b.iter(|| black_box(base.with_level(Severity::Debug)));
    });

    group.finish();
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    let logger = logger(Severity::Debug).with_fields([("user_id", 42)]);

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("metric", |b| {
        b.iter(|| logger.metric(black_box("requests=1")));
    });

    group.bench_function("error_with_stack", |b| {
        b.iter(|| logger.error(black_box("Error message")));
    });

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = logger(Severity::Error);

    group.bench_function("filtered_debug", |b| {
        b.iter(|| logger.debug(black_box("never written")));
    });

    group.bench_function("is_enabled", |b| {
        b.iter(|| black_box(logger.is_enabled(black_box(Severity::Warn))));
    });

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");
    group.throughput(Throughput::Elements(400));

    let logger = Arc::new(logger(Severity::Info));

    group.bench_function("4_threads", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        let scoped = logger.with_field("thread", t);
                        for _ in 0..100 {
                            scoped.info("concurrent message");
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_derivation,
    bench_emission,
    bench_level_filtering,
    bench_concurrent_logging
);
criterion_main!(benches);
