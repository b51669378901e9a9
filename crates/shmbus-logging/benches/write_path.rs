//! Write Path Benchmarks
//!
//! Measures the cost of a `LogRouter::write` call for records that are
//! filtered out by the threshold and for records that reach a sink.
//!
//! # Cases
//!
//! - **Filtered**: level below threshold, no record is built
//! - **Callback**: record delivered to a no-op custom callback
//! - **Buffer**: record copied into a bounded in-memory buffer

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shmbus_logging::{CallbackAdapter, LogLevel, LogRouter};

fn bench_filtered(c: &mut Criterion) {
    let router = LogRouter::new();
    router.set_level(LogLevel::Error);

    c.bench_function("write_filtered", |b| {
        b.iter(|| router.write(black_box(LogLevel::Debug), Some("bench"), "dropped"))
    });
}

fn bench_callback(c: &mut Criterion) {
    let router = LogRouter::new();
    router
        .install_callback(CallbackAdapter::from_fn(|level, origin, message| {
            black_box((level, origin, message));
        }))
        .unwrap_or_else(|e| panic!("install failed: {e}"));

    c.bench_function("write_callback", |b| {
        b.iter(|| router.write(black_box(LogLevel::Info), Some("bench"), "delivered"))
    });
}

#[cfg(feature = "buffer")]
fn bench_buffer(c: &mut Criterion) {
    let router = LogRouter::new();
    let _buffer = router
        .use_buffer(4096)
        .unwrap_or_else(|e| panic!("buffer failed: {e}"));

    c.bench_function("write_buffer", |b| {
        b.iter(|| router.write(black_box(LogLevel::Info), Some("bench"), "stored"))
    });
}

#[cfg(not(feature = "buffer"))]
fn bench_buffer(_c: &mut Criterion) {}

criterion_group!(benches, bench_filtered, bench_callback, bench_buffer);
criterion_main!(benches);
