#![allow(non_snake_case)]

use super::*;
use std::sync::{Mutex, MutexGuard};

/// Global `log` logger keeping (level, target, message) of every record
struct CaptureLogger;

static CAPTURED: Mutex<Vec<(log::Level, String, String)>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;
static FACADE_LOCK: Mutex<()> = Mutex::new(());

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.lock().unwrap().push((
            record.level(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

/// Install the capture logger once per binary and start from a clean slate
fn capture(max_level: log::LevelFilter) -> MutexGuard<'static, ()> {
    let guard = FACADE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(max_level);
    CAPTURED.lock().unwrap().clear();
    guard
}

#[test]
fn LogFacadeSink___name___is_log() {
    assert_eq!(LogFacadeSink::new().name(), "log");
}

#[test]
fn LogFacadeSink___emit_with_origin___prefixes_origin() {
    let _guard = capture(log::LevelFilter::Trace);

    LogFacadeSink
        .emit(&LogRecord::new(LogLevel::Warning, Some("publisher"), "pool low"))
        .unwrap();

    assert_eq!(
        *CAPTURED.lock().unwrap(),
        vec![(
            log::Level::Warn,
            EXTERNAL_TARGET.to_string(),
            "publisher: pool low".to_string()
        )]
    );
}

#[test]
fn LogFacadeSink___emit_without_origin___forwards_message_only() {
    let _guard = capture(log::LevelFilter::Trace);

    LogFacadeSink
        .emit(&LogRecord::new(LogLevel::Trace, None, "tick"))
        .unwrap();

    assert_eq!(CAPTURED.lock().unwrap()[0].2, "tick");
}

#[test]
fn LogFacadeSink___fatal___maps_to_error() {
    let _guard = capture(log::LevelFilter::Trace);

    LogFacadeSink
        .emit(&LogRecord::new(LogLevel::Fatal, None, "pool corrupted"))
        .unwrap();

    assert_eq!(CAPTURED.lock().unwrap()[0].0, log::Level::Error);
}

#[test]
fn LogFacadeSink___above_max_level___is_skipped() {
    let _guard = capture(log::LevelFilter::Warn);

    LogFacadeSink
        .emit(&LogRecord::new(LogLevel::Info, None, "quiet"))
        .unwrap();
    LogFacadeSink
        .emit(&LogRecord::new(LogLevel::Error, None, "loud"))
        .unwrap();

    let captured = CAPTURED.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].2, "loud");
}

#[test]
fn LogRouter___select_log___routes_through_facade() {
    let _guard = capture(log::LevelFilter::Trace);
    let router = crate::LogRouter::new();
    router.select(&shmbus_core::SinkKind::Log).unwrap();

    router.write(LogLevel::Error, Some("node"), "lost peer");

    assert_eq!(
        CAPTURED.lock().unwrap().last().map(|c| c.2.clone()),
        Some("node: lost peer".to_string())
    );
}
