//! Process-wide log router

use crate::callback::{CallbackAdapter, CallbackSink};
use crate::sink::{ConsoleSink, LogSink};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use shmbus_core::{
    LogError, LogLevel, LogRecord, LogResult, LoggerConfig, SinkKind, read_env_level, resolve_or,
};
use std::cell::Cell;
use std::fmt;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

/// Global log router
static ROUTER: OnceCell<LogRouter> = OnceCell::new();

thread_local! {
    static EMITTING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside a sink until dropped
struct EmitGuard(bool);

impl EmitGuard {
    fn enter() -> Self {
        Self(EMITTING.replace(true))
    }
}

impl Drop for EmitGuard {
    fn drop(&mut self) {
        EMITTING.set(self.0);
    }
}

/// Single entry point for log traffic
///
/// Holds the active sink and the severity threshold. Records below the
/// threshold are dropped; the rest go to the active sink. Writing never fails
/// and never panics: sink errors are counted in [`emit_failures`] and the
/// first one after each sink change is reported on stderr.
///
/// A custom callback can be installed at most once per router. It must be
/// installed before the first record is written if no record may go to the
/// previous sink.
///
/// [`emit_failures`]: LogRouter::emit_failures
pub struct LogRouter {
    sink: RwLock<Arc<dyn LogSink>>,
    threshold: AtomicU8,
    callback: OnceCell<Arc<CallbackAdapter>>,
    emit_failures: AtomicU64,
    failure_reported: AtomicBool,
}

impl LogRouter {
    /// Create a router with the console sink and an `Info` threshold
    pub fn new() -> Self {
        Self {
            sink: RwLock::new(Arc::new(ConsoleSink)),
            threshold: AtomicU8::new(LogLevel::Info as u8),
            callback: OnceCell::new(),
            emit_failures: AtomicU64::new(0),
            failure_reported: AtomicBool::new(false),
        }
    }

    /// Get the process-wide router, creating it on first use
    pub fn global() -> &'static LogRouter {
        ROUTER.get_or_init(LogRouter::new)
    }

    /// Write a record if `level` passes the threshold
    pub fn write(&self, level: LogLevel, origin: Option<&str>, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        let record = LogRecord::new(level, origin, message);
        // Emit outside the lock so a slow sink doesn't block a sink swap
        let sink = self.sink.read().clone();

        let emitted = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = EmitGuard::enter();
            sink.emit(&record)
        }));
        match emitted {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self.report_failure(&e.to_string()),
            Err(_) => self.report_failure(&format!("{} logger panicked", sink.name())),
        }
    }

    /// Whether the current thread is inside a sink's `emit`
    ///
    /// A panic hook uses this to tell a panicking sink apart from a panic
    /// elsewhere: the former must not be written back through the router.
    pub fn is_emitting() -> bool {
        EMITTING.get()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.threshold.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::SeqCst)).unwrap_or_default()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Set the threshold from `SHMBUS_LOG_LEVEL`, or `default` if it is unset
    /// or not a level name
    ///
    /// The variable is read on every call. Returns the level applied.
    pub fn set_level_from_env_or(&self, default: LogLevel) -> LogLevel {
        let level = resolve_or(None, read_env_level().as_deref(), default);
        self.set_level(level);
        level
    }

    /// Same as [`set_level_from_env_or`](Self::set_level_from_env_or) with `Info`
    pub fn set_level_from_env_or_default(&self) -> LogLevel {
        self.set_level_from_env_or(LogLevel::Info)
    }

    /// Replace the active sink
    ///
    /// A custom callback can only become the active sink through
    /// [`install_callback`](Self::install_callback).
    pub fn install_sink(&self, sink: Arc<dyn LogSink>) {
        let name = sink.name();
        *self.sink.write() = sink;
        self.failure_reported.store(false, Ordering::SeqCst);
        tracing::debug!(sink = name, "log sink installed");
    }

    /// Install a custom callback as the active sink
    ///
    /// Only the first call in the router's life succeeds. Later calls return
    /// [`LogError::DuplicateInstall`] and leave the first callback in place.
    pub fn install_callback(&self, adapter: CallbackAdapter) -> LogResult<()> {
        let adapter = Arc::new(adapter);
        self.callback
            .set(adapter.clone())
            .map_err(|_| LogError::DuplicateInstall)?;
        self.install_sink(Arc::new(CallbackSink(adapter)));
        Ok(())
    }

    /// Whether a custom callback has ever been installed
    pub fn has_callback(&self) -> bool {
        self.callback.get().is_some()
    }

    /// Build and install a builtin sink
    ///
    /// Fails with [`LogError::Unsupported`] when the sink was not compiled in.
    pub fn select(&self, kind: &SinkKind) -> LogResult<()> {
        let sink = build_sink(kind)?;
        self.install_sink(sink);
        Ok(())
    }

    /// Install a fresh buffer sink and return it for inspection
    #[cfg(feature = "buffer")]
    pub fn use_buffer(&self, capacity: usize) -> LogResult<Arc<crate::BufferSink>> {
        let buffer = Arc::new(crate::BufferSink::new(capacity)?);
        self.install_sink(buffer.clone());
        Ok(buffer)
    }

    /// Apply a configuration: select its sink, then resolve and set the level
    ///
    /// The level is the configured one if present, else `SHMBUS_LOG_LEVEL`,
    /// else `Info`. Returns the level applied.
    pub fn configure(&self, config: &LoggerConfig) -> LogResult<LogLevel> {
        config.validate()?;
        self.select(&config.sink)?;
        let level = config.effective_level(read_env_level().as_deref());
        self.set_level(level);
        Ok(level)
    }

    pub fn active_sink_name(&self) -> &'static str {
        self.sink.read().name()
    }

    /// Number of records a sink failed to emit
    pub fn emit_failures(&self) -> u64 {
        self.emit_failures.load(Ordering::Relaxed)
    }

    fn report_failure(&self, reason: &str) {
        self.emit_failures.fetch_add(1, Ordering::Relaxed);
        if !self.failure_reported.swap(true, Ordering::SeqCst) {
            let _ = writeln!(std::io::stderr(), "shmbus: {}", reason);
        }
    }
}

impl Default for LogRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRouter")
            .field("sink", &self.active_sink_name())
            .field("threshold", &self.level())
            .field("has_callback", &self.has_callback())
            .finish()
    }
}

fn build_sink(kind: &SinkKind) -> LogResult<Arc<dyn LogSink>> {
    match kind {
        SinkKind::Console => Ok(Arc::new(ConsoleSink)),
        SinkKind::Buffer { capacity } => buffer_sink(*capacity),
        SinkKind::File { path } => file_sink(path),
        SinkKind::Tracing => tracing_sink(),
        SinkKind::Log => log_sink(),
    }
}

#[cfg(feature = "buffer")]
fn buffer_sink(capacity: usize) -> LogResult<Arc<dyn LogSink>> {
    Ok(Arc::new(crate::BufferSink::new(capacity)?))
}

#[cfg(not(feature = "buffer"))]
fn buffer_sink(_capacity: usize) -> LogResult<Arc<dyn LogSink>> {
    Err(LogError::Unsupported {
        sink: "buffer",
        feature: "buffer",
    })
}

#[cfg(feature = "file")]
fn file_sink(path: &std::path::Path) -> LogResult<Arc<dyn LogSink>> {
    Ok(Arc::new(crate::FileSink::open(path)?))
}

#[cfg(not(feature = "file"))]
fn file_sink(_path: &std::path::Path) -> LogResult<Arc<dyn LogSink>> {
    Err(LogError::Unsupported {
        sink: "file",
        feature: "file",
    })
}

#[cfg(feature = "tracing-sink")]
fn tracing_sink() -> LogResult<Arc<dyn LogSink>> {
    Ok(Arc::new(crate::TracingSink))
}

#[cfg(not(feature = "tracing-sink"))]
fn tracing_sink() -> LogResult<Arc<dyn LogSink>> {
    Err(LogError::Unsupported {
        sink: "tracing",
        feature: "tracing-sink",
    })
}

#[cfg(feature = "log-sink")]
fn log_sink() -> LogResult<Arc<dyn LogSink>> {
    Ok(Arc::new(crate::LogFacadeSink))
}

#[cfg(not(feature = "log-sink"))]
fn log_sink() -> LogResult<Arc<dyn LogSink>> {
    Err(LogError::Unsupported {
        sink: "log",
        feature: "log-sink",
    })
}
