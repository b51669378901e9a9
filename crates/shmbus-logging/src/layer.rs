//! Tracing layer that routes events into the log router

use crate::external::EXTERNAL_TARGET;
use crate::router::LogRouter;
use shmbus_core::LogLevel;
use std::fmt::Write;
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that forwards events to a [`LogRouter`]
///
/// The event target becomes the record's origin. Events re-emitted by the
/// tracing sink are skipped.
pub struct RouterLayer {
    router: &'static LogRouter,
}

impl RouterLayer {
    /// Create a layer routing into the global router
    pub fn new() -> Self {
        Self {
            router: LogRouter::global(),
        }
    }

    /// Create a layer with a specific router
    pub fn with_router(router: &'static LogRouter) -> Self {
        Self { router }
    }

    /// Convert tracing Level to our LogLevel
    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warning,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for RouterLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for RouterLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // The threshold can change at any time, so callsite interest is never
    // cached as always or never; `enabled` decides per event.
    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        if metadata.target() == EXTERNAL_TARGET {
            Interest::never()
        } else {
            Interest::sometimes()
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() == EXTERNAL_TARGET {
            return;
        }

        let level = Self::convert_level(metadata.level());
        if !self.router.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.router
            .write(level, Some(metadata.target()), &visitor.finish());
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        metadata.target() != EXTERNAL_TARGET
            && self
                .router
                .is_enabled(Self::convert_level(metadata.level()))
    }
}

/// Visitor that builds `message key=value ...` from an event's fields
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match self.message {
            Some(mut message) => {
                message.push_str(&self.fields);
                message
            }
            None => self.fields.trim_start().to_string(),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

/// Route this process's `tracing` events into the global router
///
/// Installs a registry with [`RouterLayer`] as the global default. Does nothing
/// if another global subscriber is already set.
pub fn init_logging() {
    use tracing_subscriber::prelude::*;

    let subscriber = tracing_subscriber::registry().with(RouterLayer::new());

    // Ignore the error if a global default is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Same as [`init_logging`], also resolving the threshold from the environment
pub fn init_logging_from_env() -> LogLevel {
    let level = LogRouter::global().set_level_from_env_or_default();
    init_logging();
    level
}
