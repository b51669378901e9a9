#![allow(non_snake_case)]

use super::*;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;

/// Collects (level, target, origin) of every event it sees
#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<(tracing::Level, String, String)>>>,
}

#[derive(Default)]
struct OriginVisitor {
    origin: String,
}

impl Visit for OriginVisitor {
    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "origin" {
            self.origin = value.to_string();
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = OriginVisitor::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        self.events.lock().push((
            *metadata.level(),
            metadata.target().to_string(),
            visitor.origin,
        ));
    }
}

#[test]
fn TracingSink___name___is_tracing() {
    assert_eq!(TracingSink::new().name(), "tracing");
}

#[test]
fn TracingSink___emit___forwards_event_with_external_target() {
    let capture = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        TracingSink
            .emit(&LogRecord::new(LogLevel::Warning, Some("listener"), "late"))
            .unwrap();
    });

    let events = capture.events.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, tracing::Level::WARN);
    assert_eq!(events[0].1, EXTERNAL_TARGET);
    assert_eq!(events[0].2, "listener");
}

#[test]
fn TracingSink___emit_fatal___maps_to_error() {
    let capture = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        TracingSink
            .emit(&LogRecord::new(LogLevel::Fatal, None, "abort"))
            .unwrap();
    });

    let events = capture.events.lock();
    assert_eq!(events[0].0, tracing::Level::ERROR);
}
