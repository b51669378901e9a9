//! Panic handling for FFI boundaries
//!
//! This module provides utilities to safely catch panics at FFI boundaries,
//! preventing them from unwinding into host language runtimes.

use shmbus_logging::{LogLevel, LogRouter};
use std::any::Any;
use std::io::{self, Write};
use std::panic;

/// Origin used for records about panics
pub const PANIC_ORIGIN: &str = "shmbus::panic";

/// Run `f`, returning `fallback` instead of unwinding if it panics
///
/// The panic is written to the global router at `Error` with the name of the
/// export as part of the message.
///
/// # Example
///
/// ```ignore
/// #[unsafe(no_mangle)]
/// pub extern "C" fn shmbus_get_log_level() -> u8 {
///     catch_panic("shmbus_get_log_level", LogLevel::Info as u8, || {
///         LogRouter::global().level() as u8
///     })
/// }
/// ```
pub fn catch_panic<F, R>(export: &'static str, fallback: R, f: F) -> R
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    panic::catch_unwind(f).unwrap_or_else(|payload| {
        let message = format!("{} {}", export, panic_to_string(&payload));
        LogRouter::global().write(LogLevel::Error, Some(PANIC_ORIGIN), &message);
        fallback
    })
}

/// Convert a panic payload to a human-readable string
fn panic_to_string(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked with unknown payload".to_string()
    }
}

/// Install a panic hook that reports panics through the global router
///
/// Panics are written at `Fatal` with file, line and column. The hook
/// replaces any existing hook and is global for the whole process.
///
/// A panic raised by a sink while it emits is not written back through the
/// router: a second panic inside a panic hook aborts the process. It goes to
/// stderr instead and the router counts the sink failure as usual.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        let message = match info.location() {
            Some(location) => format!(
                "panic at {}:{}:{}: {}",
                location.file(),
                location.line(),
                location.column(),
                payload
            ),
            None => format!("panic at unknown location: {}", payload),
        };

        if LogRouter::is_emitting() {
            let _ = writeln!(io::stderr(), "shmbus: {}", message);
            return;
        }
        LogRouter::global().write(LogLevel::Fatal, Some(PANIC_ORIGIN), &message);
    }));
}
