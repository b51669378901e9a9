//! shmbus-ffi - C ABI exports of the logging subsystem
//!
//! Every host-language binding (C, C++, .NET, Python, ...) drives the
//! process-wide log router through these functions.
//!
//! # FFI Functions
//!
//! The following functions are exported with C linkage:
//!
//! - `shmbus_log` - Write a log record
//! - `shmbus_set_log_level` / `shmbus_get_log_level` - Threshold access
//! - `shmbus_set_log_level_from_env_or` - Threshold from `SHMBUS_LOG_LEVEL` with a fallback
//! - `shmbus_set_log_level_from_env_or_default` - Same, falling back to Info
//! - `shmbus_set_logger` - Install a custom logger callback (once per process)
//! - `shmbus_use_console_logger` / `shmbus_use_buffer_logger` / `shmbus_use_file_logger`
//!   - Select a builtin logger
//! - `shmbus_configure_logging` - Apply a JSON logger configuration
//! - `shmbus_install_panic_hook` - Report panics through the active logger
//!
//! Exports returning `u32` return 0 on success or a [`LogError`] code.

mod exports;
mod panic_guard;

pub use exports::{
    STATUS_INTERNAL, STATUS_OK, ShmbusLogCallback, shmbus_configure_logging, shmbus_get_log_level,
    shmbus_install_panic_hook, shmbus_log, shmbus_set_log_level,
    shmbus_set_log_level_from_env_or, shmbus_set_log_level_from_env_or_default,
    shmbus_set_logger, shmbus_use_buffer_logger, shmbus_use_console_logger,
    shmbus_use_file_logger,
};
pub use panic_guard::{PANIC_ORIGIN, catch_panic, install_panic_hook};

// Re-export types needed by Rust hosts embedding the library
pub use shmbus_core::{LogError, LogLevel, LoggerConfig, SinkKind};
pub use shmbus_logging::{CallbackAdapter, LogRouter};

/// Serializes unit tests that reconfigure the global router
#[cfg(test)]
static GLOBAL_ROUTER_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
