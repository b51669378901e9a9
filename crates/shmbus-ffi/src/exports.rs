//! C ABI exported functions
//!
//! These functions are the entry points called by host-language bindings.
//! None of them unwind: a panic is reported through the router and the
//! export returns its failure value.

use crate::panic_guard::{catch_panic, install_panic_hook};
use shmbus_core::{LogError, LogLevel, LogResult, LoggerConfig, SinkKind};
use shmbus_logging::{CallbackAdapter, LogRouter};
use std::borrow::Cow;
use std::ffi::{CStr, CString, c_char};
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::ptr;

/// Custom logger callback supplied by a host
///
/// # Parameters
/// - `level`: Log level (0=Trace, 1=Debug, 2=Info, 3=Warning, 4=Error, 5=Fatal)
/// - `origin`: Origin of the record, null-terminated UTF-8, or null when absent
/// - `message`: Log message, null-terminated UTF-8
///
/// Both strings are only valid for the duration of the call.
pub type ShmbusLogCallback =
    extern "C" fn(level: u8, origin: *const c_char, message: *const c_char);

/// Status returned by exports that report one
pub const STATUS_OK: u32 = 0;

/// Status returned when an export panicked; the code of [`LogError::Internal`]
pub const STATUS_INTERNAL: u32 = 8;

fn status(export: &'static str, result: LogResult<()>) -> u32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => {
            tracing::warn!(export, error = %e, "logging configuration rejected");
            e.error_code()
        }
    }
}

/// Borrow a C string, replacing invalid UTF-8
///
/// # Safety
/// `ptr` must be null or a valid null-terminated string that outlives `'a`.
unsafe fn c_str<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: caller guarantees ptr is a valid null-terminated string
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy())
}

/// Convert to a C string, dropping interior NULs
fn to_c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

/// Write a log record
///
/// # Parameters
/// - `level`: Log level (0-5); other values drop the record
/// - `origin`: Origin label, or null
/// - `message`: Message text; null drops the record
///
/// # Safety
/// - `origin` must be null or a valid null-terminated C string
/// - `message` must be null or a valid null-terminated C string
#[unsafe(no_mangle)]
pub unsafe extern "C" fn shmbus_log(level: u8, origin: *const c_char, message: *const c_char) {
    catch_panic(
        "shmbus_log",
        (),
        AssertUnwindSafe(|| unsafe { shmbus_log_impl(level, origin, message) }),
    )
}

unsafe fn shmbus_log_impl(level: u8, origin: *const c_char, message: *const c_char) {
    let Some(level) = LogLevel::from_u8(level) else {
        return;
    };
    // SAFETY: caller guarantees both pointers are null or valid C strings
    let Some(message) = (unsafe { c_str(message) }) else {
        return;
    };
    let origin = unsafe { c_str(origin) };

    LogRouter::global().write(level, origin.as_deref(), &message);
}

/// Set the log level
///
/// # Returns
/// false if `level` is not a valid level (0-5); the level is unchanged
#[unsafe(no_mangle)]
pub extern "C" fn shmbus_set_log_level(level: u8) -> bool {
    catch_panic("shmbus_set_log_level", false, || {
        match LogLevel::from_u8(level) {
            Some(level) => {
                LogRouter::global().set_level(level);
                true
            }
            None => false,
        }
    })
}

/// Get the current log level (0-5)
#[unsafe(no_mangle)]
pub extern "C" fn shmbus_get_log_level() -> u8 {
    catch_panic("shmbus_get_log_level", LogLevel::Info as u8, || {
        LogRouter::global().level() as u8
    })
}

/// Set the log level from `SHMBUS_LOG_LEVEL`, or `level` if unset or invalid
///
/// An out-of-range `level` falls back to Info.
#[unsafe(no_mangle)]
pub extern "C" fn shmbus_set_log_level_from_env_or(level: u8) {
    catch_panic("shmbus_set_log_level_from_env_or", (), || {
        let default = LogLevel::from_u8(level).unwrap_or_default();
        LogRouter::global().set_level_from_env_or(default);
    })
}

/// Set the log level from `SHMBUS_LOG_LEVEL`, or Info if unset or invalid
#[unsafe(no_mangle)]
pub extern "C" fn shmbus_set_log_level_from_env_or_default() {
    catch_panic("shmbus_set_log_level_from_env_or_default", (), || {
        LogRouter::global().set_level_from_env_or_default();
    })
}

/// Install a custom logger
///
/// Can succeed only once per process and should be called before any record
/// is written.
///
/// # Returns
/// true if installed; false if `callback` is null or a custom logger is
/// already installed
#[unsafe(no_mangle)]
pub extern "C" fn shmbus_set_logger(callback: Option<ShmbusLogCallback>) -> bool {
    catch_panic("shmbus_set_logger", false, || {
        status("shmbus_set_logger", set_logger_impl(callback)) == STATUS_OK
    })
}

fn set_logger_impl(callback: Option<ShmbusLogCallback>) -> LogResult<()> {
    let adapter = CallbackAdapter::from_option(callback.map(host_callback))?;
    LogRouter::global().install_callback(adapter)
}

/// Adapt a host callback; the function pointer is copied into the closure
fn host_callback(
    callback: ShmbusLogCallback,
) -> impl Fn(LogLevel, Option<&str>, &str) + Send + Sync + 'static {
    move |level: LogLevel, origin: Option<&str>, message: &str| {
        let origin = origin.map(to_c_string);
        let message = to_c_string(message);
        callback(
            level as u8,
            origin.as_ref().map_or(ptr::null(), |o| o.as_ptr()),
            message.as_ptr(),
        );
    }
}

/// Make the console the active logger
#[unsafe(no_mangle)]
pub extern "C" fn shmbus_use_console_logger() -> u32 {
    catch_panic("shmbus_use_console_logger", STATUS_INTERNAL, || {
        status(
            "shmbus_use_console_logger",
            LogRouter::global().select(&SinkKind::Console),
        )
    })
}

/// Make a bounded in-memory buffer the active logger
///
/// # Returns
/// 0 on success; 3 if built without the `buffer` feature; 5 if `capacity` is 0
#[unsafe(no_mangle)]
pub extern "C" fn shmbus_use_buffer_logger(capacity: usize) -> u32 {
    catch_panic("shmbus_use_buffer_logger", STATUS_INTERNAL, || {
        status(
            "shmbus_use_buffer_logger",
            LogRouter::global().select(&SinkKind::Buffer { capacity }),
        )
    })
}

/// Make a file the active logger, appending to `path`
///
/// # Returns
/// 0 on success; 3 if built without the `file` feature; 5 if `path` is null
/// or empty; 6 if the file cannot be opened
///
/// # Safety
/// - `path` must be null or a valid null-terminated C string
#[unsafe(no_mangle)]
pub unsafe extern "C" fn shmbus_use_file_logger(path: *const c_char) -> u32 {
    catch_panic(
        "shmbus_use_file_logger",
        STATUS_INTERNAL,
        AssertUnwindSafe(|| {
            // SAFETY: caller guarantees path is null or a valid C string
            let result = match unsafe { c_str(path) } {
                Some(path) => LogRouter::global().select(&SinkKind::File {
                    path: PathBuf::from(path.into_owned()),
                }),
                None => Err(LogError::InvalidConfig("file path is null".to_string())),
            };
            status("shmbus_use_file_logger", result)
        }),
    )
}

/// Apply a JSON logger configuration
///
/// ```json
/// {"level": "debug", "sink": {"type": "buffer", "capacity": 256}}
/// ```
///
/// A null or empty document applies the defaults: console logger, level from
/// `SHMBUS_LOG_LEVEL` or Info.
///
/// # Safety
/// - `json` must be valid for `len` bytes if not null
#[unsafe(no_mangle)]
pub unsafe extern "C" fn shmbus_configure_logging(json: *const u8, len: usize) -> u32 {
    catch_panic(
        "shmbus_configure_logging",
        STATUS_INTERNAL,
        AssertUnwindSafe(|| {
            let bytes: &[u8] = if json.is_null() || len == 0 {
                &[]
            } else {
                // SAFETY: caller guarantees json is valid for len bytes
                unsafe { std::slice::from_raw_parts(json, len) }
            };
            let result = LoggerConfig::from_json(bytes)
                .and_then(|config| LogRouter::global().configure(&config));
            if let Ok(level) = &result {
                tracing::debug!(%level, "logging configured");
            }
            status("shmbus_configure_logging", result.map(|_| ()))
        }),
    )
}

/// Report panics anywhere in the process through the active logger
#[unsafe(no_mangle)]
pub extern "C" fn shmbus_install_panic_hook() {
    catch_panic("shmbus_install_panic_hook", (), install_panic_hook)
}
