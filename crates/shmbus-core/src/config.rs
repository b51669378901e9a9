//! Log level resolution and logger configuration

use crate::{LogError, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted for a log level override
pub const LOG_LEVEL_ENV_VAR: &str = "SHMBUS_LOG_LEVEL";

/// Resolve the effective log level, falling back to [`LogLevel::Info`]
///
/// Precedence: `explicit`, then `env_value` if it parses, then `Info`.
/// An unparseable `env_value` is treated as absent.
pub fn resolve(explicit: Option<LogLevel>, env_value: Option<&str>) -> LogLevel {
    resolve_or(explicit, env_value, LogLevel::Info)
}

/// Same as [`resolve`] with a caller-chosen fallback
pub fn resolve_or(
    explicit: Option<LogLevel>,
    env_value: Option<&str>,
    default: LogLevel,
) -> LogLevel {
    explicit
        .or_else(|| env_value.and_then(|v| v.parse().ok()))
        .unwrap_or(default)
}

/// Read the raw value of [`LOG_LEVEL_ENV_VAR`], if set and valid unicode
pub fn read_env_level() -> Option<String> {
    std::env::var(LOG_LEVEL_ENV_VAR).ok()
}

/// Builtin sink selection
///
/// Every kind is always representable, so a configuration can request a sink
/// this build does not contain and be told so.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SinkKind {
    /// Standard output
    #[default]
    Console,
    /// Bounded in-memory buffer
    Buffer {
        #[serde(default = "default_buffer_capacity")]
        capacity: usize,
    },
    /// Append-only log file
    File { path: PathBuf },
    /// Forward into the `tracing` ecosystem
    Tracing,
    /// Forward to the `log` facade's global logger
    Log,
}

impl SinkKind {
    /// Short name, matching the sink's reported name
    pub fn name(&self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::Buffer { .. } => "buffer",
            SinkKind::File { .. } => "file",
            SinkKind::Tracing => "tracing",
            SinkKind::Log => "log",
        }
    }
}

fn default_buffer_capacity() -> usize {
    1024
}

/// Logger configuration, typically supplied by a host binding as JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Explicit log level; overrides the environment when set
    #[serde(default)]
    pub level: Option<LogLevel>,

    /// Sink to activate
    #[serde(default)]
    pub sink: SinkKind,
}

impl LoggerConfig {
    /// Create a new default configuration (console sink, level from env or Info)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, LogError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_sink(mut self, sink: SinkKind) -> Self {
        self.sink = sink;
        self
    }

    /// Check values serde cannot express
    pub fn validate(&self) -> Result<(), LogError> {
        match &self.sink {
            SinkKind::Buffer { capacity: 0 } => Err(LogError::InvalidConfig(
                "buffer capacity must be greater than zero".to_string(),
            )),
            SinkKind::File { path } if path.as_os_str().is_empty() => Err(
                LogError::InvalidConfig("file path must not be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// The level this configuration resolves to, given an environment value
    pub fn effective_level(&self, env_value: Option<&str>) -> LogLevel {
        resolve(self.level, env_value)
    }
}
