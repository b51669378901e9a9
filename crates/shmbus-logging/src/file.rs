//! Append-only file sink

use crate::sink::{LogSink, SinkError};
use parking_lot::Mutex;
use shmbus_core::{LogError, LogRecord, LogResult};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends rendered records, one per line, to a file
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(LogError::InvalidConfig(
                "file path must not be empty".to_string(),
            ));
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LogError::Io(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            file: Mutex::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<(), SinkError> {
        let mut line = record.render();
        line.push('\n');

        self.file
            .lock()
            .write_all(line.as_bytes())
            .map_err(|e| SinkError::new(self.name(), e))
    }
}
