//! Bounded in-memory sink

use crate::sink::{LogSink, SinkError};
use parking_lot::Mutex;
use shmbus_core::{LogError, LogRecord, LogResult, OwnedLogRecord};
use std::collections::VecDeque;

/// Keeps the most recent records in memory, evicting the oldest at capacity
///
/// Useful for tests and for hosts that want to inspect recent log output.
#[derive(Debug)]
pub struct BufferSink {
    records: Mutex<VecDeque<OwnedLogRecord>>,
    capacity: usize,
}

impl BufferSink {
    /// Create a buffer holding at most `capacity` records
    pub fn new(capacity: usize) -> LogResult<Self> {
        if capacity == 0 {
            return Err(LogError::InvalidConfig(
                "buffer capacity must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            records: Mutex::new(VecDeque::with_capacity(capacity.min(4096))),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Snapshot of buffered records, oldest first
    pub fn records(&self) -> Vec<OwnedLogRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Snapshot of buffered records rendered as lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.render()).collect()
    }

    /// Remove and return all buffered records
    pub fn drain(&self) -> Vec<OwnedLogRecord> {
        self.records.lock().drain(..).collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for BufferSink {
    fn name(&self) -> &'static str {
        "buffer"
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<(), SinkError> {
        let owned = record.to_owned_record();
        let mut records = self.records.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(owned);
        Ok(())
    }
}
