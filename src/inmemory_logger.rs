// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Logger
//!
//! An in-memory [`Logger`] for tests. Records are captured as they arrive and can be read
//! back either as formatted lines ([`InMemoryLogger::drain_logs`]) or as whole records
//! ([`InMemoryLogger::drain_records`]), which is how tests check which tag the facade
//! derived for a statement.

use crate::log_record::LogRecord;
use crate::logger::Logger;
use std::sync::{Mutex, PoisonError};

/// A logger that keeps every record in memory.
///
/// # Example
///
/// ```rust
/// use calltag::InMemoryLogger;
/// use calltag::global::set_global_loggers;
/// use std::sync::Arc;
///
/// let logger = Arc::new(InMemoryLogger::new());
/// set_global_loggers(vec![logger.clone()]);
///
/// calltag::info!(tag: "Test", "message {}", 42);
///
/// let logs = logger.drain_logs();
/// assert!(logs.contains("[Test]: message 42"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl InMemoryLogger {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Drains all records as formatted lines joined by newlines, clearing the buffer.
    pub fn drain_logs(&self) -> String {
        self.drain_records()
            .iter()
            .map(LogRecord::line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Drains all records, clearing the buffer.
    pub fn drain_records(&self) -> Vec<LogRecord> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *records)
    }

    /// Writes all records to stderr (or the console on wasm32), clearing the buffer.
    pub fn drain_to_console(&self) {
        for record in self.drain_records() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&record.line().into());
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", record);
        }
    }
}

impl Logger for InMemoryLogger {
    fn finish_log_record(&self, record: LogRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    fn prepare_to_die(&self) {
        // No-op since we're storing in memory, no flushing needed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn drain_clears() {
        let logger = InMemoryLogger::new();
        logger.finish_log_record(LogRecord::new(Level::Info, "A", "one"));
        logger.finish_log_record(LogRecord::new(Level::Error, "B", "two"));
        assert_eq!(logger.drain_logs(), "[A]: one\n[B]: two");
        assert_eq!(logger.drain_logs(), "");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn drain_records_keeps_fields() {
        let logger = InMemoryLogger::new();
        logger.finish_log_record(LogRecord::new(Level::Warn, "T", "m"));
        let records = logger.drain_records();
        assert_eq!(records, vec![LogRecord::new(Level::Warn, "T", "m")]);
        assert!(logger.drain_records().is_empty());
    }
}
