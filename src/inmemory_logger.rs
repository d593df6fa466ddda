// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Logger
//!
//! This module provides an in-memory logger for testing and debugging purposes.
//! The `InMemoryLogger` keeps serialized records in memory rather than writing them to stderr,
//! making it ideal for:
//!
//! - Unit testing hooks and the code that registers them
//! - Programmatically examining log output
//!
//! ## Architecture
//!
//! The logger uses a `Mutex<Vec<String>>` internally, one JSON line per record, so that many
//! threads may log through the same pipeline while keeping a consistent view of the output.

use crate::log_record::LogRecord;
use crate::logger::Logger;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A logger that stores each record as a line of JSON.
///
/// # Example
///
/// ```rust
/// use hookwise::{InMemoryLogger, Pipeline, StaticFieldsHook, StaticFieldsOptions};
/// use std::sync::Arc;
///
/// fn function_under_test(pipeline: &Pipeline) {
///     pipeline.warn("Something suspicious happened");
///     pipeline.error("An error occurred");
/// }
///
/// let logger = Arc::new(InMemoryLogger::new());
/// let mut pipeline = Pipeline::new();
/// pipeline.add_hook(StaticFieldsHook::new(StaticFieldsOptions::new().with_field("code", 404)));
/// pipeline.add_logger(logger.clone());
///
/// function_under_test(&pipeline);
///
/// let records = logger.drain_records();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0]["msg"], "Something suspicious happened");
/// assert_eq!(records[1]["code"], 404);
/// ```
#[derive(Debug)]
pub struct InMemoryLogger {
    logs: Mutex<Vec<String>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for InMemoryLogger trait implementations:
//
// - Debug: Derived for diagnostic purposes and required by Logger trait
// - Default: Implemented with obvious zero-value (empty log buffer)
// - Clone: NOT implemented - loggers are shared through Arc, not duplicated
// - PartialEq/Eq: NOT implemented - mutex state comparison is problematic
// - Send/Sync: Automatically implemented due to Mutex usage (required for Logger trait)

impl Default for InMemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogger {
    /// Creates a new `InMemoryLogger` with an empty log buffer.
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }

    //a panic while pushing a String cannot leave the Vec half-written
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.logs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drains all logs into a single string, clearing the internal buffer.
    ///
    /// Records are joined by newlines.  Subsequent calls return an empty string unless new
    /// records have arrived.
    pub fn drain_logs(&self) -> String {
        let mut logs = self.lock();
        let result = logs.join("\n");
        logs.clear();
        result
    }

    /// Drains all logs as parsed JSON objects, oldest first, clearing the internal buffer.
    pub fn drain_records(&self) -> Vec<Value> {
        self.lock()
            .drain(..)
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }

    /// Writes all logs to stderr, clearing the internal buffer.
    pub fn drain_to_console(&self) {
        let mut logs = self.lock();
        for log in logs.iter() {
            eprintln!("{}", log);
        }
        logs.clear();
    }
}

impl Logger for InMemoryLogger {
    fn finish_log_record(&self, record: LogRecord) {
        let log_string = record.to_string();
        self.lock().push(log_string);
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>> {
        Box::pin(async move {
            self.finish_log_record(record);
        })
    }

    fn prepare_to_die(&self) {
        // No-op since we're storing in memory, no flushing needed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn drain_clears_the_buffer() {
        let logger = InMemoryLogger::new();
        logger.finish_log_record(LogRecord::new(Level::Info, "first"));
        logger.finish_log_record(LogRecord::new(Level::Warning, "second"));

        let logs = logger.drain_logs();
        assert!(logs.contains("\"msg\":\"first\""));
        assert!(logs.contains("\"msg\":\"second\""));
        assert_eq!(logs.lines().count(), 2);
        assert_eq!(logger.drain_logs(), "");
    }

    #[test]
    fn drain_records_parses_in_order() {
        let logger = InMemoryLogger::new();
        logger.finish_log_record(LogRecord::new(Level::Info, "a"));
        logger.finish_log_record(LogRecord::new(Level::Error, "b"));
        let records = logger.drain_records();
        assert_eq!(records[0]["msg"], "a");
        assert_eq!(records[1]["level"], "error");
        assert!(logger.drain_records().is_empty());
    }
}
