// SPDX-License-Identifier: MIT OR Apache-2.0

//! The host pipeline that hooks attach to.
//!
//! # Architecture
//!
//! Emitting a message follows this pattern:
//! 1. Records below the pipeline's level are dropped; nothing else happens.
//! 2. A [`LogRecord`] is created with the level, message and any fields passed in.
//! 3. Every registered [`Hook`] whose [`levels`](Hook::levels) include the record's level is
//!    fired, in registration order.  A later hook sees, and may overwrite, what earlier hooks
//!    wrote.
//! 4. The finished record is handed to every [`Logger`].
//!
//! A hook that returns an error is reported through `tracing` and skipped; the remaining hooks
//! still run and the record is still delivered.
//!
//! # Example
//!
//! ```rust
//! use hookwise::{CallSiteHook, CallSiteOptions, InMemoryLogger, Level, Pipeline};
//! use hookwise::{StaticFieldsHook, StaticFieldsOptions};
//! use std::sync::Arc;
//!
//! let logs = Arc::new(InMemoryLogger::new());
//! let pipeline = Pipeline::new()
//!     .with_level(Level::Debug)
//!     .with_hook(CallSiteHook::new(CallSiteOptions::new()))
//!     .with_hook(StaticFieldsHook::new(StaticFieldsOptions::new().with_field("app", "demo")))
//!     .with_logger(logs.clone());
//!
//! pipeline.debug("visible");
//! pipeline.trace("filtered out");
//!
//! let records = logs.drain_records();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0]["app"], "demo");
//! ```

use crate::Level;
use crate::hook::Hook;
use crate::log_record::{Fields, LogRecord};
use crate::logger::Logger;
use crate::stderror_logger::StdErrorLogger;
use std::sync::Arc;

/// Filters records by level, runs hooks over them and passes them to loggers.
#[derive(Debug, Clone)]
pub struct Pipeline {
    level: Level,
    hooks: Vec<Arc<dyn Hook>>,
    loggers: Vec<Arc<dyn Logger>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// A pipeline at [`Level::Info`] with no hooks and no loggers.
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            hooks: Vec::new(),
            loggers: Vec::new(),
        }
    }

    /// A pipeline at [`Level::Info`] that writes to stderr.
    pub fn stderr() -> Self {
        Self::new().with_logger(Arc::new(StdErrorLogger::new()))
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_hook(mut self, hook: impl Hook + 'static) -> Self {
        self.add_hook(hook);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.add_logger(logger);
        self
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Registers a hook after the ones already registered.
    pub fn add_hook(&mut self, hook: impl Hook + 'static) {
        self.add_shared_hook(Arc::new(hook));
    }

    /// Registers a hook that may also be registered with other pipelines.
    pub fn add_shared_hook(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.push(hook);
    }

    pub fn add_logger(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }

    pub fn hooks(&self) -> &[Arc<dyn Hook>] {
        &self.hooks
    }

    /// Whether a record at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.log_with_fields(level, message, Fields::new());
    }

    /// Emits a record that starts out with `fields`.  Hooks may overwrite them.
    pub fn log_with_fields(&self, level: Level, message: impl Into<String>, fields: Fields) {
        let Some(record) = self.prepare(level, message.into(), fields) else {
            return;
        };
        for logger in &self.loggers {
            logger.finish_log_record(record.clone());
        }
    }

    /// Like [`Self::log`], but lets the loggers finish asynchronously.
    ///
    /// Hooks still run synchronously, before the first suspension point.
    pub async fn log_async(&self, level: Level, message: impl Into<String>) {
        let Some(record) = self.prepare(level, message.into(), Fields::new()) else {
            return;
        };
        for logger in &self.loggers {
            logger.finish_log_record_async(record.clone()).await;
        }
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Asks every logger to flush.
    pub fn prepare_to_die(&self) {
        for logger in &self.loggers {
            logger.prepare_to_die();
        }
    }

    fn prepare(&self, level: Level, message: String, fields: Fields) -> Option<LogRecord> {
        if !self.enabled(level) {
            return None;
        }
        let mut record = LogRecord::with_fields(level, message, fields);
        self.fire_hooks(&mut record);
        Some(record)
    }

    fn fire_hooks(&self, record: &mut LogRecord) {
        for hook in &self.hooks {
            if !hook.levels().contains(&record.level()) {
                continue;
            }
            if let Err(err) = hook.fire(record) {
                tracing::warn!(?hook, error = %err, "failed to fire hook");
            }
        }
    }
}
