// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type for the hookwise pipeline.
//!
//! A [`LogRecord`] is created by the [`Pipeline`](crate::Pipeline) for each emitted message,
//! handed to every applicable [`Hook`](crate::Hook) so it can add fields, and finally
//! serialized for the loggers.
//!
//! # Serialized form
//!
//! Records serialize to a flat JSON object:
//!
//! ```text
//! {"caller":"src/main.rs:12","level":"info","msg":"started","time":"2024-05-01T10:00:00Z"}
//! ```
//!
//! The base keys `level`, `msg` and `time` always describe the record itself.  A data field
//! that uses one of those names is emitted as `fields.<name>` instead of overwriting it.
//!
//! # Example
//!
//! ```rust
//! use hookwise::{Level, LogRecord};
//!
//! let mut record = LogRecord::new(Level::Info, "hello");
//! record.data.insert("answer".to_string(), 42.into());
//! let json = record.to_json();
//! assert_eq!(json["answer"], 42);
//! assert_eq!(json["msg"], "hello");
//! ```

use crate::Level;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Display;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Field map carried by a record.
///
/// Keys are sorted so that serialized output is deterministic.
pub type Fields = BTreeMap<String, Value>;

const LEVEL_KEY: &str = "level";
const MESSAGE_KEY: &str = "msg";
const TIME_KEY: &str = "time";

/**
A log record.

The record is owned by the pipeline for the duration of one emission.  Hooks receive it by
mutable reference and are expected to touch only [`LogRecord::data`].
*/
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Structured fields attached to the record.
    pub data: Fields,
    level: Level,
    message: String,
    time: OffsetDateTime,
}

impl LogRecord {
    /// Creates a record stamped with the current time and no fields.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self::with_fields(level, message, Fields::new())
    }

    /// Creates a record stamped with the current time, starting from `fields`.
    pub fn with_fields(level: Level, message: impl Into<String>, fields: Fields) -> Self {
        Self {
            data: fields,
            level,
            message: message.into(),
            time: OffsetDateTime::now_utc(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn time(&self) -> OffsetDateTime {
        self.time
    }

    /**
    Serializes the record to a JSON object.

    Data fields whose names clash with the base keys are prefixed with `fields.`.
    */
    pub fn to_json(&self) -> Value {
        let mut object = Map::with_capacity(self.data.len() + 3);
        for (key, value) in &self.data {
            let key = match key.as_str() {
                LEVEL_KEY | MESSAGE_KEY | TIME_KEY => format!("fields.{key}"),
                _ => key.clone(),
            };
            object.insert(key, value.clone());
        }
        object.insert(LEVEL_KEY.to_string(), Value::from(self.level.as_str()));
        object.insert(MESSAGE_KEY.to_string(), Value::from(self.message.clone()));
        //formatting a UTC timestamp as RFC 3339 only fails for years outside 0..=9999
        let time = self.time.format(&Rfc3339).unwrap_or_default();
        object.insert(TIME_KEY.to_string(), Value::from(time));
        Value::Object(object)
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new(Level::Info, "")
    }
}

/// Writes the record as a single line of JSON.
impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug: Derived - essential for diagnostics
- Clone: Derived - pipelines hand a copy to each logger
- PartialEq: Derived - useful in tests
- Default: Implemented - Info level, empty message, no fields
- Display: Implemented - one JSON line, the form loggers write

NOT IMPLEMENTED:
- Eq/Hash: serde_json::Value holds floats
- Copy: heap-allocated fields
- Ord/PartialOrd: No meaningful ordering for log records
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_fields_are_present() {
        let record = LogRecord::new(Level::Warning, "careful");
        let json = record.to_json();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["msg"], "careful");
        assert!(json["time"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn clashing_fields_are_prefixed() {
        let mut record = LogRecord::new(Level::Info, "real message");
        record.data.insert("msg".to_string(), Value::from("impostor"));
        record.data.insert("level".to_string(), Value::from(3));
        let json = record.to_json();
        assert_eq!(json["msg"], "real message");
        assert_eq!(json["level"], "info");
        assert_eq!(json["fields.msg"], "impostor");
        assert_eq!(json["fields.level"], 3);
    }

    #[test]
    fn display_is_parseable_json() {
        let mut record = LogRecord::new(Level::Error, "boom");
        record.data.insert("nested".to_string(), serde_json::json!({"a": [1, 2]}));
        let parsed: Value = serde_json::from_str(&record.to_string()).unwrap();
        assert_eq!(parsed["nested"]["a"][1], 2);
    }
}
