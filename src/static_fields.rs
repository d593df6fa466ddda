// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hook that adds the same fields to every record.
//!
//! Typical uses are service name, version or deployment region.
//!
//! ```rust
//! use hookwise::{InMemoryLogger, Pipeline, StaticFieldsHook, StaticFieldsOptions};
//! use std::sync::Arc;
//!
//! let logs = Arc::new(InMemoryLogger::new());
//! let mut pipeline = Pipeline::new();
//! pipeline.add_hook(StaticFieldsHook::new(
//!     StaticFieldsOptions::new()
//!         .with_field("service", "billing")
//!         .with_field("answer", 42),
//! ));
//! pipeline.add_logger(logs.clone());
//!
//! pipeline.info("ready");
//! let record = &logs.drain_records()[0];
//! assert_eq!(record["service"], "billing");
//! assert_eq!(record["answer"], 42);
//! ```

use crate::error::HookError;
use crate::hook::Hook;
use crate::level::Level;
use crate::log_record::{Fields, LogRecord};
use serde::{Deserialize, Serialize};

/// Options for [`StaticFieldsHook`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaticFieldsOptions {
    pub fields: Fields,
}

impl StaticFieldsOptions {
    /// No fields.  A hook built from these does nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.  Values that cannot be represented as JSON are dropped.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.fields.insert(key, value);
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "dropping static field");
            }
        }
        self
    }
}

impl From<Fields> for StaticFieldsOptions {
    fn from(fields: Fields) -> Self {
        Self { fields }
    }
}

/**
Copies a fixed set of fields into every record.

Configured values overwrite fields of the same name already on the record, including fields
written by hooks registered earlier.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct StaticFieldsHook {
    fields: Fields,
}

impl StaticFieldsHook {
    pub fn new(options: StaticFieldsOptions) -> Self {
        Self {
            fields: options.fields,
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl Default for StaticFieldsHook {
    fn default() -> Self {
        Self::new(StaticFieldsOptions::default())
    }
}

impl Hook for StaticFieldsHook {
    fn levels(&self) -> &[Level] {
        Level::ALL
    }

    fn fire(&self, record: &mut LogRecord) -> Result<(), HookError> {
        for (key, value) in &self.fields {
            record.data.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_a_no_op() {
        let mut record = LogRecord::new(Level::Info, "test");
        record.data.insert("kept".to_string(), json!(true));
        let before = record.clone();
        StaticFieldsHook::default().fire(&mut record).unwrap();
        assert_eq!(record, before);
    }

    #[test]
    fn fields_are_added_and_overwrite() {
        let hook = StaticFieldsHook::new(
            StaticFieldsOptions::new()
                .with_field("answer", 42)
                .with_field("foo", "var"),
        );
        let mut record = LogRecord::new(Level::Debug, "test");
        record.data.insert("foo".to_string(), json!("old"));
        record.data.insert("other".to_string(), json!(1.5));
        hook.fire(&mut record).unwrap();

        assert_eq!(record.data["answer"], 42);
        assert_eq!(record.data["foo"], "var");
        assert_eq!(record.data["other"], 1.5);
    }

    #[test]
    fn structured_values_survive() {
        let hook = StaticFieldsHook::new(
            StaticFieldsOptions::new().with_field("build", json!({"sha": "abc", "dirty": false})),
        );
        let mut record = LogRecord::default();
        hook.fire(&mut record).unwrap();
        assert_eq!(record.data["build"]["sha"], "abc");
        assert_eq!(record.data["build"]["dirty"], false);
    }

    #[test]
    fn applies_to_every_level() {
        assert_eq!(StaticFieldsHook::default().levels(), Level::ALL);
    }

    #[test]
    fn options_deserialize() {
        let options: StaticFieldsOptions =
            serde_json::from_str(r#"{"fields":{"region":"eu-west-1","shard":3}}"#).unwrap();
        assert_eq!(options.fields["region"], "eu-west-1");
        assert_eq!(options.fields["shard"], 3);
        let empty: StaticFieldsOptions = serde_json::from_str("{}").unwrap();
        assert!(empty.fields.is_empty());
    }
}
