//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::Level;
use crate::error::HookError;
use crate::log_record::LogRecord;
use std::fmt::Debug;

pub trait Hook: Debug + Send + Sync {
    /**
    The levels this hook wants to see.

    The pipeline only fires the hook for records whose level is in this list.
    */
    fn levels(&self) -> &[Level];

    /**
    Mutates the record before it is serialized.

    Hooks run synchronously, in registration order, on the thread that emitted the record.
    An error is reported by the pipeline and does not prevent later hooks from running.
    */
    fn fire(&self, record: &mut LogRecord) -> Result<(), HookError>;
}

/*
Boilerplate notes.

# Hook

Same reasoning as Logger: no Clone (hooks may own resources), no PartialEq (data vs provenance
equality is unclear), no Default (construction needs options).  Send/Sync are required since one
hook instance serves every thread that logs through the pipeline.
*/
