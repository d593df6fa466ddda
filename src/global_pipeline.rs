// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide pipeline.
//!
//! Libraries that should not take a [`Pipeline`] parameter can log through the global one.
//! Until an application installs its own, the global pipeline writes to stderr at
//! [`Level::Info`](crate::Level::Info) and has no hooks.
//!
//! # Examples
//!
//! ```
//! use hookwise::global_pipeline::{global_pipeline, set_global_pipeline};
//! use hookwise::{CallSiteHook, CallSiteOptions, InMemoryLogger, Pipeline};
//! use std::sync::Arc;
//!
//! let logs = Arc::new(InMemoryLogger::new());
//! let previous = set_global_pipeline(Arc::new(
//!     Pipeline::new()
//!         .with_hook(CallSiteHook::new(CallSiteOptions::new()))
//!         .with_logger(logs.clone()),
//! ));
//!
//! global_pipeline().info("through the global pipeline");
//! assert_eq!(logs.drain_records().len(), 1);
//!
//! set_global_pipeline(previous);
//! ```
//!
//! # Pipeline lifecycle
//!
//! The pipeline is reference-counted.  [`global_pipeline`] hands out a clone of the `Arc`, so a
//! replaced pipeline lives until every in-flight emission that picked it up has finished.  The
//! lock is only held to clone or swap that `Arc`, never while hooks or loggers run.

use crate::pipeline::Pipeline;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static GLOBAL_PIPELINE: OnceLock<RwLock<Arc<Pipeline>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Pipeline>> {
    GLOBAL_PIPELINE.get_or_init(|| RwLock::new(Arc::new(Pipeline::stderr())))
}

/// The current global pipeline.
pub fn global_pipeline() -> Arc<Pipeline> {
    //an Arc swap cannot be interrupted halfway, so a poisoned lock still holds a valid value
    slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Installs `pipeline` as the global pipeline and returns the one it replaces.
pub fn set_global_pipeline(pipeline: Arc<Pipeline>) -> Arc<Pipeline> {
    let mut current = slot().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *current, pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryLogger;
    use crate::Level;
    use std::sync::Mutex;

    static TEST_PIPELINE_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn default_pipeline_is_info() {
        let _guard = TEST_PIPELINE_GUARD.lock().unwrap();
        assert_eq!(global_pipeline().level(), Level::Info);
        assert!(global_pipeline().hooks().is_empty());
    }

    #[test]
    fn set_returns_previous() {
        let _guard = TEST_PIPELINE_GUARD.lock().unwrap();
        let first = Arc::new(Pipeline::new().with_level(Level::Error));
        let original = set_global_pipeline(first.clone());
        let replaced = set_global_pipeline(original);
        assert!(Arc::ptr_eq(&first, &replaced));
    }

    #[test]
    fn thread_safety() {
        use std::thread;

        let _guard = TEST_PIPELINE_GUARD.lock().unwrap();
        let logs = Arc::new(InMemoryLogger::new());
        let original = set_global_pipeline(Arc::new(Pipeline::new().with_logger(logs.clone())));

        let handles: Vec<_> = (0..4)
            .map(|i| thread::spawn(move || global_pipeline().info(format!("thread {i}"))))
            .collect();
        for handle in handles {
            handle.join().expect("Thread should complete successfully");
        }

        assert_eq!(logs.drain_records().len(), 4);
        set_global_pipeline(original);
    }
}
