// SPDX-License-Identifier: MIT OR Apache-2.0

//! An application-side logging wrapper, living under a path the tests can put on a skip list.
#![allow(dead_code)]

use hookwise::{InMemoryLogger, Pipeline};
use std::sync::Arc;

pub const WRAPPER_PATH: &str = "tests/support/";

pub fn log_through_wrapper(pipeline: &Pipeline, message: &str) {
    pipeline.info(format!("[wrapped] {message}"));
}

pub fn capture(pipeline: Pipeline) -> (Pipeline, Arc<InMemoryLogger>) {
    let logs = Arc::new(InMemoryLogger::new());
    (pipeline.with_logger(logs.clone()), logs)
}
