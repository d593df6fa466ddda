// SPDX-License-Identifier: MIT OR Apache-2.0

//! Both hooks on one pipeline.

mod support;

use hookwise::{CallSiteHook, CallSiteOptions, Pipeline, StaticFieldsHook, StaticFieldsOptions};
use support::capture;

fn call_site() -> CallSiteHook {
    CallSiteHook::new(CallSiteOptions::new().with_app_root_prefix(env!("CARGO_MANIFEST_DIR")))
}

fn static_caller() -> StaticFieldsHook {
    StaticFieldsHook::new(StaticFieldsOptions::new().with_field("caller", "static"))
}

#[test]
fn both_hooks_contribute() {
    let (pipeline, logs) = capture(
        Pipeline::new()
            .with_hook(call_site())
            .with_hook(StaticFieldsHook::new(
                StaticFieldsOptions::new()
                    .with_field("answer", 42)
                    .with_field("foo", "var"),
            )),
    );

    pipeline.info("This is a test");

    let record = &logs.drain_records()[0];
    assert_eq!(record["answer"], 42);
    assert_eq!(record["foo"], "var");
    assert!(record["caller"].as_str().unwrap().starts_with(file!()));
}

#[test]
fn last_registered_hook_wins() {
    let (pipeline, logs) = capture(
        Pipeline::new()
            .with_hook(call_site())
            .with_hook(static_caller()),
    );

    pipeline.info("first");
    pipeline.info("second");

    for record in logs.drain_records() {
        assert_eq!(record["caller"], "static");
    }
}

#[test]
fn reversing_registration_reverses_the_winner() {
    let (pipeline, logs) = capture(
        Pipeline::new()
            .with_hook(static_caller())
            .with_hook(call_site()),
    );

    pipeline.info("This is a test");

    let caller = logs.drain_records()[0]["caller"].as_str().unwrap().to_string();
    assert_ne!(caller, "static");
    assert!(caller.starts_with(file!()), "got {caller}");
}
