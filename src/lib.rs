//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# hookwise

hookwise adds fields to structured log records before they are written.

# Development status

hookwise is experimental and the API may change.

# The problem

A log line that says `connection reset` is only half useful.  Which code said it?  Which
service, which build, which region?  Every call site could pass that information along by hand,
but it won't, and the one that forgets is the one you need.

Hooks solve this once, at the pipeline.  Each record passes through every registered hook, in
registration order, and each hook adds what it knows.

# The hooks

| Hook                 | Adds                                              | Default key |
|----------------------|---------------------------------------------------|-------------|
| [`CallSiteHook`]     | `file:line` of the application code that logged   | `caller`    |
| [`StaticFieldsHook`] | a fixed set of fields, e.g. service and version   | (your keys) |

Both apply to every [`Level`] and neither can fail.  If the call site cannot be found, the
`caller` field says so instead of going missing.

Finding the call site is the interesting part.  The frame that called the pipeline is rarely the
one you care about: there are the pipeline's own frames, the standard library, and often a
logging wrapper or two of your own.  [`CallSiteHook`] walks the stack outward and skips every
frame whose path contains an entry of its skip list.  Add your wrappers to that list and they
disappear from the output too.  See the [`callsite`] module for details.

The stack only carries file and line information where the binary has debuginfo.  Cargo's
default release profile strips it, and then every record gets
`unable to find caller: stack frame lookup failed`.  Add this to release builds that use
[`CallSiteHook`]:

```toml
[profile.release]
debug = "line-tables-only"
```

# The pipeline

hookwise ships a small [`Pipeline`] so the hooks have something to attach to: a level
threshold, hooks, and [`Logger`]s that receive the finished record as JSON.

```rust
use hookwise::{CallSiteHook, CallSiteOptions, InMemoryLogger, Pipeline};
use hookwise::{StaticFieldsHook, StaticFieldsOptions};
use std::sync::Arc;

let logs = Arc::new(InMemoryLogger::new());
let pipeline = Pipeline::new()
    .with_hook(CallSiteHook::new(
        CallSiteOptions::new().with_app_root_prefix(env!("CARGO_MANIFEST_DIR")),
    ))
    .with_hook(StaticFieldsHook::new(
        StaticFieldsOptions::new().with_field("service", "billing"),
    ))
    .with_logger(logs.clone());

pipeline.info("invoice sent");

let record = &logs.drain_records()[0];
assert_eq!(record["service"], "billing");
assert_eq!(record["msg"], "invoice sent");
```

# Testing

The stack is an injected [`FrameSource`](frames::FrameSource).  Hand a
[`CallSiteHook`] a `Vec<Frame>` and the resolution runs against that instead of the real stack.

# Diagnostics

hookwise reports its own problems (a failing hook, an unusable environment value) through
[`tracing`](https://docs.rs/tracing), never through the pipeline it hosts.
*/

mod level;
mod logger;
mod hook;
mod error;
mod log_record;
mod inmemory_logger;
mod stderror_logger;
mod pipeline;
mod static_fields;
mod config;
pub mod callsite;
pub mod frames;
pub mod global_pipeline;

pub use level::Level;
pub use logger::Logger;
pub use hook::Hook;
pub use error::{CallerError, ConfigError, HookError};
pub use log_record::{Fields, LogRecord};
pub use inmemory_logger::InMemoryLogger;
pub use stderror_logger::StdErrorLogger;
pub use pipeline::Pipeline;
pub use callsite::{CallSiteConfig, CallSiteHook, CallSiteOptions};
pub use static_fields::{StaticFieldsHook, StaticFieldsOptions};
pub use global_pipeline::{global_pipeline, set_global_pipeline};
