// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Call-site hook
//!
//! [`CallSiteHook`] adds the file and line of the code that emitted a record, under the
//! `caller` key by default:
//!
//! ```text
//! {"caller":"src/jobs.rs:88","level":"info","msg":"job finished", ...}
//! ```
//!
//! ## Resolution
//!
//! By the time a hook runs, the application's log call is several frames away: the pipeline's
//! own functions, the standard library, the stack walker, and possibly logging wrappers of the
//! application itself.  The hook starts at [`CallSiteOptions::skip_depth_start`] + 1 frames above
//! its own lookup and walks outward, skipping every frame whose file path contains one of the
//! skip-list entries.  The first frame that matches no entry is the call site.
//!
//! The skip list always starts with [`BUILTIN_SKIP_PACKAGES`].  Add the paths of your own
//! logging wrappers to hide them too.
//!
//! If the walk runs off the end of the stack, or the binary has no debuginfo to name frames
//! with, the field is still written, with a diagnostic:
//!
//! ```text
//! {"caller":"unable to find caller: stack frame lookup failed", ...}
//! ```
//!
//! ## Path stripping
//!
//! With [`CallSiteOptions::app_root_prefix`] set, everything up to and including the first
//! occurrence of the prefix and the separator after it is removed.  Paths that do not contain
//! the prefix are kept whole.
//!
//! ## Example
//!
//! ```rust
//! use hookwise::{CallSiteHook, CallSiteOptions, InMemoryLogger, Pipeline};
//! use std::sync::Arc;
//!
//! let logs = Arc::new(InMemoryLogger::new());
//! let mut pipeline = Pipeline::new();
//! pipeline.add_hook(CallSiteHook::new(
//!     CallSiteOptions::new().with_app_root_prefix(env!("CARGO_MANIFEST_DIR")),
//! ));
//! pipeline.add_logger(logs.clone());
//!
//! pipeline.info("started");
//! let record = &logs.drain_records()[0];
//! assert!(record["caller"].is_string());
//! ```

use crate::error::{CallerError, HookError};
use crate::frames::{Frame, FrameSource, RuntimeFrames};
use crate::hook::Hook;
use crate::level::Level;
use crate::log_record::LogRecord;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;

/// Field written when no key is configured.
pub const DEFAULT_FIELD_KEY: &str = "caller";

/// Starting depth when none is configured.
///
/// This is the number of frames known to sit between [`Pipeline::log_with_fields`](crate::Pipeline::log_with_fields)
/// and the hook's frame lookup, so the walk begins at the first frame that may belong to the
/// application.
pub const DEFAULT_SKIP_DEPTH: usize = 4;

/// Path fragments that are always skipped: this crate's sources, the standard library and the
/// stack walker.
///
/// None of these may be empty, since the empty string is a substring of every path.
pub const BUILTIN_SKIP_PACKAGES: &[&str] = &[
    concat!(env!("CARGO_MANIFEST_DIR"), "/src/"),
    "/rustc/",
    "/backtrace-",
];

/// Options for [`CallSiteHook`].
///
/// Empty strings and zero are gaps that are filled from [`default_options`] when a hook is
/// built.  Missing keys deserialize as gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallSiteOptions {
    /// Removed, together with everything before it and one separator after it, from file paths.
    pub app_root_prefix: String,
    /// Name of the field the call site is written to.
    pub field_key: String,
    /// Extra path fragments to skip, after [`BUILTIN_SKIP_PACKAGES`].
    pub packages_to_skip: Vec<String>,
    /// Frames to pass over before checking the skip list.
    pub skip_depth_start: usize,
}

impl CallSiteOptions {
    /// Options with every value left as a gap.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app_root_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.app_root_prefix = prefix.into();
        self
    }

    pub fn with_field_key(mut self, key: impl Into<String>) -> Self {
        self.field_key = key.into();
        self
    }

    /// Appends a path fragment to the skip list.
    pub fn skip_package(mut self, package: impl Into<String>) -> Self {
        self.packages_to_skip.push(package.into());
        self
    }

    pub fn with_skip_depth_start(mut self, depth: usize) -> Self {
        self.skip_depth_start = depth;
        self
    }
}

static DEFAULT_OPTIONS: OnceLock<CallSiteOptions> = OnceLock::new();

/// The process-wide defaults used to fill gaps.
///
/// Initialized once and never modified.
pub fn default_options() -> &'static CallSiteOptions {
    DEFAULT_OPTIONS.get_or_init(|| CallSiteOptions {
        app_root_prefix: String::new(),
        field_key: DEFAULT_FIELD_KEY.to_string(),
        packages_to_skip: BUILTIN_SKIP_PACKAGES
            .iter()
            .map(|package| package.to_string())
            .collect(),
        skip_depth_start: DEFAULT_SKIP_DEPTH,
    })
}

/// The configuration a [`CallSiteHook`] actually runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSiteConfig {
    app_root_prefix: String,
    field_key: String,
    packages_to_skip: Vec<String>,
    skip_depth_start: usize,
}

/**
Fills the gaps in `options` from `defaults`.

Neither input is modified.  The skip list is the defaults' list followed by the options' list,
without duplicates or empty entries.
*/
pub fn resolve(options: &CallSiteOptions, defaults: &CallSiteOptions) -> CallSiteConfig {
    let pick = |value: &String, fallback: &String| {
        if value.is_empty() {
            fallback.clone()
        } else {
            value.clone()
        }
    };
    let mut packages_to_skip: Vec<String> = Vec::with_capacity(
        defaults.packages_to_skip.len() + options.packages_to_skip.len(),
    );
    for package in defaults
        .packages_to_skip
        .iter()
        .chain(&options.packages_to_skip)
    {
        if !package.is_empty() && !packages_to_skip.contains(package) {
            packages_to_skip.push(package.clone());
        }
    }
    CallSiteConfig {
        app_root_prefix: pick(&options.app_root_prefix, &defaults.app_root_prefix),
        field_key: pick(&options.field_key, &defaults.field_key),
        packages_to_skip,
        skip_depth_start: if options.skip_depth_start == 0 {
            defaults.skip_depth_start
        } else {
            options.skip_depth_start
        },
    }
}

impl CallSiteConfig {
    pub fn app_root_prefix(&self) -> &str {
        &self.app_root_prefix
    }

    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    pub fn packages_to_skip(&self) -> &[String] {
        &self.packages_to_skip
    }

    pub fn skip_depth_start(&self) -> usize {
        self.skip_depth_start
    }

    /// The first skip-list entry found in `file`, if any.
    fn skipped_by(&self, file: &str) -> Option<&str> {
        self.packages_to_skip
            .iter()
            .map(String::as_str)
            .find(|package| file.contains(package))
    }

    /**
    Removes the application root from `path`.

    Only the first occurrence of the prefix counts.  The character right after it (the
    separator) goes too.  Without a match, or with nothing left after the separator, the
    path is returned unchanged.
    */
    pub fn strip_path<'p>(&self, path: &'p str) -> &'p str {
        if self.app_root_prefix.is_empty() {
            return path;
        }
        let Some(position) = path.find(&self.app_root_prefix) else {
            return path;
        };
        let mut rest = path[position + self.app_root_prefix.len()..].chars();
        match rest.next() {
            Some(_separator) if !rest.as_str().is_empty() => rest.as_str(),
            _ => path,
        }
    }
}

/**
Writes the application call site of each record to a configurable field.

Generic over the [`FrameSource`] so the resolution can be driven by a fake stack; the default
walks the real one, once per record, and stops at the call site.

The real stack only has file and line information where the binary carries debuginfo.  Cargo's
default release profile has none, and there every record gets the
`unable to find caller: ...` diagnostic.  Keep line tables in release builds:

```toml
[profile.release]
debug = "line-tables-only"
```
*/
#[derive(Debug)]
pub struct CallSiteHook<S: FrameSource = RuntimeFrames> {
    config: CallSiteConfig,
    frames: S,
}

impl CallSiteHook<RuntimeFrames> {
    pub fn new(options: CallSiteOptions) -> Self {
        Self::with_frame_source(options, RuntimeFrames::new())
    }
}

impl<S: FrameSource> CallSiteHook<S> {
    pub fn with_frame_source(options: CallSiteOptions, frames: S) -> Self {
        Self {
            config: resolve(&options, default_options()),
            frames,
        }
    }

    pub fn config(&self) -> &CallSiteConfig {
        &self.config
    }

    #[inline(never)]
    fn find_call_site(&self) -> Result<Frame, CallerError> {
        let start = self
            .config
            .skip_depth_start
            .checked_add(1)
            .ok_or(CallerError::FrameLookup)?;
        let mut found = None;
        self.frames.walk(start, &mut |frame| {
            match self.config.skipped_by(&frame.file) {
                Some(package) => {
                    tracing::trace!(file = %frame.file, package, "skipping frame");
                    true
                }
                None => {
                    found = Some(frame);
                    false
                }
            }
        });
        found.ok_or(CallerError::FrameLookup)
    }
}

impl<S: FrameSource> Hook for CallSiteHook<S> {
    fn levels(&self) -> &[Level] {
        Level::ALL
    }

    fn fire(&self, record: &mut LogRecord) -> Result<(), HookError> {
        let value = match self.find_call_site() {
            Ok(frame) => format!("{}:{}", self.config.strip_path(&frame.file), frame.line),
            Err(err) => {
                tracing::debug!(error = %err, "call site resolution failed");
                format!("unable to find caller: {err}")
            }
        };
        record
            .data
            .insert(self.config.field_key.clone(), Value::String(value));
        Ok(())
    }
}
