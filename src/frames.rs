// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stack frame lookup.
//!
//! [`CallSiteHook`](crate::CallSiteHook) never walks the stack itself.  It asks a
//! [`FrameSource`] for the frame at a given depth, which lets the resolution algorithm run
//! against a fake stack in tests and against the real one in production.
//!
//! # Depth
//!
//! Depth 0 is the function that called [`FrameSource::walk`] (or [`FrameSource::frame_at`]),
//! depth 1 its caller, and so on outward.  A walk ends at the outermost frame, or as soon as
//! the visitor returns `false`, which is what bounds the resolution.
//!
//! # Example
//!
//! ```rust
//! use hookwise::frames::{Frame, FrameSource};
//!
//! let fake = vec![
//!     Frame::new("/deps/logging/src/lib.rs", 10),
//!     Frame::new("/app/src/main.rs", 42),
//! ];
//! assert_eq!(fake.frame_at(1), Some(Frame::new("/app/src/main.rs", 42)));
//! assert_eq!(fake.frame_at(2), None);
//! ```

use std::fmt::{Debug, Display};

/// A source location on the call stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    pub file: String,
    pub line: u32,
}

impl Frame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Looks up frames on the calling thread's stack.
///
/// Implementations must be callable from many threads at once.
pub trait FrameSource: Debug + Send + Sync {
    /**
    Hands frames to `visit`, starting at depth `start` and moving outward.

    Stops after the outermost frame or when `visit` returns `false`.  One call is one pass over
    the stack.
    */
    fn walk(&self, start: usize, visit: &mut dyn FnMut(Frame) -> bool);

    /// The frame at `depth`, or `None` past the outermost frame.
    fn frame_at(&self, depth: usize) -> Option<Frame> {
        let mut found = None;
        self.walk(depth, &mut |frame| {
            found = Some(frame);
            false
        });
        found
    }
}

/// A fixed stack, innermost frame first.
impl FrameSource for Vec<Frame> {
    fn walk(&self, start: usize, visit: &mut dyn FnMut(Frame) -> bool) {
        for frame in self.iter().skip(start) {
            if !visit(frame.clone()) {
                break;
            }
        }
    }
}

//demangled names of the impl below contain this, as reported by the symbolizer
const SELF_SYMBOL: &str = "RuntimeFrames as ";

/**
The real call stack, walked with the `backtrace` crate.

Inlined functions count as frames of their own.  Frames without file and line information
(system libraries, code built without debuginfo) are not counted, so in a binary without
debuginfo every walk comes back empty.  Release builds need at least
`debug = "line-tables-only"` in their profile.

Symbols are resolved only as far as the visitor asks for frames.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RuntimeFrames;

impl RuntimeFrames {
    pub const fn new() -> Self {
        Self
    }
}

impl FrameSource for RuntimeFrames {
    #[inline(never)]
    fn walk(&self, start: usize, visit: &mut dyn FnMut(Frame) -> bool) {
        let mut seen_self = false;
        let mut depth = 0usize;
        let mut done = false;
        //located frames seen before our own symbol; only used if that symbol never shows up
        let mut unanchored: Vec<Frame> = Vec::new();
        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if done {
                    return;
                }
                // The unwinder and this impl sit innermost.  Counting starts after the last of
                // our own symbols, before any frame has been counted.
                if depth == 0
                    && symbol
                        .name()
                        .is_some_and(|name| name.to_string().contains(SELF_SYMBOL))
                {
                    seen_self = true;
                    unanchored.clear();
                    return;
                }
                let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) else {
                    return;
                };
                let location = Frame::new(file.to_string_lossy(), line);
                if !seen_self {
                    unanchored.push(location);
                    return;
                }
                if depth >= start && !visit(location) {
                    done = true;
                }
                depth = depth.saturating_add(1);
            });
            !done
        });
        // Without symbol names we cannot find our own frame.  Counting from the top then only
        // makes the depths larger, and those extra frames are on the built-in skip list.
        if !seen_self {
            for location in unanchored.into_iter().skip(start) {
                if !visit(location) {
                    break;
                }
            }
        }
    }
}
