// SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt::Display;

/// Severity of a log record.
///
/// Ordered from least to most severe, so a pipeline threshold is a simple comparison.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Very detailed diagnostics
    Trace,
    /// Debugging information
    Debug,
    /// Routine operation
    Info,
    /// Suspicious condition
    Warning,
    /// Runtime error
    Error,
    /// The application cannot continue.  The pipeline does not exit on its own.
    Fatal,
    /// Programmer error.  The pipeline does not panic on its own.
    Panic,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: &'static [Level] = &[
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// The lowercase name used in serialized records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Level;

    #[test]
    fn all_is_sorted_and_complete() {
        let mut sorted = Level::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
        assert_eq!(Level::ALL.len(), 7);
    }

    #[test]
    fn names() {
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::Info.as_str(), "info");
        assert!(Level::Error > Level::Info);
    }
}
