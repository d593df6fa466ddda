// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.

use thiserror::Error;

/// Failure to find the application call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CallerError {
    /// The frame source had no frame at a requested depth.
    #[error("stack frame lookup failed")]
    FrameLookup,
}

/// Error returned by [`Hook::fire`](crate::Hook::fire).
///
/// The hooks in this crate never return one; the type exists for hooks written elsewhere, which
/// box whatever error they have.
#[derive(Debug, Error)]
pub enum HookError {
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// An environment variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name}={value:?} is not a valid stack depth")]
    InvalidDepth { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_errors_convert_transparently() {
        fn parse(value: &str) -> Result<u8, HookError> {
            let parsed = value
                .parse::<u8>()
                .map_err(Box::<dyn std::error::Error + Send + Sync>::from)?;
            Ok(parsed)
        }
        let err = parse("300").unwrap_err();
        assert!(matches!(err, HookError::Other(_)));
        assert_eq!(err.to_string(), "300".parse::<u8>().unwrap_err().to_string());
    }

    #[test]
    fn caller_error_message() {
        assert_eq!(CallerError::FrameLookup.to_string(), "stack frame lookup failed");
    }
}
