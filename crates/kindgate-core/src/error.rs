//! Shared error type across kindgate crates.

use thiserror::Error;

/// Stable error codes (used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input line or embedded event is not valid JSON of the expected shape.
    Decode,
    /// Policy configuration is invalid.
    Config,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Reading requests or writing verdicts failed.
    Stream,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Decode => "DECODE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Stream => "STREAM",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, KindgateError>;

/// Unified error type used by core and plugin.
#[derive(Debug, Error)]
pub enum KindgateError {
    /// Carries the bare decoder detail; the protocol loop adds its own prefix.
    #[error("{0}")]
    Decode(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("stream failure: {0}")]
    Stream(String),
}

impl KindgateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            KindgateError::Decode(_) => ErrorCode::Decode,
            KindgateError::Config(_) => ErrorCode::Config,
            KindgateError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            KindgateError::Stream(_) => ErrorCode::Stream,
        }
    }
}
