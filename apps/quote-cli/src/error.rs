//! # CLI Error Type
//!
//! Unified error type for `quote` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in quote-cli                              │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<String, CliError>                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  File / JSON Error? ──── io::Error, serde_json::Error ──┐              │
//! │         │                                               │              │
//! │         ▼                                               ▼              │
//! │  Pricing Error? ─────── CoreError::InvalidRate ───── CliError ──► stderr│
//! │         │                                               │              │
//! │         ▼                                               ▼              │
//! │  Success ──► stdout                              exit_code()           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error carries a machine-readable `code` and a human-readable
//! `message`; with `--json` the pair is printed as an object.

use std::path::Path;

use quote_core::{CoreError, ValidationError};
use serde::Serialize;

use crate::state::ConfigError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_RATE",
///   "message": "Invalid exchange rate for EUR: 0"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// A currency rate is zero or not finite
    InvalidRate,

    /// A unit conversion factor is zero or not finite
    InvalidUnit,

    /// Reading a file failed
    Io,

    /// A document could not be parsed
    Parse,

    /// Configuration could not be loaded
    Config,

    /// Internal error
    Internal,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// Wraps a file read failure.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        CliError::new(
            ErrorCode::Io,
            format!("Could not read {}: {}", path.display(), err),
        )
    }

    /// Wraps a JSON parse failure.
    pub fn parse(path: &Path, err: serde_json::Error) -> Self {
        CliError::new(
            ErrorCode::Parse,
            format!("Could not parse {}: {}", path.display(), err),
        )
    }

    /// Machine-readable code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Process exit status, following sysexits(3).
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ErrorCode::ValidationError
            | ErrorCode::InvalidRate
            | ErrorCode::InvalidUnit
            | ErrorCode::Parse => 65,
            ErrorCode::Io => 74,
            ErrorCode::Config => 78,
            ErrorCode::Internal => 70,
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidRate { .. } => CliError::new(ErrorCode::InvalidRate, err.to_string()),
            CoreError::InvalidConversionFactor { .. } => {
                CliError::new(ErrorCode::InvalidUnit, err.to_string())
            }
            CoreError::Validation(e) => CliError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::Config, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization failed: {}", err);
        CliError::internal("Could not serialize output")
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}
