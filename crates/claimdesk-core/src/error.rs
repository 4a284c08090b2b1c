//! Error types module
//!
//! Field-level validation errors live here together with the `ErrorMetadata` trait that
//! every Claimdesk error type implements, so callers can decide how loudly to report a
//! failure without matching on concrete variants.

use crate::validation::FormField;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a failed poll
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Describes how an error should be reported and whether retrying makes sense.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Message suitable for showing to the user
    fn user_message(&self) -> String;
}

/// Inline error attached to a single form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl ErrorMetadata for ValidationError {
    fn error_code(&self) -> &'static str {
        "VALIDATION_ERROR"
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn user_message(&self) -> String {
        self.message.clone()
    }
}
