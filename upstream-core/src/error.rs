//! Core error types

use std::fmt;
use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// What kind of input failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Duration,
    Size,
    Timestamp,
    Id,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatKind::Duration => "duration",
            FormatKind::Size => "size",
            FormatKind::Timestamp => "timestamp",
            FormatKind::Id => "id",
        };
        f.write_str(name)
    }
}

/// Errors raised while shaping a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Unparsable duration, size, timestamp or id
    #[error("Invalid {kind} '{value}': {reason}")]
    InvalidFormat {
        kind: FormatKind,
        value: String,
        reason: String,
    },

    /// Unknown resource id
    #[error("Resource {id} not found")]
    NotFound { id: i64 },
}

impl CoreError {
    pub fn invalid_format(
        kind: FormatKind,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CoreError::InvalidFormat {
            kind,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(id: i64) -> Self {
        CoreError::NotFound { id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}
