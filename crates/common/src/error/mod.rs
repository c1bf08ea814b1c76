//! Error vocabulary shared by the cmslink crates
//!
//! [`CommonError`] covers failures that are not specific to any one layer:
//! reading and parsing configuration, timeouts, broken internal state.
//! Crate errors convert from it rather than repeating those variants, and
//! implement [`ErrorClassification`] so callers can decide about retries and
//! alerting without matching on concrete variants.
//!
//! ```rust,ignore
//! impl From<CommonError> for CmsError {
//!     fn from(err: CommonError) -> Self {
//!         match err {
//!             CommonError::Internal { .. } => Self::Internal(err.to_string()),
//!             other => Self::Config(other.to_string()),
//!         }
//!     }
//! }
//! ```
//!
//! Nothing in the workspace retries on its own; classification only informs
//! callers.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonError {
    #[error("Configuration error{}: {message}", qualify(" in field", .field))]
    Config { message: String, field: Option<String> },

    #[error("Serialization error{}: {message}", format_suffix(.format))]
    Serialization { message: String, format: Option<String> },

    #[error("I/O error{}: {message}", qualify(" on", .path))]
    Io { message: String, path: Option<String> },

    #[error("Operation '{operation}' timed out after {duration:?}")]
    Timeout { operation: String, duration: Duration },

    /// Broken invariants. Never expected in a correct program.
    #[error("Internal error{}: {message}", qualify(" in", .context))]
    Internal { message: String, context: Option<String> },
}

fn qualify(label: &str, value: &Option<String>) -> String {
    value.as_ref().map(|v| format!("{label} '{v}'")).unwrap_or_default()
}

fn format_suffix(format: &Option<String>) -> String {
    format.as_ref().map(|f| format!(" ({f})")).unwrap_or_default()
}

impl CommonError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into(), field: None }
    }

    /// Configuration error naming the offending key
    pub fn config_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config { message: message.into(), field: Some(field.into()) }
    }

    /// Parse failure in a named format (`JSON`, `TOML`, ...)
    pub fn serialization_format(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into(), format: Some(format.into()) }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io { message: message.into(), path: None }
    }

    pub fn io_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io { message: message.into(), path: Some(path.into()) }
    }

    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout { operation: operation.into(), duration }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), context: None }
    }

    pub fn internal_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), context: Some(context.into()) }
    }

    /// Short stable name of the variant, for an `error_type` log field.
    pub fn error_type_name(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Serialization { .. } => "serialization",
            Self::Io { .. } => "io",
            Self::Timeout { .. } => "timeout",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Uniform retry and severity questions asked of any workspace error.
pub trait ErrorClassification {
    /// Whether the same request might succeed if sent again.
    fn is_retryable(&self) -> bool;

    fn severity(&self) -> ErrorSeverity;

    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Suggested delay before a retry, when the error carries one.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Severity used in log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        })
    }
}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Timeout { .. } => ErrorSeverity::Warning,
            Self::Internal { .. } => ErrorSeverity::Critical,
            Self::Config { .. } | Self::Serialization { .. } | Self::Io { .. } => {
                ErrorSeverity::Error
            }
        }
    }
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_format("JSON", err.to_string())
    }
}

impl From<toml::de::Error> for CommonError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

impl From<std::io::Error> for CommonError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
