//! Error types used throughout the client

use cmslink_common::error::{CommonError, ErrorClassification, ErrorSeverity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for cmslink
///
/// Every failure a caller can observe falls into one of these kinds. None of
/// them poison the process; the caller decides what to do next.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CmsError {
    /// Required configuration key absent or invalid. Raised before any
    /// network traffic.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A step of the CAS handshake failed. The connector is unusable.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// I/O or protocol failure below HTTP semantics (connect, timeout, reset).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but could not be read in the requested shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server answered with an error status.
    #[error("{}", application_message(.status, .reason, .message))]
    Application { status: u16, reason: String, message: Option<String> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn application_message(status: &u16, reason: &str, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("Remote action failed: {status}: {reason} \"{message}\""),
        None => format!("Remote action failed: {status}: {reason}"),
    }
}

impl CmsError {
    pub fn application(status: u16, reason: impl Into<String>, message: Option<String>) -> Self {
        Self::Application { status, reason: reason.into(), message }
    }

    /// Status code of an application error, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorClassification for CmsError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(_) | Self::Authentication(_) => ErrorSeverity::Error,
            Self::Transport(_) => ErrorSeverity::Warning,
            Self::Protocol(_) => ErrorSeverity::Error,
            Self::Application { status, .. } if *status >= 500 => ErrorSeverity::Error,
            Self::Application { .. } | Self::InvalidInput(_) => ErrorSeverity::Warning,
            Self::Internal(_) => ErrorSeverity::Critical,
        }
    }
}

impl From<CommonError> for CmsError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Config { .. }
            | CommonError::Serialization { .. }
            | CommonError::Io { .. } => Self::Config(err.to_string()),
            CommonError::Timeout { .. } => Self::Transport(err.to_string()),
            CommonError::Internal { .. } => Self::Internal(err.to_string()),
        }
    }
}

/// Result type alias for cmslink operations
pub type Result<T> = std::result::Result<T, CmsError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn application_error_renders_status_reason_and_message() {
        let err = CmsError::application(409, "Conflict", Some("already a member".into()));
        assert_eq!(err.to_string(), "Remote action failed: 409: Conflict \"already a member\"");
        assert_eq!(err.status(), Some(409));

        let bare = CmsError::application(404, "Not Found", None);
        assert_eq!(bare.to_string(), "Remote action failed: 404: Not Found");
    }

    #[test]
    fn only_transport_errors_are_retryable() {
        assert!(CmsError::Transport("reset".into()).is_retryable());
        assert!(!CmsError::Authentication("no ticket".into()).is_retryable());
        assert!(!CmsError::application(503, "Service Unavailable", None).is_retryable());
        assert!(CmsError::Internal("bug".into()).is_critical());
    }

    #[test]
    fn server_side_application_errors_are_more_severe() {
        assert_eq!(
            CmsError::application(500, "Internal Server Error", None).severity(),
            ErrorSeverity::Error
        );
        assert_eq!(CmsError::application(404, "Not Found", None).severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn common_errors_map_onto_domain_kinds() {
        let err: CmsError = CommonError::config_field("cas.url.login", "missing").into();
        assert!(matches!(err, CmsError::Config(msg) if msg.contains("cas.url.login")));

        let err: CmsError =
            CommonError::timeout("GET https://cms/", Duration::from_secs(30)).into();
        assert!(matches!(err, CmsError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn errors_serialize_with_type_tag() {
        let json = serde_json::to_value(CmsError::Protocol("no status returned".into())).unwrap();
        assert_eq!(json["type"], "Protocol");
        assert_eq!(json["message"], "no status returned");
    }
}
