//! Conversions from external infrastructure errors into domain errors.
//!
//! Error statuses never reach this module: responses are classified by
//! [`crate::http::ClassifiedResponse`], and nothing calls
//! `error_for_status`.

use cmslink_domain::CmsError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CmsError);

impl From<InfraError> for CmsError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CmsError> for InfraError {
    fn from(value: CmsError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCmsError {
    fn into_cms(self) -> CmsError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CmsError */
/* -------------------------------------------------------------------------- */

impl IntoCmsError for HttpError {
    fn into_cms(self) -> CmsError {
        if self.is_builder() {
            return CmsError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_timeout() {
            return CmsError::Transport("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return CmsError::Transport("HTTP connection failure".into());
        }

        if self.is_body() || self.is_decode() {
            return CmsError::Transport(format!("failed to read HTTP body: {self}"));
        }

        CmsError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_cms())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
