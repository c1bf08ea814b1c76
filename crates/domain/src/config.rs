//! Connector configuration

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::{CmsError, Result};

/// Everything a session connector needs before it can issue a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Base URL of the repository REST API, e.g. `https://cms/alfresco/service/`
    pub service_url: String,
    /// Base URL of the share REST API
    pub share_service_url: String,
    pub cas: CasConfig,
    #[serde(default)]
    pub http: HttpSettings,
}

/// CAS endpoints and credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasConfig {
    pub login_url: String,
    /// CAS-protected page fetched after login so the server issues its
    /// session cookie.
    pub post_login_url: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for CasConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CasConfig")
            .field("login_url", &self.login_url)
            .field("post_login_url", &self.post_login_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_TIMEOUT_SECS, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

impl ConnectorConfig {
    /// Reject configurations that cannot possibly work, before any network
    /// traffic happens.
    pub fn validate(&self) -> Result<()> {
        require_http_url("service_url", &self.service_url)?;
        require_http_url("share_service_url", &self.share_service_url)?;
        require_http_url("cas.login_url", &self.cas.login_url)?;
        require_http_url("cas.post_login_url", &self.cas.post_login_url)?;

        if self.cas.username.trim().is_empty() {
            return Err(CmsError::Config("cas.username must not be empty".into()));
        }
        if self.http.timeout_secs == 0 {
            return Err(CmsError::Config("http.timeout_secs must be greater than zero".into()));
        }
        Ok(())
    }
}

fn require_http_url(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CmsError::Config(format!("{field} must not be empty")));
    }
    let parsed = Url::parse(value)
        .map_err(|e| CmsError::Config(format!("{field} is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CmsError::Config(format!("{field} must use http or https, got '{other}'"))),
    }
}
