use std::sync::Arc;
use std::time::Duration;

use cmslink_common::CommonError;
use cmslink_domain::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use cmslink_domain::{CmsError, HttpSettings, Result};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use tracing::debug;

use super::response::ClassifiedResponse;
use crate::errors::InfraError;

/// HTTP transport holding one session's cookie jar.
///
/// Every request is a single attempt. Cookies set by any response (the CAS
/// handshake in particular) are sent on every later request made through
/// this client or its clones.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    jar: Arc<Jar>,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Client configured from connector settings.
    pub fn from_settings(settings: &HttpSettings) -> Result<Self> {
        Self::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request once and drain the response body.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<ClassifiedResponse> {
        let request = builder.build().map_err(|err| CmsError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                if err.is_timeout() {
                    let operation = format!("{method} {url}");
                    return Err(CommonError::timeout(operation, self.timeout).into());
                }
                return Err(InfraError::from(err).into());
            }
        };

        let status = response.status();
        let classified = ClassifiedResponse::read(response).await?;
        debug!(
            %method,
            %url,
            %status,
            body_bytes = classified.body().map_or(0, <[u8]>::len),
            "received HTTP response"
        );
        Ok(classified)
    }

    /// `Cookie` header value the session would send to `url`.
    pub fn cookies_for(&self, url: &str) -> Option<String> {
        let url = reqwest::Url::parse(url).ok()?;
        let header = self.jar.cookies(&url)?;
        header.to_str().ok().map(str::to_string)
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let jar = Arc::new(Jar::default());
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .cookie_provider(jar.clone())
            .no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| CmsError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, jar, timeout: self.timeout })
    }
}
