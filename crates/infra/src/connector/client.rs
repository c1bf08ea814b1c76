//! Session connector
//!
//! Resolves catalog paths against the configured service roots, sends each
//! request once through the session's [`HttpClient`] and classifies the
//! response.

use async_trait::async_trait;
use cmslink_core::RestConnector;
use cmslink_domain::{
    CmsError, ConnectorConfig, JsonObject, MultipartUpload, PartContent, QueryParams, Result,
    ServiceRoot, TextReply,
};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use tracing::{info, instrument};

use crate::auth::{Authenticator, CasAuthenticator};
use crate::http::{ClassifiedResponse, HttpClient};

const APPLICATION_JSON: &str = "application/json";

/// REST connector bound to one authenticated session.
///
/// Only obtainable through [`SessionConnector::connect`] or
/// [`SessionConnector::connect_with`], both of which authenticate first. The
/// session lives as long as the connector; there is no explicit logout.
pub struct SessionConnector {
    http: HttpClient,
    service_url: String,
    share_service_url: String,
}

impl SessionConnector {
    /// Validate `config`, open a session and log into CAS.
    pub async fn connect(config: &ConnectorConfig) -> Result<Self> {
        let authenticator = CasAuthenticator::new(config.cas.clone());
        Self::connect_with(config, &authenticator).await
    }

    /// Like [`Self::connect`] with a caller-supplied authenticator.
    pub async fn connect_with(
        config: &ConnectorConfig,
        authenticator: &dyn Authenticator,
    ) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::from_settings(&config.http)?;

        authenticator.authenticate(&http).await?;

        info!(
            service_url = %config.service_url,
            share_service_url = %config.share_service_url,
            "Session connector ready"
        );
        Ok(Self {
            http,
            service_url: config.service_url.clone(),
            share_service_url: config.share_service_url.clone(),
        })
    }

    /// Full URL of `service` under `root` with `query` appended.
    pub fn url(&self, root: ServiceRoot, service: &str, query: &QueryParams) -> String {
        let base = match root {
            ServiceRoot::Repository => &self.service_url,
            ServiceRoot::Share => &self.share_service_url,
        };
        build_url(base, service, query)
    }

    async fn get_raw(
        &self,
        root: ServiceRoot,
        service: &str,
        query: &QueryParams,
    ) -> Result<ClassifiedResponse> {
        let url = self.url(root, service, query);
        self.http.execute(self.http.request(Method::GET, url)).await
    }

    async fn send_json(
        &self,
        method: Method,
        root: ServiceRoot,
        service: &str,
        body: &Value,
    ) -> Result<JsonObject> {
        let url = self.url(root, service, &QueryParams::new());
        let request =
            self.http.request(method, url).header(ACCEPT, APPLICATION_JSON).json(body);
        self.http.execute(request).await?.as_object()
    }
}

#[async_trait]
impl RestConnector for SessionConnector {
    #[instrument(skip(self, query), fields(%root))]
    async fn get(
        &self,
        root: ServiceRoot,
        service: &str,
        query: &QueryParams,
    ) -> Result<JsonObject> {
        self.get_raw(root, service, query).await?.as_object()
    }

    #[instrument(skip(self, query), fields(%root))]
    async fn get_array(
        &self,
        root: ServiceRoot,
        service: &str,
        query: &QueryParams,
    ) -> Result<Vec<Value>> {
        self.get_raw(root, service, query).await?.as_array()
    }

    #[instrument(skip(self, query), fields(%root))]
    async fn get_text(
        &self,
        root: ServiceRoot,
        service: &str,
        query: &QueryParams,
    ) -> Result<String> {
        self.get_raw(root, service, query).await?.as_text()
    }

    #[instrument(skip(self, body), fields(%root))]
    async fn post(&self, root: ServiceRoot, service: &str, body: &Value) -> Result<JsonObject> {
        self.send_json(Method::POST, root, service, body).await
    }

    #[instrument(skip(self, body), fields(%root))]
    async fn put(&self, root: ServiceRoot, service: &str, body: &Value) -> Result<JsonObject> {
        self.send_json(Method::PUT, root, service, body).await
    }

    #[instrument(skip(self), fields(%root))]
    async fn delete(&self, root: ServiceRoot, service: &str) -> Result<JsonObject> {
        let url = self.url(root, service, &QueryParams::new());
        self.http.execute(self.http.request(Method::DELETE, url)).await?.as_object()
    }

    #[instrument(skip(self, upload), fields(%root, parts = upload.parts.len()))]
    async fn post_multipart(
        &self,
        root: ServiceRoot,
        service: &str,
        upload: &MultipartUpload,
    ) -> Result<TextReply> {
        let form = multipart_form(upload)?;
        let url = self.url(root, service, &QueryParams::new());
        self.http.execute(self.http.request(Method::POST, url).multipart(form)).await?.into_reply()
    }
}

/// Join `base` and `service` and append `query`.
///
/// Exactly one `/` separates base and path. Parameters start with `?` unless
/// the URL already has a query, then continue with `&`. Keys are
/// percent-encoded; values are appended as given.
pub fn build_url(base: &str, service: &str, query: &QueryParams) -> String {
    let mut url = match (base.ends_with('/'), service.starts_with('/')) {
        (true, true) => format!("{}{}", base, &service[1..]),
        (false, false) if !service.is_empty() => format!("{base}/{service}"),
        _ => format!("{base}{service}"),
    };

    let mut separator = if url.contains('?') { '&' } else { '?' };
    for (key, value) in query {
        url.push(separator);
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(value);
        separator = '&';
    }
    url
}

fn multipart_form(upload: &MultipartUpload) -> Result<Form> {
    let mut form = Form::new();
    for part in &upload.parts {
        let body = match &part.content {
            PartContent::Text(value) => Part::text(value.clone()),
            PartContent::File { bytes, file_name, mime } => Part::bytes(bytes.clone())
                .file_name(file_name.clone())
                .mime_str(mime)
                .map_err(|e| {
                    CmsError::InvalidInput(format!("invalid MIME type '{mime}' for part '{}': {e}", part.name))
                })?,
        };
        form = form.part(part.name.clone(), body);
    }
    Ok(form)
}
