//! Port interface for the authenticated REST connector
//!
//! Services in this crate build a relative path and a payload, then hand them
//! to a `RestConnector`. The infrastructure crate supplies the HTTP-backed
//! implementation; tests supply an in-memory one.

use async_trait::async_trait;
use cmslink_domain::{JsonObject, MultipartUpload, QueryParams, Result, ServiceRoot, TextReply};
use serde_json::Value;

/// Authenticated REST access to one content-management server.
///
/// Every call is a single request/response with no implicit retry. Error
/// statuses surface as `CmsError::Application`; unreadable bodies as
/// `CmsError::Protocol`; I/O failures as `CmsError::Transport`.
#[async_trait]
pub trait RestConnector: Send + Sync {
    /// GET a service and read the response as a JSON object
    async fn get(&self, root: ServiceRoot, service: &str, query: &QueryParams)
        -> Result<JsonObject>;

    /// GET a service and read the response as a JSON array
    async fn get_array(
        &self,
        root: ServiceRoot,
        service: &str,
        query: &QueryParams,
    ) -> Result<Vec<Value>>;

    /// GET a service and return the raw body text
    async fn get_text(&self, root: ServiceRoot, service: &str, query: &QueryParams)
        -> Result<String>;

    /// POST a JSON body and read the response as a JSON object
    async fn post(&self, root: ServiceRoot, service: &str, body: &Value) -> Result<JsonObject>;

    /// PUT a JSON body and read the response as a JSON object
    async fn put(&self, root: ServiceRoot, service: &str, body: &Value) -> Result<JsonObject>;

    /// DELETE a service and read the response as a JSON object
    async fn delete(&self, root: ServiceRoot, service: &str) -> Result<JsonObject>;

    /// POST a multipart form and return the status with the raw body text.
    ///
    /// Error statuses still fail with `CmsError::Application`.
    async fn post_multipart(
        &self,
        root: ServiceRoot,
        service: &str,
        upload: &MultipartUpload,
    ) -> Result<TextReply>;
}

/// Percent-encode one path segment supplied by a caller.
pub fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
