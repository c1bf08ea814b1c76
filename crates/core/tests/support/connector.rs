//! Recording `RestConnector` for service tests
//!
//! Records every call in order and answers from a table of scripted replies.
//! One-shot replies are consumed before standing ones. Unscripted calls
//! succeed with an empty value of the requested shape.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use cmslink_core::RestConnector;
use cmslink_domain::{
    CmsError, JsonObject, MultipartUpload, QueryParams, Result as DomainResult, ServiceRoot,
    TextReply,
};
use parking_lot::Mutex;
use serde_json::Value;

/// One call observed by the connector.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub root: ServiceRoot,
    pub service: String,
    pub query: QueryParams,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct RecordingConnector {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<HashMap<(&'static str, String), DomainResult<Value>>>,
    once: Mutex<HashMap<(&'static str, String), VecDeque<DomainResult<Value>>>>,
    upload_status: Mutex<Option<u16>>,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method service` with `value`.
    pub fn respond(self, method: &'static str, service: &str, value: Value) -> Self {
        self.replies.lock().insert((method, service.to_string()), Ok(value));
        self
    }

    /// Fail `method service` with `err`.
    pub fn fail(self, method: &'static str, service: &str, err: CmsError) -> Self {
        self.replies.lock().insert((method, service.to_string()), Err(err));
        self
    }

    /// Fail only the next `method service` call with `err`.
    pub fn fail_once(self, method: &'static str, service: &str, err: CmsError) -> Self {
        self.once.lock().entry((method, service.to_string())).or_default().push_back(Err(err));
        self
    }

    pub fn upload_status(self, status: u16) -> Self {
        *self.upload_status.lock() = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// `"METHOD service"` for each call, in order.
    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| format!("{} {}", c.method, c.service)).collect()
    }

    fn record(
        &self,
        method: &'static str,
        root: ServiceRoot,
        service: &str,
        query: QueryParams,
        body: Option<Value>,
    ) -> Option<DomainResult<Value>> {
        self.calls.lock().push(Call { method, root, service: service.to_string(), query, body });
        let key = (method, service.to_string());
        if let Some(reply) = self.once.lock().get_mut(&key).and_then(VecDeque::pop_front) {
            return Some(reply);
        }
        self.replies.lock().get(&key).cloned()
    }

    fn object(reply: Option<DomainResult<Value>>) -> DomainResult<JsonObject> {
        match reply {
            None => Ok(JsonObject::new()),
            Some(Ok(Value::Object(map))) => Ok(map),
            Some(Ok(_)) => Err(CmsError::Protocol("scripted reply is not an object".into())),
            Some(Err(err)) => Err(err),
        }
    }
}

#[async_trait]
impl RestConnector for RecordingConnector {
    async fn get(
        &self,
        root: ServiceRoot,
        service: &str,
        query: &QueryParams,
    ) -> DomainResult<JsonObject> {
        Self::object(self.record("GET", root, service, query.clone(), None))
    }

    async fn get_array(
        &self,
        root: ServiceRoot,
        service: &str,
        query: &QueryParams,
    ) -> DomainResult<Vec<Value>> {
        match self.record("GET", root, service, query.clone(), None) {
            None => Ok(Vec::new()),
            Some(Ok(Value::Array(items))) => Ok(items),
            Some(Ok(_)) => Err(CmsError::Protocol("scripted reply is not an array".into())),
            Some(Err(err)) => Err(err),
        }
    }

    async fn get_text(
        &self,
        root: ServiceRoot,
        service: &str,
        query: &QueryParams,
    ) -> DomainResult<String> {
        match self.record("GET", root, service, query.clone(), None) {
            None => Ok(String::new()),
            Some(Ok(Value::String(text))) => Ok(text),
            Some(Ok(other)) => Ok(other.to_string()),
            Some(Err(err)) => Err(err),
        }
    }

    async fn post(&self, root: ServiceRoot, service: &str, body: &Value) -> DomainResult<JsonObject> {
        Self::object(self.record("POST", root, service, QueryParams::new(), Some(body.clone())))
    }

    async fn put(&self, root: ServiceRoot, service: &str, body: &Value) -> DomainResult<JsonObject> {
        Self::object(self.record("PUT", root, service, QueryParams::new(), Some(body.clone())))
    }

    async fn delete(&self, root: ServiceRoot, service: &str) -> DomainResult<JsonObject> {
        Self::object(self.record("DELETE", root, service, QueryParams::new(), None))
    }

    async fn post_multipart(
        &self,
        root: ServiceRoot,
        service: &str,
        upload: &MultipartUpload,
    ) -> DomainResult<TextReply> {
        let names: Vec<Value> =
            upload.parts.iter().map(|p| Value::String(p.name.clone())).collect();
        match self.record("MULTIPART", root, service, QueryParams::new(), Some(Value::Array(names)))
        {
            Some(Err(err)) => Err(err),
            _ => Ok(TextReply {
                status: self.upload_status.lock().unwrap_or(200),
                text: String::new(),
            }),
        }
    }
}
