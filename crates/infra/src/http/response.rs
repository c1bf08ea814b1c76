//! Response classification
//!
//! A [`ClassifiedResponse`] owns the one chance to read a response body. The
//! body is drained when the response is wrapped, so every accessor and every
//! failure path leaves the connection reusable.
//!
//! | status  | parse result                 | outcome                          |
//! |---------|------------------------------|----------------------------------|
//! | none    | -                            | `Protocol("no status returned")` |
//! | < 400   | parsed                       | parsed value                     |
//! | < 400   | failed, object/array         | `Protocol`                       |
//! | < 400   | text                         | raw body, `""` when absent       |
//! | >= 400  | any                          | `Application` with status, reason and the body's `message` if any |
//!
//! The reason in an `Application` error is the standard phrase for the status
//! code (`StatusCode::canonical_reason`), not the text the server sent on its
//! status line; reqwest does not expose the latter. Codes without a standard
//! phrase get `"unknown status"`.

use cmslink_domain::constants::{HTTP_ERROR_THRESHOLD, NO_STATUS_MESSAGE};
use cmslink_domain::{CmsError, JsonObject, Result, TextReply};
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::errors::InfraError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedResponse {
    status: Option<StatusCode>,
    body: Option<Vec<u8>>,
}

impl ClassifiedResponse {
    /// Drain `response` and wrap it.
    pub async fn read(response: Response) -> Result<Self> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| CmsError::from(InfraError::from(err)))?;
        Ok(Self::from_parts(Some(status), bytes.to_vec()))
    }

    /// Wrap an already drained response. A zero-length body counts as absent.
    pub fn from_parts(status: Option<StatusCode>, body: Vec<u8>) -> Self {
        let body = if body.is_empty() { None } else { Some(body) };
        Self { status, body }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Whether a status is present and below 400.
    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|s| s.as_u16() < HTTP_ERROR_THRESHOLD)
    }

    /// Read the body as a JSON object.
    pub fn as_object(self) -> Result<JsonObject> {
        self.classify("object", |body| match serde_json::from_slice(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(format!("expected a JSON object, found {}", kind_of(&other))),
            Err(err) => Err(err.to_string()),
        })
    }

    /// Read the body as a JSON array.
    pub fn as_array(self) -> Result<Vec<Value>> {
        self.classify("array", |body| match serde_json::from_slice(body) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(other) => Err(format!("expected a JSON array, found {}", kind_of(&other))),
            Err(err) => Err(err.to_string()),
        })
    }

    /// Read the body as text, whatever its shape. An absent body is `""`.
    pub fn as_text(self) -> Result<String> {
        let status = self.checked_status()?;
        if status.as_u16() >= HTTP_ERROR_THRESHOLD {
            return Err(self.application_error(status));
        }
        Ok(self.body.map(|b| String::from_utf8_lossy(&b).into_owned()).unwrap_or_default())
    }

    /// Read the body as text and keep the exact status.
    pub fn into_reply(self) -> Result<TextReply> {
        let status = self.checked_status()?.as_u16();
        let text = self.as_text()?;
        Ok(TextReply { status, text })
    }

    fn classify<T>(
        self,
        shape: &str,
        parse: impl FnOnce(&[u8]) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let status = self.checked_status()?;
        let parsed = self.body.as_deref().map(parse);

        if status.as_u16() >= HTTP_ERROR_THRESHOLD {
            return Err(self.application_error(status));
        }

        match parsed {
            Some(Ok(value)) => Ok(value),
            Some(Err(reason)) => {
                Err(CmsError::Protocol(format!("invalid JSON {shape} in response body: {reason}")))
            }
            None => Err(CmsError::Protocol(format!("missing JSON {shape}: response has no body"))),
        }
    }

    fn checked_status(&self) -> Result<StatusCode> {
        self.status.ok_or_else(|| CmsError::Protocol(NO_STATUS_MESSAGE.into()))
    }

    fn application_error(&self, status: StatusCode) -> CmsError {
        let message = self
            .body
            .as_deref()
            .and_then(|body| serde_json::from_slice::<Value>(body).ok())
            .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string));

        CmsError::application(
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown status"),
            message,
        )
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
