//! Payloads for the non-JSON parts of the service catalog

use serde::{Deserialize, Serialize};

/// Multipart form body for uploads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartUpload {
    pub parts: Vec<UploadPart>,
}

impl MultipartUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(UploadPart { name: name.into(), content: PartContent::Text(value.into()) });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
    ) -> Self {
        self.parts.push(UploadPart {
            name: name.into(),
            content: PartContent::File {
                bytes: bytes.into(),
                file_name: file_name.into(),
                mime: mime.into(),
            },
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub name: String,
    pub content: PartContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartContent {
    Text(String),
    File { bytes: Vec<u8>, file_name: String, mime: String },
}

/// Status and text body of a response whose caller needs the exact status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextReply {
    pub status: u16,
    pub text: String,
}
