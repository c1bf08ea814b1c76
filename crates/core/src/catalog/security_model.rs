//! Security model document stored in the repository

use std::sync::Arc;

use cmslink_domain::constants::{
    SECURITY_MODEL_FILE_NAME, SECURITY_MODEL_MIME, SECURITY_MODEL_NODE_REF, SECURITY_MODEL_PATH,
    UPLOAD_PATH,
};
use cmslink_domain::{CmsError, MultipartUpload, QueryParams, Result, ServiceRoot};
use tracing::info;

use crate::connector_ports::RestConnector;

pub struct SecurityModelService {
    connector: Arc<dyn RestConnector>,
}

impl SecurityModelService {
    pub fn new(connector: Arc<dyn RestConnector>) -> Self {
        Self { connector }
    }

    /// Current model XML, as text.
    pub async fn get_model(&self) -> Result<String> {
        self.connector.get_text(ServiceRoot::Repository, SECURITY_MODEL_PATH, &QueryParams::new()).await
    }

    /// Upload `model_xml` over the stored model. Anything but a 200 fails.
    pub async fn set_model(&self, model_xml: &str) -> Result<()> {
        let upload = MultipartUpload::new()
            .text("updateNodeRef", SECURITY_MODEL_NODE_REF)
            .file(
                "filedata",
                model_xml.as_bytes().to_vec(),
                SECURITY_MODEL_FILE_NAME,
                SECURITY_MODEL_MIME,
            );

        let reply = self.connector.post_multipart(ServiceRoot::Repository, UPLOAD_PATH, &upload).await?;
        if reply.status != 200 {
            return Err(CmsError::application(
                reply.status,
                "Update of security model failed",
                None,
            ));
        }

        info!(bytes = model_xml.len(), "Uploaded security model");
        Ok(())
    }
}
