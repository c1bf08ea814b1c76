//! Records-management constraint values

use std::sync::Arc;

use cmslink_domain::{Result, ServiceRoot};
use serde_json::json;
use tracing::info;

use crate::connector_ports::{path_segment, RestConnector};

pub struct RecordsService {
    connector: Arc<dyn RestConnector>,
}

impl RecordsService {
    pub fn new(connector: Arc<dyn RestConnector>) -> Self {
        Self { connector }
    }

    /// Replace the authorities of `group` within `constraint` with `users`.
    pub async fn update_constraint<S: AsRef<str>>(
        &self,
        constraint: &str,
        group: &str,
        users: &[S],
    ) -> Result<()> {
        let authorities: Vec<&str> = users.iter().map(AsRef::as_ref).collect();
        let body = json!({
            "values": [{ "value": group, "authorities": authorities }]
        });
        let service = format!("api/rma/admin/rmconstraints/{}/values", path_segment(constraint));

        self.connector.post(ServiceRoot::Repository, &service, &body).await?;
        info!(constraint, group, users = authorities.len(), "Updated constraint values");
        Ok(())
    }
}
