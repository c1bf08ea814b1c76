//! People directory and profile updates

use std::sync::Arc;

use cmslink_domain::constants::{PEOPLE_PATH, PROFILE_PATH};
use cmslink_domain::{CmsError, JsonObject, QueryParams, Result, ServiceRoot};
use serde_json::Value;
use tracing::debug;

use crate::connector_ports::RestConnector;

pub struct PeopleService {
    connector: Arc<dyn RestConnector>,
}

impl PeopleService {
    pub fn new(connector: Arc<dyn RestConnector>) -> Self {
        Self { connector }
    }

    /// List people, optionally narrowed by the server-side `filter`.
    pub async fn get_people(&self, filter: Option<&str>) -> Result<Vec<Value>> {
        let mut query = QueryParams::new();
        if let Some(filter) = filter {
            query.insert("filter".to_string(), filter.to_string());
        }

        let mut response = self.connector.get(ServiceRoot::Repository, PEOPLE_PATH, &query).await?;
        match response.remove("people") {
            Some(Value::Array(people)) => {
                debug!(count = people.len(), "Fetched people");
                Ok(people)
            }
            _ => Err(CmsError::Protocol("people listing has no people array".into())),
        }
    }

    /// Post profile `fields` for `user`. The user name is added to the
    /// payload, overriding any `userName` already present.
    pub async fn update_profile(&self, user: &str, mut fields: JsonObject) -> Result<JsonObject> {
        fields.insert("userName".to_string(), Value::String(user.to_string()));
        self.connector.post(ServiceRoot::Repository, PROFILE_PATH, &Value::Object(fields)).await
    }
}
