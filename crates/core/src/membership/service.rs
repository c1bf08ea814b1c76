//! Membership reconciliation for groups and sites

use std::collections::HashSet;
use std::sync::Arc;

use cmslink_common::ErrorClassification;
use cmslink_domain::constants::{AUTHORITY_TYPE_USER, GROUP_AUTHORITY_PREFIX};
use cmslink_domain::{
    query_params, CmsError, JsonObject, MembershipChangeRequest, MembershipOperation,
    MembershipTarget, Result, ServiceRoot, SiteRole,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::connector_ports::{path_segment, RestConnector};

/// Idempotent add/remove of users in groups and sites.
///
/// Each logical mutation costs one or two connector calls, issued one after
/// the other.
pub struct MembershipService {
    connector: Arc<dyn RestConnector>,
}

impl MembershipService {
    pub fn new(connector: Arc<dyn RestConnector>) -> Self {
        Self { connector }
    }

    /// Add `user` to `group` (group name without the `GROUP_` prefix).
    ///
    /// The remote API rejects adding an existing member, so the user is
    /// removed first and any failure of that removal is logged and dropped.
    /// A missing group is silently ignored by the server.
    pub async fn add_to_group(&self, user: &str, group: &str) -> Result<()> {
        if let Err(err) = self.remove_from_group(user, group).await {
            warn!(
                user,
                group,
                error = %err,
                severity = %err.severity(),
                "Ignoring failure removing user from group before re-adding"
            );
        }

        self.update_groups(user, "addGroups", group).await?;
        info!(user, group, "Added user to group");
        Ok(())
    }

    /// Remove `user` from `group`. Failures propagate.
    pub async fn remove_from_group(&self, user: &str, group: &str) -> Result<()> {
        self.update_groups(user, "removeGroups", group).await?;
        debug!(user, group, "Removed user from group");
        Ok(())
    }

    pub async fn add_to_site(&self, site: &str, user: &str, role: SiteRole) -> Result<()> {
        let body = json!({
            "person": { "userName": user },
            "role": role.as_str(),
        });
        self.connector.post(ServiceRoot::Repository, &site_memberships_path(site), &body).await?;
        info!(site, user, role = %role, "Added user to site");
        Ok(())
    }

    pub async fn remove_from_site(&self, site: &str, user: &str) -> Result<()> {
        let service = format!("{}/{}", site_memberships_path(site), path_segment(user));
        self.connector.delete(ServiceRoot::Repository, &service).await?;
        info!(site, user, "Removed user from site");
        Ok(())
    }

    /// Remove `user` from `site` only when the user's own site list contains
    /// it. Site names compare case-insensitively; at most one remove is
    /// issued.
    ///
    /// Returns whether a removal happened.
    pub async fn remove_from_site_if_present(&self, site: &str, user: &str) -> Result<bool> {
        let service = format!("api/people/{}/sites", path_segment(user));
        let sites = self
            .connector
            .get_array(ServiceRoot::Repository, &service, &Default::default())
            .await?;

        let is_member = sites
            .iter()
            .filter_map(|entry| entry.get("shortName").and_then(Value::as_str))
            .any(|short_name| short_name.eq_ignore_ascii_case(site));

        if !is_member {
            debug!(site, user, "User is not a site member, nothing to remove");
            return Ok(false);
        }

        self.remove_from_site(site, user).await?;
        Ok(true)
    }

    /// Users directly in `group`, deduplicated. Entries without a
    /// `shortName` are skipped.
    pub async fn get_group_members(&self, group: &str) -> Result<HashSet<String>> {
        let service = format!("api/groups/{}/children", path_segment(group));
        let query = query_params([("authorityType", AUTHORITY_TYPE_USER)]);
        let response = self.connector.get(ServiceRoot::Repository, &service, &query).await?;

        let entries = data_array(&response).ok_or_else(|| {
            CmsError::Protocol(format!("group listing for '{group}' has no data array"))
        })?;

        Ok(entries
            .iter()
            .filter_map(|entry| entry.get("shortName").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    /// Users who are members of `site`, deduplicated. Entries without a
    /// non-empty `authority.userName` are skipped.
    pub async fn get_site_members(&self, site: &str) -> Result<HashSet<String>> {
        let query = query_params([("authorityType", AUTHORITY_TYPE_USER)]);
        let entries = self
            .connector
            .get_array(ServiceRoot::Repository, &site_memberships_path(site), &query)
            .await?;

        Ok(entries
            .iter()
            .filter_map(|entry| entry.get("authority")?.get("userName")?.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Apply one membership change request.
    ///
    /// Site removals go through [`Self::remove_from_site_if_present`], so a
    /// request for a user who already left is a no-op.
    pub async fn apply(&self, request: MembershipChangeRequest) -> Result<()> {
        let MembershipChangeRequest { principal, target, operation } = request;
        match (target, operation) {
            (MembershipTarget::Group { group }, MembershipOperation::Add) => {
                self.add_to_group(&principal, &group).await
            }
            (MembershipTarget::Group { group }, MembershipOperation::Remove) => {
                self.remove_from_group(&principal, &group).await
            }
            (MembershipTarget::Site { site, role }, MembershipOperation::Add) => {
                self.add_to_site(&site, &principal, role).await
            }
            (MembershipTarget::Site { site, .. }, MembershipOperation::Remove) => {
                self.remove_from_site_if_present(&site, &principal).await.map(|_| ())
            }
        }
    }

    async fn update_groups(&self, user: &str, field: &str, group: &str) -> Result<JsonObject> {
        let body = json!({ field: [format!("{GROUP_AUTHORITY_PREFIX}{group}")] });
        let service = format!("api/people/{}", path_segment(user));
        self.connector.put(ServiceRoot::Repository, &service, &body).await
    }
}

fn site_memberships_path(site: &str) -> String {
    format!("api/sites/{}/memberships", path_segment(site))
}

fn data_array(response: &JsonObject) -> Option<&Vec<Value>> {
    response.get("data").and_then(Value::as_array)
}
