//! Membership mutations for groups and sites

use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// Role granted when a user is added to a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SiteRole {
    #[default]
    #[serde(rename = "SiteCollaborator")]
    Collaborator,
    #[serde(rename = "SiteManager")]
    Manager,
}

impl_wire_name_conversions!(SiteRole {
    Collaborator => "SiteCollaborator",
    Manager => "SiteManager",
});

impl SiteRole {
    pub fn for_manager(is_manager: bool) -> Self {
        if is_manager {
            Self::Manager
        } else {
            Self::Collaborator
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipOperation {
    Add,
    Remove,
}

impl_wire_name_conversions!(MembershipOperation {
    Add => "add",
    Remove => "remove",
});

/// Authorization scope whose membership changes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MembershipTarget {
    Group { group: String },
    /// `role` only matters for additions.
    Site { site: String, role: SiteRole },
}

/// One membership mutation, built and consumed within a single
/// reconciliation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipChangeRequest {
    pub principal: String,
    pub target: MembershipTarget,
    pub operation: MembershipOperation,
}

impl MembershipChangeRequest {
    pub fn add_to_group(principal: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            target: MembershipTarget::Group { group: group.into() },
            operation: MembershipOperation::Add,
        }
    }

    pub fn remove_from_group(principal: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            target: MembershipTarget::Group { group: group.into() },
            operation: MembershipOperation::Remove,
        }
    }

    pub fn add_to_site(
        principal: impl Into<String>,
        site: impl Into<String>,
        role: SiteRole,
    ) -> Self {
        Self {
            principal: principal.into(),
            target: MembershipTarget::Site { site: site.into(), role },
            operation: MembershipOperation::Add,
        }
    }

    pub fn remove_from_site(principal: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            target: MembershipTarget::Site { site: site.into(), role: SiteRole::default() },
            operation: MembershipOperation::Remove,
        }
    }
}
