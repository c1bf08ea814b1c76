//! Task parsing and execution

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Context};
use cmslink_core::{MembershipService, PeopleService, RestConnector};
use cmslink_domain::SiteRole;
use serde_json::{json, Value};

/// One command-line task with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    GroupAdd { user: String, group: String },
    GroupRemove { user: String, group: String },
    GroupMembers { group: String },
    SiteAdd { user: String, site: String, role: SiteRole },
    SiteRemove { user: String, site: String },
    SiteMembers { site: String },
    People { filter: Option<String> },
    Help,
}

impl Task {
    /// Parse the arguments following the program name.
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Self::Help);
        };
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        let task = match (name.as_str(), rest.as_slice()) {
            ("group-add", [user, group]) => {
                Self::GroupAdd { user: (*user).into(), group: (*group).into() }
            }
            ("group-remove", [user, group]) => {
                Self::GroupRemove { user: (*user).into(), group: (*group).into() }
            }
            ("group-members", [group]) => Self::GroupMembers { group: (*group).into() },
            ("site-add", [user, site, flag @ ..]) if matches!(flag, [] | ["--manager"]) => {
                Self::SiteAdd {
                    user: (*user).into(),
                    site: (*site).into(),
                    role: SiteRole::for_manager(!flag.is_empty()),
                }
            }
            ("site-remove", [user, site]) => {
                Self::SiteRemove { user: (*user).into(), site: (*site).into() }
            }
            ("site-members", [site]) => Self::SiteMembers { site: (*site).into() },
            ("people", []) => Self::People { filter: None },
            ("people", [filter]) => Self::People { filter: Some((*filter).into()) },
            ("help", _) => Self::Help,
            (
                "group-add" | "group-remove" | "group-members" | "site-add" | "site-remove"
                | "site-members" | "people",
                _,
            ) => bail!("Wrong arguments for task '{name}'"),
            (unknown, _) => bail!("Unknown task: {unknown}"),
        };
        Ok(task)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::GroupAdd { .. } => "group-add",
            Self::GroupRemove { .. } => "group-remove",
            Self::GroupMembers { .. } => "group-members",
            Self::SiteAdd { .. } => "site-add",
            Self::SiteRemove { .. } => "site-remove",
            Self::SiteMembers { .. } => "site-members",
            Self::People { .. } => "people",
            Self::Help => "help",
        }
    }

    /// Run the task and return the JSON line to print.
    pub async fn run(&self, connector: Arc<dyn RestConnector>) -> anyhow::Result<Value> {
        let membership = MembershipService::new(connector.clone());
        let task = self.name();

        let output = match self {
            Self::GroupAdd { user, group } => {
                membership.add_to_group(user, group).await.context("adding user to group")?;
                json!({ "task": task, "user": user, "group": group })
            }
            Self::GroupRemove { user, group } => {
                membership
                    .remove_from_group(user, group)
                    .await
                    .context("removing user from group")?;
                json!({ "task": task, "user": user, "group": group })
            }
            Self::GroupMembers { group } => {
                let members = membership.get_group_members(group).await?;
                json!({ "task": task, "group": group, "members": sorted(members) })
            }
            Self::SiteAdd { user, site, role } => {
                membership.add_to_site(site, user, *role).await.context("adding user to site")?;
                json!({ "task": task, "user": user, "site": site, "role": role.as_str() })
            }
            Self::SiteRemove { user, site } => {
                let removed = membership
                    .remove_from_site_if_present(site, user)
                    .await
                    .context("removing user from site")?;
                json!({ "task": task, "user": user, "site": site, "removed": removed })
            }
            Self::SiteMembers { site } => {
                let members = membership.get_site_members(site).await?;
                json!({ "task": task, "site": site, "members": sorted(members) })
            }
            Self::People { filter } => {
                let people = PeopleService::new(connector).get_people(filter.as_deref()).await?;
                json!({ "task": task, "people": people })
            }
            Self::Help => bail!("help does not talk to the server"),
        };
        Ok(output)
    }
}

fn sorted(members: HashSet<String>) -> Vec<String> {
    let mut members: Vec<_> = members.into_iter().collect();
    members.sort();
    members
}
