//! Value types exchanged between the service catalog and the connector

pub mod catalog;
pub mod membership;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

pub use catalog::{MultipartUpload, PartContent, TextReply, UploadPart};
pub use membership::{MembershipChangeRequest, MembershipOperation, MembershipTarget, SiteRole};

/// Generic JSON object as returned by `as_object()`
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Query parameters appended to a request URL, in key order.
pub type QueryParams = BTreeMap<String, String>;

/// Build query parameters from borrowed pairs.
pub fn query_params<'a, I>(pairs: I) -> QueryParams
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// REST API root a call is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRoot {
    /// The primary repository API
    #[default]
    Repository,
    /// The share front-end API
    Share,
}

impl_wire_name_conversions!(ServiceRoot {
    Repository => "repository",
    Share => "share",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_are_key_ordered() {
        let params = query_params([("filter", "bob"), ("authorityType", "USER")]);
        let keys: Vec<_> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["authorityType", "filter"]);
    }

    #[test]
    fn service_root_round_trips_through_wire_name() {
        assert_eq!("Share".parse::<ServiceRoot>().unwrap(), ServiceRoot::Share);
        assert_eq!(ServiceRoot::default(), ServiceRoot::Repository);
        assert_eq!(serde_json::to_string(&ServiceRoot::Share).unwrap(), "\"share\"");
    }
}
