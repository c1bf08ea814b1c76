//! End-to-end membership flows
//!
//! Core services driven through a CAS-authenticated session connector
//! against the mock server. Call counts are asserted by the server.

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use std::collections::HashSet;
use std::sync::Arc;

use cmslink_core::{MembershipService, PeopleService, RestConnector};
use cmslink_domain::{CmsError, MembershipChangeRequest, SiteRole};
use serde_json::json;
use support::{repo, CmsServer};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn membership(cms: &CmsServer) -> MembershipService {
    let connector: Arc<dyn RestConnector> = Arc::new(cms.connect().await);
    MembershipService::new(connector)
}

#[tokio::test]
async fn add_to_group_removes_then_adds() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("PUT"))
        .and(path(repo("api/people/alice")))
        .and(body_json(json!({ "removeGroups": ["GROUP_ops"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "userName": "alice" })))
        .expect(1)
        .mount(&cms.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(repo("api/people/alice")))
        .and(body_json(json!({ "addGroups": ["GROUP_ops"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "userName": "alice" })))
        .expect(1)
        .mount(&cms.server)
        .await;

    service.add_to_group("alice", "ops").await.unwrap();

    let puts: Vec<_> = cms
        .server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "PUT")
        .map(|r| String::from_utf8(r.body).unwrap())
        .collect();
    assert_eq!(puts.len(), 2);
    assert!(puts[0].contains("removeGroups"));
    assert!(puts[1].contains("addGroups"));
}

#[tokio::test]
async fn add_to_group_survives_failed_remove() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("PUT"))
        .and(path(repo("api/people/alice")))
        .and(body_json(json!({ "removeGroups": ["GROUP_ops"] })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "not a member" })),
        )
        .expect(1)
        .mount(&cms.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(repo("api/people/alice")))
        .and(body_json(json!({ "addGroups": ["GROUP_ops"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&cms.server)
        .await;

    assert!(service.add_to_group("alice", "ops").await.is_ok());
}

#[tokio::test]
async fn add_to_group_reports_failed_add() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("PUT"))
        .and(path(repo("api/people/alice")))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&cms.server)
        .await;

    let err = service.add_to_group("alice", "ops").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn group_members_are_deduplicated() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("GET"))
        .and(path(repo("api/groups/ops/children")))
        .and(query_param("authorityType", "USER"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "shortName": "alice", "fullName": "alice" },
                { "shortName": "bob" },
                { "shortName": "alice" },
                { "displayName": "no short name" }
            ]
        })))
        .expect(1)
        .mount(&cms.server)
        .await;

    let members = service.get_group_members("ops").await.unwrap();
    assert_eq!(members, HashSet::from(["alice".to_string(), "bob".to_string()]));
}

#[tokio::test]
async fn site_members_come_from_authority_user_names() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("GET"))
        .and(path(repo("api/sites/projectX/memberships")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "role": "SiteManager", "authority": { "userName": "carol" } },
            { "role": "SiteCollaborator", "authority": { "userName": "dave" } },
            { "role": "SiteCollaborator", "authority": {} }
        ])))
        .expect(1)
        .mount(&cms.server)
        .await;

    let members = service.get_site_members("projectX").await.unwrap();
    assert_eq!(members, HashSet::from(["carol".to_string(), "dave".to_string()]));
}

#[tokio::test]
async fn missing_site_is_application_error() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("GET"))
        .and(path(repo("api/sites/ghost/memberships")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Site ghost not found" })),
        )
        .mount(&cms.server)
        .await;

    let err = service.get_site_members("ghost").await.unwrap_err();
    assert_eq!(err, CmsError::application(404, "Not Found", Some("Site ghost not found".into())));
}

#[tokio::test]
async fn remove_from_site_if_present_matches_case_insensitively() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("GET"))
        .and(path(repo("api/people/alice/sites")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "shortName": "ProjectX" },
            { "shortName": "projectx" }
        ])))
        .expect(1)
        .mount(&cms.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(repo("api/sites/projectX/memberships/alice")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&cms.server)
        .await;

    assert!(service.remove_from_site_if_present("projectX", "alice").await.unwrap());
}

#[tokio::test]
async fn remove_from_site_if_absent_issues_no_delete() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("GET"))
        .and(path(repo("api/people/alice/sites")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "shortName": "other" }])))
        .expect(1)
        .mount(&cms.server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&cms.server)
        .await;

    assert!(!service.remove_from_site_if_present("projectX", "alice").await.unwrap());
}

#[tokio::test]
async fn apply_site_add_posts_membership() {
    let cms = CmsServer::start().await;
    let service = membership(&cms).await;
    Mock::given(method("POST"))
        .and(path(repo("api/sites/projectX/memberships")))
        .and(body_json(json!({ "person": { "userName": "erin" }, "role": "SiteManager" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "role": "SiteManager" })))
        .expect(1)
        .mount(&cms.server)
        .await;

    service
        .apply(MembershipChangeRequest::add_to_site("erin", "projectX", SiteRole::Manager))
        .await
        .unwrap();
}

#[tokio::test]
async fn people_listing_passes_filter() {
    let cms = CmsServer::start().await;
    let connector: Arc<dyn RestConnector> = Arc::new(cms.connect().await);
    Mock::given(method("GET"))
        .and(path(repo("api/people")))
        .and(query_param("filter", "ali"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "people": [{ "userName": "alice" }] })),
        )
        .expect(1)
        .mount(&cms.server)
        .await;

    let people = PeopleService::new(connector).get_people(Some("ali")).await.unwrap();
    assert_eq!(people, vec![json!({ "userName": "alice" })]);
}
