//! Shared fixtures for infra integration tests
//!
//! [`CmsServer`] is a single wiremock server standing in for both the CAS
//! server and the content-management server:
//!
//! - `GET  /cas/login`                   login form carrying the `lt` ticket
//! - `POST /cas/login`                   success page, sets `CASTGC`
//! - `GET  /alfresco/faces/dashboard`    CAS-protected page, sets `JSESSIONID`
//! - `/alfresco/service/...`             repository REST API
//! - `/share/service/...`                share REST API

use cmslink_domain::{CasConfig, ConnectorConfig, HttpSettings};
use cmslink_infra::SessionConnector;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret";
pub const TICKET: &str = "LT-1-q9XkYw";
pub const SESSION_COOKIE: &str = "JSESSIONID=sess-42";

pub const LOGIN_PATH: &str = "/cas/login";
pub const PROTECTED_PATH: &str = "/alfresco/faces/dashboard";

pub fn login_form(ticket: &str) -> String {
    format!(
        r#"<html><body><form id="fm1" method="post" action="/cas/login">
  <input id="username" name="username" type="text"/>
  <input id="password" name="password" type="password"/>
  <input type="hidden" name="lt" value="{ticket}"/>
  <input type="hidden" name="_eventId" value="submit"/>
</form></body></html>"#
    )
}

pub const LOGIN_SUCCESS_PAGE: &str =
    r#"<html><body><div id="msg" class="success"><h2>Log In Successful</h2></div></body></html>"#;

pub struct CmsServer {
    pub server: MockServer,
}

impl CmsServer {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn config(&self) -> ConnectorConfig {
        ConnectorConfig {
            service_url: format!("{}/alfresco/service/", self.uri()),
            share_service_url: format!("{}/share/service/", self.uri()),
            cas: CasConfig {
                login_url: format!("{}{LOGIN_PATH}", self.uri()),
                post_login_url: format!("{}{PROTECTED_PATH}", self.uri()),
                username: USERNAME.into(),
                password: PASSWORD.into(),
            },
            http: HttpSettings { timeout_secs: 5, ..HttpSettings::default() },
        }
    }

    /// Mount a CAS server that accepts the test credentials, each step
    /// expected exactly once.
    pub async fn mount_cas(&self) {
        self.mount_login_form(ResponseTemplate::new(200).set_body_string(login_form(TICKET)), 1)
            .await;
        self.mount_login_submit(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "CASTGC=TGT-1-abc; Path=/")
                .set_body_string(LOGIN_SUCCESS_PAGE),
            1,
        )
        .await;
        self.mount_protected(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{SESSION_COOKIE}; Path=/"))
                .set_body_string("<html>dashboard</html>"),
            1,
        )
        .await;
    }

    pub async fn mount_login_form(&self, response: ResponseTemplate, times: u64) {
        Mock::given(method("GET"))
            .and(path(LOGIN_PATH))
            .respond_with(response)
            .expect(times)
            .named("fetch login form")
            .mount(&self.server)
            .await;
    }

    pub async fn mount_login_submit(&self, response: ResponseTemplate, times: u64) {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .and(body_string_contains(format!("lt={TICKET}")))
            .and(body_string_contains(format!("username={USERNAME}")))
            .and(body_string_contains("_eventId=submit"))
            .respond_with(response)
            .expect(times)
            .named("submit login")
            .mount(&self.server)
            .await;
    }

    pub async fn mount_protected(&self, response: ResponseTemplate, times: u64) {
        Mock::given(method("GET"))
            .and(path(PROTECTED_PATH))
            .respond_with(response)
            .expect(times)
            .named("verify session")
            .mount(&self.server)
            .await;
    }

    /// Mount the CAS server and open a session against it.
    pub async fn connect(&self) -> SessionConnector {
        self.mount_cas().await;
        SessionConnector::connect(&self.config()).await.expect("CAS login against mock server")
    }
}

/// Path of a repository service on the mock server.
pub fn repo(service: &str) -> String {
    format!("/alfresco/service/{service}")
}

/// Path of a share service on the mock server.
pub fn share(service: &str) -> String {
    format!("/share/service/{service}")
}
