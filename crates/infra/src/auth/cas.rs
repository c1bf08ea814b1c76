//! CAS single sign-on handshake
//!
//! The handshake is a strictly sequential state machine:
//!
//! ```text
//! Start --GET login--> TicketFetched --POST login--> LoggedIn --GET protected--> Verified
//! ```
//!
//! Any failing step ends the handshake with `CmsError::Authentication` naming
//! the step; later steps never run. There are no retries.

use std::fmt;

use async_trait::async_trait;
use cmslink_domain::constants::{LOGIN_EVENT_ID, LOGIN_SUCCESS_MARKER, LOGIN_TICKET_FIELD};
use cmslink_domain::{CasConfig, CmsError, Result};
use reqwest::{Method, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::ticket::{extract_login_ticket, LoginTicket};
use super::Authenticator;
use crate::http::{ClassifiedResponse, HttpClient};

/// Step of the handshake, used in errors and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStep {
    FetchTicket,
    SubmitLogin,
    Verify,
}

impl fmt::Display for HandshakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FetchTicket => "fetch ticket",
            Self::SubmitLogin => "submit login",
            Self::Verify => "verify session",
        })
    }
}

#[derive(Debug)]
enum HandshakeState {
    Start,
    TicketFetched(LoginTicket),
    LoggedIn,
    Verified,
}

impl HandshakeState {
    fn next_step(&self) -> Option<HandshakeStep> {
        match self {
            Self::Start => Some(HandshakeStep::FetchTicket),
            Self::TicketFetched(_) => Some(HandshakeStep::SubmitLogin),
            Self::LoggedIn => Some(HandshakeStep::Verify),
            Self::Verified => None,
        }
    }
}

/// Logs into CAS with a username and password, leaving the session cookies
/// in the HTTP client's jar.
pub struct CasAuthenticator {
    config: CasConfig,
}

impl CasAuthenticator {
    pub fn new(config: CasConfig) -> Self {
        Self { config }
    }

    async fn advance(&self, http: &HttpClient, state: HandshakeState) -> Result<HandshakeState> {
        match state {
            HandshakeState::Start => self.fetch_ticket(http).await.map(HandshakeState::TicketFetched),
            HandshakeState::TicketFetched(ticket) => {
                self.submit_login(http, ticket).await.map(|()| HandshakeState::LoggedIn)
            }
            HandshakeState::LoggedIn => self.verify(http).await.map(|()| HandshakeState::Verified),
            HandshakeState::Verified => Ok(HandshakeState::Verified),
        }
    }

    async fn fetch_ticket(&self, http: &HttpClient) -> Result<LoginTicket> {
        let step = HandshakeStep::FetchTicket;
        let response = send(http, step, http.request(Method::GET, &self.config.login_url)).await?;
        let page = require_body(step, response)?;

        extract_login_ticket(&page)
            .ok_or_else(|| step_error(step, format!("login form has no '{LOGIN_TICKET_FIELD}' value")))
    }

    async fn submit_login(&self, http: &HttpClient, ticket: LoginTicket) -> Result<()> {
        let step = HandshakeStep::SubmitLogin;
        let form = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
            (LOGIN_TICKET_FIELD, ticket.as_str()),
            ("_eventId", LOGIN_EVENT_ID),
        ];

        let request = http.request(Method::POST, &self.config.login_url).form(&form);
        let response = send(http, step, request).await?;
        let page = require_body(step, response)?;

        if !page.contains(LOGIN_SUCCESS_MARKER) {
            return Err(step_error(step, "login page did not report success"));
        }
        Ok(())
    }

    async fn verify(&self, http: &HttpClient) -> Result<()> {
        let step = HandshakeStep::Verify;
        let response = send(http, step, http.request(Method::GET, &self.config.post_login_url)).await?;

        if response.status() != Some(StatusCode::OK) {
            return Err(step_error(step, format!("expected 200, got {}", status_label(&response))));
        }
        if !response.has_body() {
            return Err(step_error(step, "protected page returned no body"));
        }
        Ok(())
    }
}

#[async_trait]
impl Authenticator for CasAuthenticator {
    #[instrument(skip_all, fields(username = %self.config.username))]
    async fn authenticate(&self, http: &HttpClient) -> Result<()> {
        let mut state = HandshakeState::Start;

        while let Some(step) = state.next_step() {
            debug!(%step, "CAS handshake step");
            state = match self.advance(http, state).await {
                Ok(next) => next,
                Err(err) => {
                    warn!(%step, error = %err, "CAS authentication failed");
                    return Err(err);
                }
            };
        }

        info!("CAS authentication succeeded");
        Ok(())
    }
}

async fn send(
    http: &HttpClient,
    step: HandshakeStep,
    request: reqwest::RequestBuilder,
) -> Result<ClassifiedResponse> {
    http.execute(request).await.map_err(|err| step_error(step, err.to_string()))
}

/// Body text of a response with status below 400 and a non-empty body.
fn require_body(step: HandshakeStep, response: ClassifiedResponse) -> Result<String> {
    if !response.is_success() {
        return Err(step_error(step, format!("server answered {}", status_label(&response))));
    }
    if !response.has_body() {
        return Err(step_error(step, "response has no body"));
    }
    response.as_text().map_err(|err| step_error(step, err.to_string()))
}

fn status_label(response: &ClassifiedResponse) -> String {
    response.status().map_or_else(|| "no status".to_string(), |s| s.to_string())
}

fn step_error(step: HandshakeStep, detail: impl fmt::Display) -> CmsError {
    CmsError::Authentication(format!("{step}: {detail}"))
}
