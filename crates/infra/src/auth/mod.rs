//! Session authentication
//!
//! An [`Authenticator`] runs once against a fresh [`HttpClient`] and leaves
//! whatever session state the server hands out in the client's cookie jar.

mod cas;
mod ticket;

use async_trait::async_trait;
use cmslink_domain::Result;

use crate::http::HttpClient;

pub use cas::{CasAuthenticator, HandshakeStep};
pub use ticket::{extract_login_ticket, LoginTicket};

/// Trait for establishing an authenticated session
///
/// This trait allows dependency injection and testing with mock
/// authenticators.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate the session held by `http`.
    ///
    /// Any failure is returned as `CmsError::Authentication`.
    async fn authenticate(&self, http: &HttpClient) -> Result<()>;
}
