//! # cmslink Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The cookie-holding HTTP transport and response classification
//! - CAS single sign-on
//! - The session connector implementing `cmslink_core::RestConnector`
//! - Configuration loading and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `cmslink-core`
//! - Contains all "impure" code (network, files, environment)

pub mod auth;
pub mod config;
pub mod connector;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use auth::{Authenticator, CasAuthenticator};
pub use connector::SessionConnector;
pub use errors::InfraError;
pub use http::{ClassifiedResponse, HttpClient};
pub use observability::{init_logging, LogFormat};
