//! # cmslink Core
//!
//! Transport-independent logic of the client.
//!
//! This crate contains:
//! - The `RestConnector` port every remote call goes through
//! - Membership reconciliation for groups and sites
//! - The service catalog (people, records constraints, security model)
//!
//! ## Architecture Principles
//! - Only depends on `cmslink-common` and `cmslink-domain`
//! - No HTTP, no configuration loading
//! - All remote access via the `RestConnector` trait

pub mod catalog;
pub mod connector_ports;
pub mod membership;

pub use catalog::{PeopleService, RecordsService, SecurityModelService};
pub use connector_ports::RestConnector;
pub use membership::MembershipService;
