//! Group and site membership

pub mod service;

pub use service::MembershipService;
