//! Authenticated REST connector

mod client;

pub use client::{build_url, SessionConnector};
