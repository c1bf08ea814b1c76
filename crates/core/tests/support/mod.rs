//! Shared test helpers for `cmslink-core` integration tests.
//!
//! These helpers provide an in-memory connector so service tests can focus on
//! which calls are issued instead of on HTTP plumbing.

pub mod connector;
