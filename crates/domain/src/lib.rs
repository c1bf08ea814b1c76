//! # cmslink Domain
//!
//! Domain types for the cmslink REST client.
//!
//! This crate contains:
//! - The `CmsError` taxonomy and `Result` alias
//! - Connector configuration structures
//! - Membership and service catalog value types
//! - Protocol constants and service paths
//!
//! ## Architecture
//! - Depends only on `cmslink-common` for error classification
//! - No I/O, no HTTP types

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
