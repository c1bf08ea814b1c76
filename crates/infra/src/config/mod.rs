//! Configuration loading
//!
//! Connector configuration comes from environment variables, JSON or TOML
//! files, or Java-style `.properties` files.

pub mod loader;
pub mod properties;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
pub use properties::Properties;
