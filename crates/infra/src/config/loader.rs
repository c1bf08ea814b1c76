//! Configuration loader
//!
//! Loads connector configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file into the environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON, TOML and `.properties` formats
//!
//! ## Environment Variables
//! - `CMSLINK_SERVICE_URL`: Repository REST API base URL
//! - `CMSLINK_SHARE_SERVICE_URL`: Share REST API base URL
//! - `CMSLINK_CAS_LOGIN_URL`: CAS login form URL
//! - `CMSLINK_CAS_POSTLOGIN_URL`: CAS-protected page fetched after login
//! - `CMSLINK_CAS_USERNAME`: CAS username
//! - `CMSLINK_CAS_PASSWORD`: CAS password
//! - `CMSLINK_HTTP_TIMEOUT_SECS`: Request timeout in seconds (optional)
//! - `CMSLINK_HTTP_USER_AGENT`: User agent (optional)
//!
//! ## File Locations
//! The loader probes the following names, first in the current working
//! directory and its two parents, then next to the executable:
//! `cmslink.properties`, `cmslink.toml`, `cmslink.json`, `config.toml`,
//! `config.json`.

use std::path::{Path, PathBuf};

use cmslink_common::CommonError;
use cmslink_domain::{CasConfig, CmsError, ConnectorConfig, HttpSettings, Result};

use super::properties::{parse_timeout, Properties};

const CONFIG_FILE_NAMES: [&str; 5] =
    ["cmslink.properties", "cmslink.toml", "cmslink.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CmsError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or invalid
pub fn load() -> Result<ConnectorConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `CmsError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<ConnectorConfig> {
    let timeout_secs = match std::env::var("CMSLINK_HTTP_TIMEOUT_SECS") {
        Ok(raw) => parse_timeout("CMSLINK_HTTP_TIMEOUT_SECS", &raw)?,
        Err(_) => HttpSettings::default().timeout_secs,
    };
    let mut http = HttpSettings { timeout_secs, ..HttpSettings::default() };
    if let Ok(agent) = std::env::var("CMSLINK_HTTP_USER_AGENT") {
        http.user_agent = agent;
    }

    let config = ConnectorConfig {
        service_url: env_var("CMSLINK_SERVICE_URL")?,
        share_service_url: env_var("CMSLINK_SHARE_SERVICE_URL")?,
        cas: CasConfig {
            login_url: env_var("CMSLINK_CAS_LOGIN_URL")?,
            post_login_url: env_var("CMSLINK_CAS_POSTLOGIN_URL")?,
            username: env_var("CMSLINK_CAS_USERNAME")?,
            password: env_var("CMSLINK_CAS_PASSWORD")?,
        },
        http,
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files. The
/// format is detected by file extension.
///
/// # Errors
/// Returns `CmsError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ConnectorConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CmsError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CmsError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        CmsError::from(CommonError::io_path(config_path.display().to_string(), e.to_string()))
    })?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json`, `.toml` or `.properties`).
fn parse_config(contents: &str, path: &Path) -> Result<ConnectorConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| CommonError::from(e).into()),
        "json" => serde_json::from_str(contents).map_err(|e| CommonError::from(e).into()),
        "properties" => Properties::parse(contents).to_connector_config(),
        _ => Err(CmsError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `CmsError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CmsError::Config(format!("Missing required environment variable: {key}")))
}
