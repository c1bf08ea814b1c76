//! Java-style `.properties` key/value source
//!
//! Supported syntax is the subset deployments actually use: one `key=value`,
//! `key: value` or `key value` pair per line, `#` and `!` comment lines and
//! blank lines. Line continuations and unicode escapes are not supported.

use std::collections::BTreeMap;
use std::path::Path;

use cmslink_common::CommonError;
use cmslink_domain::constants::DEFAULT_TIMEOUT_SECS;
use cmslink_domain::{CasConfig, CmsError, ConnectorConfig, HttpSettings, Result};
use regex::Regex;

pub const SERVICE_URL: &str = "service.url";
pub const SHARE_SERVICE_URL: &str = "share.service.url";
pub const CAS_LOGIN_URL: &str = "cas.url.login";
pub const CAS_POST_LOGIN_URL: &str = "cas.url.postlogin";
pub const CAS_USERNAME: &str = "cas.username";
pub const CAS_PASSWORD: &str = "cas.password";
pub const HTTP_TIMEOUT_SECS: &str = "http.timeout.secs";
pub const HTTP_USER_AGENT: &str = "http.user.agent";

/// Named set of string properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `.properties` text. Later duplicates win.
    pub fn parse(contents: &str) -> Self {
        let values = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .map(split_pair)
            .collect();
        Self { values }
    }

    /// Read and parse a `.properties` file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CmsError::from(CommonError::io_path(path.display().to_string(), e.to_string()))
        })?;
        Ok(Self::parse(&contents))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value of `key`, or `Config("Missing property: <key>")`.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| CmsError::Config(format!("Missing property: {key}")))
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.values.get(key).map_or(default, String::as_str)
    }

    /// Keys matching `pattern`, in sorted order.
    pub fn keys_matching(&self, pattern: &str) -> Result<Vec<&str>> {
        let regex = Regex::new(pattern)
            .map_err(|e| CmsError::Config(format!("Invalid key pattern '{pattern}': {e}")))?;
        Ok(self.values.keys().map(String::as_str).filter(|key| regex.is_match(key)).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a connector configuration from the well-known keys.
    pub fn to_connector_config(&self) -> Result<ConnectorConfig> {
        let timeout_secs = match self.values.get(HTTP_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(HTTP_TIMEOUT_SECS, raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let mut http = HttpSettings { timeout_secs, ..HttpSettings::default() };
        if let Some(agent) = self.values.get(HTTP_USER_AGENT) {
            http.user_agent = agent.clone();
        }

        Ok(ConnectorConfig {
            service_url: self.get(SERVICE_URL)?.to_string(),
            share_service_url: self.get(SHARE_SERVICE_URL)?.to_string(),
            cas: CasConfig {
                login_url: self.get(CAS_LOGIN_URL)?.to_string(),
                post_login_url: self.get(CAS_POST_LOGIN_URL)?.to_string(),
                username: self.get(CAS_USERNAME)?.to_string(),
                password: self.get(CAS_PASSWORD)?.to_string(),
            },
            http,
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Parse a timeout in whole seconds.
pub(crate) fn parse_timeout(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| CmsError::Config(format!("Invalid value for {key}: {e}")))
}

fn split_pair(line: &str) -> (String, String) {
    let end = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace()).unwrap_or(line.len());
    let (key, rest) = line.split_at(end);
    let rest = rest.trim_start();
    let value = rest.strip_prefix(['=', ':']).map_or(rest, str::trim_start);
    (key.to_string(), value.to_string())
}
