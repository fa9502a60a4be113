//! # Provider Configuration
//!
//! Configuration is read once at startup, from an optional TOML file and the
//! `OKTA_*` environment variables (environment wins), and validated into a
//! [`ResolvedConfig`]. Nothing downstream looks at raw strings again.
//!
//! ```toml
//! org_name = "dev-123456"
//! base_url = "okta.com"          # default
//! api_token = "00abc..."
//! request_timeout_secs = 30      # default
//! lock_timeout_secs = 120        # optional, unbounded when absent
//! # endpoint = "http://127.0.0.1:8080"   # full override, takes precedence over org_name
//! ```

use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const ENV_ORG_NAME: &str = "OKTA_ORG_NAME";
pub const ENV_BASE_URL: &str = "OKTA_BASE_URL";
pub const ENV_API_TOKEN: &str = "OKTA_API_TOKEN";
pub const ENV_ENDPOINT: &str = "OKTA_ENDPOINT";

const DEFAULT_BASE_URL: &str = "okta.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Raw provider settings as written by the user.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_token: Option<SecretString>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub lock_timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            org_name: None,
            base_url: default_base_url(),
            endpoint: None,
            api_token: None,
            request_timeout_secs: default_request_timeout_secs(),
            lock_timeout_secs: None,
        }
    }
}

/// Validated settings.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub endpoint: Url,
    pub api_token: SecretString,
    pub request_timeout: Duration,
    pub lock_timeout: Option<Duration>,
}

impl ProviderConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Loads the file if given, applies the process environment and validates.
    pub fn load(path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok()).resolve()
    }

    /// Overrides settings with values found through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(org_name) = lookup(ENV_ORG_NAME) {
            self.org_name = Some(org_name);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = Some(endpoint);
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api_token = Some(SecretString::from(token));
        }
        self
    }

    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let endpoint = match (&self.endpoint, &self.org_name) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Some(org_name)) => format!("https://{}.{}", org_name, self.base_url),
            (None, None) => return Err(ConfigError::Missing("org_name")),
        };
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| ConfigError::Invalid(format!("endpoint {:?}: {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "endpoint {} must use http or https",
                endpoint
            )));
        }

        let api_token = self.api_token.ok_or(ConfigError::Missing("api_token"))?;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(ResolvedConfig {
            endpoint,
            api_token,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            lock_timeout: self.lock_timeout_secs.map(Duration::from_secs),
        })
    }
}
