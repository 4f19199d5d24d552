//! Client configuration
//!
//! `ClientConfig` holds the credentials plus the handful of knobs the client
//! exposes. It can be built in code or loaded from YAML:
//!
//! ```yaml
//! user_id: "adf397fe8374811eaacee52540025c377"
//! token: "your-api-token"
//! base_url: "https://afdian.com/api/open"   # optional
//! timeout_secs: 30                          # optional
//! max_pages: 10000                          # optional
//! stop_condition: empty_page                # or total_pages
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::pagination::{StopCondition, DEFAULT_MAX_PAGES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://afdian.com/api/open";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::AfdianClient`]
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Creator's user ID
    #[serde(default)]
    pub user_id: String,

    /// Secret API token
    #[serde(default)]
    pub token: String,

    /// API root; endpoint paths are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Ceiling on pages fetched by `get_all_*`
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Extra stop condition for `get_all_*`
    #[serde(default)]
    pub stop_condition: StopCondition,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            token: String::new(),
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            max_pages: DEFAULT_MAX_PAGES,
            stop_condition: StopCondition::default(),
        }
    }
}

impl ClientConfig {
    /// Config with the given credentials and defaults for everything else
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Set the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout in seconds
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }

    /// Check that the config can be used to make requests
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::missing_field("user_id"));
        }
        if self.token.trim().is_empty() {
            return Err(Error::missing_field("token"));
        }

        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }
        if self.max_pages == 0 {
            return Err(Error::config("max_pages must be greater than 0"));
        }
        Ok(())
    }

    /// Credentials for the signer
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.user_id, &self.token)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Transport settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder().timeout(self.timeout());
        match &self.user_agent {
            Some(agent) => builder.user_agent(agent).build(),
            None => builder.build(),
        }
    }

    /// `base_url` joined with an endpoint path
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_pages", &self.max_pages)
            .field("stop_condition", &self.stop_condition)
            .finish()
    }
}
