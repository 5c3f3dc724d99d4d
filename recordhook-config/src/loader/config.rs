use anyhow::{Context, Result, bail, ensure};
use recordhook_commons::HttpClientOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::constants;
use crate::debug::DebugConfig;

/// Webhook endpoints for loading and saving records
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EndpointsConfig {
    /// GET endpoint; the record id is appended as `?id=<id>`
    #[serde(default = "EndpointsConfig::default_load_url")]
    pub load_url: String,

    /// POST endpoint receiving the full record as JSON
    #[serde(default = "EndpointsConfig::default_save_url")]
    pub save_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            load_url: Self::default_load_url(),
            save_url: Self::default_save_url(),
        }
    }
}

impl EndpointsConfig {
    fn default_load_url() -> String {
        constants::DEFAULT_LOAD_URL.to_string()
    }

    fn default_save_url() -> String {
        constants::DEFAULT_SAVE_URL.to_string()
    }

    pub fn parsed_load_url(&self) -> Result<Url> {
        parse_endpoint("endpoints.load_url", &self.load_url)
    }

    pub fn parsed_save_url(&self) -> Result<Url> {
        parse_endpoint("endpoints.save_url", &self.save_url)
    }
}

fn parse_endpoint(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("{field} is not a valid URL: {raw}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("{field} must use http or https, got '{other}'"),
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "HttpConfig::default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// TCP/TLS connect timeout in seconds
    #[serde(default = "HttpConfig::default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(default = "HttpConfig::default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: Self::default_request_timeout_seconds(),
            connect_timeout_seconds: Self::default_connect_timeout_seconds(),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl HttpConfig {
    const fn default_request_timeout_seconds() -> u64 {
        constants::DEFAULT_REQUEST_TIMEOUT_SECS
    }

    const fn default_connect_timeout_seconds() -> u64 {
        constants::DEFAULT_CONNECT_TIMEOUT_SECS
    }

    fn default_user_agent() -> String {
        recordhook_commons::http::DEFAULT_USER_AGENT.to_string()
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.request_timeout_seconds > 0,
            "http.request_timeout_seconds must be greater than zero"
        );
        ensure!(
            self.connect_timeout_seconds > 0,
            "http.connect_timeout_seconds must be greater than zero"
        );
        ensure!(
            self.connect_timeout_seconds <= self.request_timeout_seconds,
            "http.connect_timeout_seconds ({}) must not exceed http.request_timeout_seconds ({})",
            self.connect_timeout_seconds,
            self.request_timeout_seconds
        );
        ensure!(
            !self.user_agent.trim().is_empty(),
            "http.user_agent must not be empty"
        );
        Ok(())
    }

    pub fn client_options(&self) -> HttpClientOptions {
        HttpClientOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Main configuration structure for recordhook
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RecordHookConfig {
    /// Webhook endpoints
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Debug and tracing
    #[serde(default)]
    pub debug: DebugConfig,
}

impl RecordHookConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse recordhook configuration")
    }

    pub fn validate(&self) -> Result<()> {
        self.endpoints.parsed_load_url()?;
        self.endpoints.parsed_save_url()?;
        self.http.validate()
    }
}
