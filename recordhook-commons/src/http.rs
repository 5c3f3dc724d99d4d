//! HTTP client utilities

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5);

/// User agent sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str = concat!("recordhook/", env!("CARGO_PKG_VERSION"));

/// Connection settings shared by every webhook request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: SHORT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Create a default HTTP client with standard timeouts
pub fn create_default_client() -> Client {
    create_client(&HttpClientOptions::default())
}

/// Create an HTTP client from explicit options.
///
/// Falls back to `Client::new()`, without the configured timeouts or user
/// agent, if the TLS backend cannot be initialized with the requested settings.
pub fn create_client(options: &HttpClientOptions) -> Client {
    ClientBuilder::new()
        .user_agent(options.user_agent.as_str())
        .timeout(options.request_timeout)
        .connect_timeout(options.connect_timeout)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(
                error = %err,
                "falling back to default HTTP client; configured timeouts and user agent are not applied"
            );
            Client::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_crate_user_agent() {
        let options = HttpClientOptions::default();
        assert!(options.user_agent.starts_with("recordhook/"));
        assert_eq!(options.request_timeout, DEFAULT_TIMEOUT);
        assert_eq!(options.connect_timeout, SHORT_TIMEOUT);
    }
}
