//! HTTP client for the record webhooks.
//!
//! [`WebhookClient`] issues exactly one request per call. Reads are a `GET`
//! against the load webhook with the record id in the query string; writes
//! `POST` the whole record as JSON to the save webhook. Non-success responses
//! and transport failures are logged, handed to the configured
//! [`ErrorReporter`], and returned to the caller. Nothing is retried.

use std::fmt;
use std::sync::Arc;

use recordhook_commons::{ErrorReporter, NoopErrorReporter, error_chain_message};
use recordhook_config::{EndpointsConfig, RecordHookConfig};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::RecordError;
use crate::response;

/// Resolved URLs of the load and save webhooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoints {
    pub load_url: Url,
    pub save_url: Url,
}

impl WebhookEndpoints {
    pub fn new(load_url: Url, save_url: Url) -> Self {
        Self { load_url, save_url }
    }

    /// Parse both endpoints from raw strings.
    pub fn parse(load_url: &str, save_url: &str) -> Result<Self, RecordError> {
        Ok(Self::new(parse_url(load_url)?, parse_url(save_url)?))
    }

    pub fn from_config(config: &EndpointsConfig) -> Result<Self, RecordError> {
        Self::parse(&config.load_url, &config.save_url)
    }

    /// URL that loads the record with `id`. Existing query pairs on the load
    /// URL are preserved and the id is percent-encoded.
    pub fn record_url(&self, id: &str) -> Url {
        let mut url = self.load_url.clone();
        url.query_pairs_mut().append_pair("id", id);
        url
    }
}

fn parse_url(raw: &str) -> Result<Url, RecordError> {
    let url = Url::parse(raw.trim()).map_err(|err| RecordError::InvalidEndpoint {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RecordError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Client for reading and writing a single record through two webhooks.
#[derive(Clone)]
pub struct WebhookClient {
    http: Client,
    endpoints: WebhookEndpoints,
    reporter: Arc<dyn ErrorReporter>,
}

impl fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl WebhookClient {
    /// Create a client with default HTTP settings.
    pub fn new(endpoints: WebhookEndpoints) -> Self {
        Self {
            http: recordhook_commons::create_default_client(),
            endpoints,
            reporter: Arc::new(NoopErrorReporter),
        }
    }

    /// Create a client from a loaded configuration.
    pub fn from_config(config: &RecordHookConfig) -> Result<Self, RecordError> {
        let endpoints = WebhookEndpoints::from_config(&config.endpoints)?;
        let http = recordhook_commons::create_client(&config.http.client_options());
        Ok(Self::new(endpoints).with_http_client(http))
    }

    /// Replace the underlying `reqwest` client.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Forward request failures to `reporter` in addition to logging them.
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn endpoints(&self) -> &WebhookEndpoints {
        &self.endpoints
    }

    /// Fetch the record with `id` from the load webhook.
    pub async fn get_record_details(&self, id: impl fmt::Display) -> Result<Value, RecordError> {
        let url = self.endpoints.record_url(&id.to_string());
        tracing::debug!(%url, "loading record");
        self.fetch_data(self.http.get(url)).await
    }

    /// Fetch the record with `id` and deserialize it into `T`.
    pub async fn get_record_as<T>(&self, id: impl fmt::Display) -> Result<T, RecordError>
    where
        T: DeserializeOwned,
    {
        let data = self.get_record_details(id).await?;
        serde_json::from_value(data).map_err(RecordError::UnexpectedShape)
    }

    /// Send the whole record to the save webhook.
    ///
    /// The save URL carries no id; a workflow that updates existing records
    /// must find the id inside the body.
    pub async fn save_record<T>(&self, data: &T) -> Result<Value, RecordError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(data).map_err(RecordError::Serialize)?;
        tracing::debug!(url = %self.endpoints.save_url, bytes = body.len(), "saving record");
        let request = self
            .http
            .post(self.endpoints.save_url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body);
        self.fetch_data(request).await
    }

    async fn fetch_data(&self, request: RequestBuilder) -> Result<Value, RecordError> {
        match self.execute(request).await {
            Ok(data) => Ok(data),
            Err(err) => {
                let message = error_chain_message(&err);
                tracing::error!(category = %err.category(), "fetch error: {message}");
                if let Err(report_err) = self.reporter.capture(&anyhow::Error::msg(message)) {
                    tracing::warn!("failed to report fetch error: {report_err:#}");
                }
                Err(err)
            }
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, RecordError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(err) => {
                    tracing::debug!(
                        status = status.as_u16(),
                        "failed to read error response body: {}",
                        error_chain_message(&err)
                    );
                    String::new()
                }
            };
            let error_data = response::error_data_from_body(&text);
            tracing::error!(status = status.as_u16(), body = %error_data, "API error response");
            return Err(RecordError::Api {
                status,
                message: response::error_message(&error_data, status),
                body: error_data,
            });
        }

        let bytes = response.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)
            .map_err(|source| RecordError::Decode { status, source })?;
        Ok(response::unwrap_singleton(data))
    }
}
