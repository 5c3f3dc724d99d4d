//! Error categorization for webhook calls.
//!
//! Every failure surfaced by the client maps onto one `ErrorCategory` so the
//! CLI and embedding applications can render consistent labels and decide for
//! themselves whether a retry makes sense. The client itself never retries.

use std::borrow::Cow;
use std::fmt;

use reqwest::StatusCode;

/// Canonical error category for webhook failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCategory {
    // === Retryable (Transient) ===
    /// Network connectivity issue (connection reset, DNS failure, etc.)
    Network,
    /// Request timed out
    Timeout,
    /// Rate limit exceeded (HTTP 429)
    RateLimit,
    /// Webhook host temporarily unavailable (HTTP 5xx)
    ServiceUnavailable,

    // === Non-Retryable (Permanent) ===
    /// HTTP 401/403 from the webhook host
    Authentication,
    /// Rejected request payload or malformed endpoint (HTTP 400/422)
    InvalidParameters,
    /// Webhook or record does not exist (HTTP 404/410)
    ResourceNotFound,
    /// Response could not be decoded
    InvalidResponse,
    /// Catch-all for unclassified failures
    ExecutionError,
}

impl ErrorCategory {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => ErrorCategory::Authentication,
            404 | 410 => ErrorCategory::ResourceNotFound,
            408 => ErrorCategory::Timeout,
            429 => ErrorCategory::RateLimit,
            400 | 405 | 413 | 415 | 422 => ErrorCategory::InvalidParameters,
            500..=599 => ErrorCategory::ServiceUnavailable,
            _ => ErrorCategory::ExecutionError,
        }
    }

    /// Classify a transport-level `reqwest` failure.
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            ErrorCategory::Timeout
        } else if error.is_connect() || error.is_request() {
            ErrorCategory::Network
        } else if error.is_decode() || error.is_body() {
            ErrorCategory::InvalidResponse
        } else if let Some(status) = error.status() {
            Self::from_status(status)
        } else {
            ErrorCategory::Network
        }
    }

    /// Whether this error category is safe to retry.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::RateLimit
                | ErrorCategory::ServiceUnavailable
        )
    }

    /// Get recovery suggestions for this error category.
    pub fn recovery_suggestions(&self) -> Vec<Cow<'static, str>> {
        match self {
            ErrorCategory::Network => vec![
                Cow::Borrowed("Check network connectivity"),
                Cow::Borrowed("Verify the webhook host name in the configured URL"),
            ],
            ErrorCategory::Timeout => vec![
                Cow::Borrowed("Increase http.request_timeout_seconds if the workflow is slow"),
                Cow::Borrowed("Retry the operation after a brief delay"),
            ],
            ErrorCategory::RateLimit => vec![
                Cow::Borrowed("Wait before retrying the request"),
                Cow::Borrowed("Reduce request frequency"),
            ],
            ErrorCategory::ServiceUnavailable => vec![
                Cow::Borrowed("The workflow host is temporarily unavailable"),
                Cow::Borrowed("Check that the workflow is active"),
            ],
            ErrorCategory::Authentication => vec![
                Cow::Borrowed("Verify the webhook's authentication settings"),
            ],
            ErrorCategory::InvalidParameters => vec![
                Cow::Borrowed("Check the record payload against what the workflow expects"),
                Cow::Borrowed("Verify the configured endpoint URLs"),
            ],
            ErrorCategory::ResourceNotFound => vec![
                Cow::Borrowed("Verify the record id"),
                Cow::Borrowed("Test-mode webhooks only listen while the editor is waiting for a call"),
            ],
            ErrorCategory::InvalidResponse => vec![Cow::Borrowed(
                "Make sure the workflow responds with a JSON body",
            )],
            ErrorCategory::ExecutionError => {
                vec![Cow::Borrowed("Review error details for specific issues")]
            }
        }
    }

    /// Get a concise, user-friendly label for this error category.
    pub const fn user_label(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network error",
            ErrorCategory::Timeout => "Request timed out",
            ErrorCategory::RateLimit => "Rate limit exceeded",
            ErrorCategory::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCategory::Authentication => "Authentication failed",
            ErrorCategory::InvalidParameters => "Invalid request",
            ErrorCategory::ResourceNotFound => "Not found",
            ErrorCategory::InvalidResponse => "Invalid response",
            ErrorCategory::ExecutionError => "Request failed",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_label())
    }
}
