use recordhook_commons::ErrorCategory;
use reqwest::StatusCode;
use serde_json::Value;

/// Errors returned by [`WebhookClient`](crate::WebhookClient).
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The webhook answered with a non-success status.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        /// Error payload as returned by the webhook, or `{"message": <text>}`
        /// when the body was not JSON.
        body: Value,
    },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response whose body was not JSON.
    #[error("failed to decode response body (HTTP {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// The response was JSON but did not match the requested type.
    #[error("response did not match the expected record shape: {0}")]
    UnexpectedShape(#[source] serde_json::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid webhook endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl RecordError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecordError::Api { status, .. } => ErrorCategory::from_status(*status),
            RecordError::Network(err) => ErrorCategory::from_reqwest(err),
            RecordError::Decode { .. } | RecordError::UnexpectedShape(_) => {
                ErrorCategory::InvalidResponse
            }
            RecordError::Serialize(_) | RecordError::InvalidEndpoint { .. } => {
                ErrorCategory::InvalidParameters
            }
        }
    }

    /// HTTP status of the failed response, when the webhook answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RecordError::Api { status, .. } | RecordError::Decode { status, .. } => Some(*status),
            RecordError::Network(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_displays_webhook_message() {
        let err = RecordError::Api {
            status: StatusCode::NOT_FOUND,
            message: "No item found".to_string(),
            body: json!({"message": "No item found"}),
        };
        assert_eq!(err.to_string(), "No item found");
        assert_eq!(err.category(), ErrorCategory::ResourceNotFound);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(!err.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = RecordError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "HTTP error! status: 503".to_string(),
            body: Value::Null,
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn decode_errors_are_invalid_responses() {
        let source = serde_json::from_str::<Value>("").unwrap_err();
        let err = RecordError::Decode {
            status: StatusCode::OK,
            source,
        };
        assert_eq!(err.category(), ErrorCategory::InvalidResponse);
        assert!(err.to_string().contains("HTTP 200 OK"));
    }
}
