//! Shared building blocks for the recordhook client: HTTP client
//! construction, error categorization, and pluggable error reporting.

pub mod error_category;
pub mod errors;
pub mod http;

pub use error_category::ErrorCategory;
pub use errors::{
    DisplayErrorFormatter, ErrorFormatter, ErrorReporter, MemoryErrorReporter, NoopErrorReporter,
    error_chain_message,
};
pub use http::{HttpClientOptions, create_client, create_default_client};
