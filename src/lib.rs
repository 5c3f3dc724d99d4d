//! recordhook: load and save a single record through two workflow webhooks.
//!
//! ```no_run
//! # async fn demo() -> Result<(), recordhook::RecordError> {
//! use recordhook::{WebhookClient, WebhookEndpoints};
//!
//! let endpoints = WebhookEndpoints::parse(
//!     "https://hooks.example/webhook/load",
//!     "https://hooks.example/webhook/save",
//! )?;
//! let client = WebhookClient::new(endpoints);
//!
//! let mut record = client.get_record_details(42).await?;
//! record["title"] = "Updated".into();
//! client.save_record(&record).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod response;

pub use client::{WebhookClient, WebhookEndpoints};
pub use error::RecordError;
pub use recordhook_commons::ErrorCategory;
