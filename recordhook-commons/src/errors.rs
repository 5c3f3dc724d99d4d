use std::borrow::Cow;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use anyhow::{Error, Result};

/// Formats an error into a user-facing description so the CLI and embedding
/// applications render failures the same way.
pub trait ErrorFormatter: Send + Sync {
    /// Render the error into a user-facing string.
    fn format_error(&self, error: &Error) -> Cow<'_, str>;
}

/// Reports non-fatal errors to an observability backend.
pub trait ErrorReporter: Send + Sync {
    /// Capture the provided error for later inspection.
    fn capture(&self, error: &Error) -> Result<()>;

    /// Convenience helper to capture a simple message.
    fn capture_message(&self, message: impl Into<Cow<'static, str>>) -> Result<()>
    where
        Self: Sized,
    {
        let message: Cow<'static, str> = message.into();
        self.capture(&Error::msg(message))
    }
}

/// Render an error and its `source()` chain as `outer: cause: root`.
///
/// Sources whose message is already part of the previous layer (as with
/// `#[error("...: {0}")]` wrappers) are skipped.
pub fn error_chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut previous = message.clone();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !previous.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        previous = text;
        source = cause.source();
    }
    message
}

/// Error reporting implementation that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopErrorReporter;

impl ErrorReporter for NoopErrorReporter {
    fn capture(&self, _error: &Error) -> Result<()> {
        Ok(())
    }
}

/// Keeps captured errors in memory. Cloned handles share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryErrorReporter {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemoryErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every captured error message, oldest first.
    pub fn take(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl ErrorReporter for MemoryErrorReporter {
    fn capture(&self, error: &Error) -> Result<()> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("error reporter buffer poisoned"))?;
        guard.push(format!("{error:#}"));
        Ok(())
    }
}

/// Default formatter that surfaces the error's display output, including the
/// context chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayErrorFormatter;

impl ErrorFormatter for DisplayErrorFormatter {
    fn format_error(&self, error: &Error) -> Cow<'_, str> {
        Cow::Owned(format!("{error:#}"))
    }
}
