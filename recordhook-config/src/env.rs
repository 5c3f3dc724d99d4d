use anyhow::Result;

use crate::constants::env_vars;

/// Load environment variables from a `.env` file in the current directory or
/// any parent. A missing file is not an error.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            // Only log in verbose mode so piped JSON output stays clean
            if std::env::var(env_vars::VERBOSE).is_ok() || std::env::var("RUST_LOG").is_ok() {
                tracing::info!("Loaded environment variables from: {}", path.display());
            }
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!("Failed to load .env file: {}", e);
            Ok(())
        }
    }
}

/// Read an environment variable, treating blank values as unset.
pub(crate) fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
