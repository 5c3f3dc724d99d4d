use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::loader::RecordHookConfig;

const HEADER: &str = "\
# recordhook configuration
#
# Layers, lowest to highest precedence:
#   ~/.recordhook/recordhook.toml, ./recordhook.toml,
#   RECORDHOOK_LOAD_URL / RECORDHOOK_SAVE_URL, command-line flags.

";

/// Render the default configuration as commented TOML.
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&RecordHookConfig::default())
        .context("Failed to serialize default configuration")?;
    Ok(format!("{HEADER}{body}"))
}

/// Write the default configuration to `path`, creating parent directories.
/// Existing files are left untouched unless `force` is set.
pub fn write_default_config(path: impl AsRef<Path>, force: bool) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.exists() && !force {
        bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let contents = default_config_toml()?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default configuration");
    Ok(path.to_path_buf())
}
