use std::path::Path;

use anyhow::Result;
use recordhook_config::write_default_config;

pub fn handle_config_command(output: &Path, force: bool) -> Result<()> {
    let path = write_default_config(output, force)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}
