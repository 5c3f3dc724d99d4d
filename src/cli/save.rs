use std::path::Path;

use anyhow::{Context, Result};
use recordhook::WebhookClient;
use recordhook_config::RecordHookConfig;
use serde_json::Value;
use tokio::io::AsyncReadExt;

use super::print_json;

pub async fn handle_save_command(
    config: &RecordHookConfig,
    file: Option<&Path>,
    compact: bool,
) -> Result<()> {
    let raw = read_record_input(file).await?;
    let record: Value = serde_json::from_str(&raw).context("Record input is not valid JSON")?;

    let client = WebhookClient::from_config(config)?;
    let response = client
        .save_record(&record)
        .await
        .context("Failed to save record")?;
    print_json(&response, compact)
}

async fn read_record_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read record from {}", path.display())),
        _ => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read record from stdin")?;
            Ok(buffer)
        }
    }
}
