use anyhow::{Context, Result};
use recordhook::WebhookClient;
use recordhook_config::RecordHookConfig;

use super::print_json;

pub async fn handle_get_command(config: &RecordHookConfig, id: &str, compact: bool) -> Result<()> {
    let client = WebhookClient::from_config(config)?;
    let record = client
        .get_record_details(id)
        .await
        .with_context(|| format!("Failed to load record {id}"))?;
    print_json(&record, compact)
}
