//! Persisted webhook URL management

use crate::cli::WebhookCommands;
use crate::error::CliError;
use intake_client::{validate_webhook_url, KeyValueStore, WebhookUrlSetting};

pub fn handle_webhook_command(
    action: &WebhookCommands,
    store: &dyn KeyValueStore,
) -> Result<(), CliError> {
    let mut setting = WebhookUrlSetting::load(store)?;

    match action {
        WebhookCommands::Show => {
            if setting.value().is_empty() {
                println!("No webhook URL configured");
            } else {
                println!("{}", setting.value());
            }
            if let Some(message) = setting.hint().message() {
                println!("{}", message);
            }
        }
        WebhookCommands::Set { url } => {
            validate_webhook_url(url).map_err(|e| CliError::Validation(e.to_string()))?;
            setting.update(url.trim())?;
            println!("✅ Webhook URL saved");
        }
        WebhookCommands::Clear => {
            setting.clear()?;
            println!("Webhook URL cleared");
        }
    }
    Ok(())
}
