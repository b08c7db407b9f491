//! Configuration management command implementations

use crate::app::AppContext;
use crate::cli::ConfigCommands;
use crate::config::{ensure_default_file, get_config_path, IntakeConfig};
use crate::error::CliError;
use std::path::Path;

/// Handle configuration management operations
pub fn handle_config_command(
    action: &ConfigCommands,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    match action {
        ConfigCommands::Show => show_config(config_path),
        ConfigCommands::Init => init_config(config_path),
        ConfigCommands::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(get_config_path);
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Print the effective configuration with secrets masked
fn show_config(config_path: Option<&Path>) -> Result<(), CliError> {
    let ctx = AppContext::load(config_path)?;
    println!("# {}", ctx.config_path.display());
    println!("# mode: {}", ctx.mode);
    println!("{}", render_masked(&ctx.config)?);
    Ok(())
}

fn init_config(config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    if ensure_default_file(&path)? {
        println!("✅ Created {}", path.display());
    } else {
        println!("Configuration already exists at {}", path.display());
    }
    Ok(())
}

fn render_masked(config: &IntakeConfig) -> Result<String, CliError> {
    let mut masked = config.clone();
    for env in masked.environments.values_mut() {
        env.supabase_anon_key = env.supabase_anon_key.as_deref().map(mask);
    }
    masked.identity.access_token = masked.identity.access_token.as_deref().map(mask);

    toml::to_string_pretty(&masked)
        .map_err(|e| CliError::Config(format!("Failed to render configuration: {}", e)))
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}…", visible)
}
