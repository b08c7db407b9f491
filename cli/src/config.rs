use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable selecting the `[environments.<mode>]` section
pub const MODE_VAR: &str = "INTAKE_ENV";
pub const DEFAULT_MODE: &str = "development";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IntakeConfig {
    pub datastore: DatastoreConfig,
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub questionnaire: QuestionnaireConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Supabase,
    #[default]
    Sqlite,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatastoreConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "get_default_db_path")]
    pub sqlite_path: PathBuf,
    /// JSON file holding persisted settings such as the webhook URL
    #[serde(default = "get_default_settings_path")]
    pub settings_path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct IdentityConfig {
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebhookConfig {
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_webhook_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct QuestionnaireConfig {
    pub catalog_path: Option<PathBuf>,
}

fn default_webhook_timeout() -> u64 {
    30
}

impl Default for IntakeConfig {
    fn default() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(DEFAULT_MODE.to_string(), EnvironmentConfig::default());

        Self {
            datastore: DatastoreConfig {
                backend: Backend::default(),
                sqlite_path: get_default_db_path(),
                settings_path: get_default_settings_path(),
            },
            environments,
            identity: IdentityConfig::default(),
            webhook: WebhookConfig::default(),
            questionnaire: QuestionnaireConfig::default(),
        }
    }
}

impl IntakeConfig {
    /// Load from `path` (or the default location), creating a default file first if missing
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);
        ensure_default_file(&config_path)?;

        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    /// Load from an existing file plus `INTAKE_*` environment overrides
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .add_source(
                Environment::with_prefix("INTAKE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut config: IntakeConfig = builder.try_deserialize()?;
        config.datastore.sqlite_path = expand_tilde(&config.datastore.sqlite_path);
        config.datastore.settings_path = expand_tilde(&config.datastore.settings_path);
        if let Some(catalog) = &config.questionnaire.catalog_path {
            config.questionnaire.catalog_path = Some(expand_tilde(catalog));
        }

        Ok(config)
    }

    /// Section for `mode`, falling back to `development`
    pub fn environment(&self, mode: &str) -> Option<&EnvironmentConfig> {
        if let Some(env) = self.environments.get(mode) {
            return Some(env);
        }

        if mode != DEFAULT_MODE {
            if mode == "production" {
                info!("No [environments.production] section, using development settings");
            } else {
                warn!(mode, "Unknown environment mode, using development settings");
            }
        }
        self.environments.get(DEFAULT_MODE)
    }
}

/// Mode from `INTAKE_ENV`, default `development`
pub fn current_mode() -> String {
    std::env::var(MODE_VAR)
        .ok()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MODE.to_string())
}

/// Write the commented default file if nothing exists at `config_path`. Returns true when written.
pub fn ensure_default_file(config_path: &Path) -> Result<bool, ConfigError> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    std::fs::write(
        config_path,
        default_config_file(&get_default_db_path(), &get_default_settings_path()),
    )
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))?;
    info!(path = %config_path.display(), "Created default configuration");
    Ok(true)
}

/// TOML string literal for a path, escaped so Windows separators survive
fn toml_path(path: &Path) -> String {
    toml::Value::String(path.display().to_string()).to_string()
}

fn default_config_file(db_path: &Path, settings_path: &Path) -> String {
    format!(
        r#"
[datastore]
backend = "sqlite"  # Options: sqlite, supabase
sqlite_path = {}
settings_path = {}

[environments.development]
# supabase_url = "https://your-project.supabase.co"
# supabase_anon_key = "your-anon-key"

# [environments.production]
# supabase_url = "https://your-project.supabase.co"
# supabase_anon_key = "your-anon-key"

[identity]
# access_token = "supabase-user-jwt"
# user_id = "local-user"
# email = "you@example.com"
# full_name = "Your Name"

[webhook]
timeout_secs = 30

[questionnaire]
# catalog_path = "~/questions.toml"
"#,
        toml_path(db_path),
        toml_path(settings_path)
    )
}

fn expand_tilde(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = home::home_dir() {
            let path_str = path.to_string_lossy();
            let expanded = path_str.replacen('~', &home.to_string_lossy(), 1);
            return PathBuf::from(expanded);
        }
    }
    path.to_path_buf()
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("project-intake/intake.toml")
    } else {
        PathBuf::from("intake.toml")
    }
}

fn get_default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("project-intake/intake.db")
    } else {
        PathBuf::from("intake.db")
    }
}

fn get_default_settings_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("project-intake/settings.json")
    } else {
        PathBuf::from("intake-settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_is_created_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("intake.toml");

        assert!(ensure_default_file(&path).unwrap());
        assert!(!ensure_default_file(&path).unwrap());

        let config = IntakeConfig::load_from(&path).unwrap();
        assert_eq!(config.datastore.backend, Backend::Sqlite);
        assert_eq!(config.webhook.timeout_secs, 30);
        assert!(config.identity.user_id.is_none());
        assert!(config.environments.contains_key("development"));
    }

    #[test]
    fn test_default_file_keeps_windows_paths_intact() {
        let db_path = Path::new(r"C:\Users\ada\AppData\Local\project-intake\intake.db");
        let settings_path = Path::new(r"C:\Users\ada\settings.json");

        let content = default_config_file(db_path, settings_path);
        let parsed: toml::Value = toml::from_str(&content).unwrap();

        assert_eq!(
            parsed["datastore"]["sqlite_path"].as_str(),
            Some(r"C:\Users\ada\AppData\Local\project-intake\intake.db")
        );
        assert_eq!(
            parsed["datastore"]["settings_path"].as_str(),
            Some(r"C:\Users\ada\settings.json")
        );
    }

    #[test]
    fn test_load_supabase_environments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intake.toml");
        std::fs::write(
            &path,
            r#"
[datastore]
backend = "supabase"
sqlite_path = "~/intake.db"

[environments.development]
supabase_url = "http://localhost:54321"
supabase_anon_key = "dev-key"

[environments.test]
supabase_url = "http://test.local"
supabase_anon_key = "test-key"

[identity]
access_token = "jwt"
"#,
        )
        .unwrap();

        let config = IntakeConfig::load_from(&path).unwrap();
        assert_eq!(config.datastore.backend, Backend::Supabase);
        assert!(!config.datastore.sqlite_path.starts_with("~"));
        assert_eq!(config.identity.access_token.as_deref(), Some("jwt"));

        let test_env = config.environment("test").unwrap();
        assert_eq!(test_env.supabase_anon_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_production_and_unknown_modes_fall_back_to_development() {
        let config = IntakeConfig {
            environments: [(
                "development".to_string(),
                EnvironmentConfig {
                    supabase_url: Some("http://localhost:54321".to_string()),
                    supabase_anon_key: Some("dev-key".to_string()),
                },
            )]
            .into_iter()
            .collect(),
            ..Default::default()
        };

        let development = config.environment("development").unwrap();
        assert_eq!(config.environment("production"), Some(development));
        assert_eq!(config.environment("staging"), Some(development));
    }

    #[test]
    fn test_missing_development_section() {
        let config = IntakeConfig {
            environments: BTreeMap::new(),
            ..Default::default()
        };
        assert_eq!(config.environment("production"), None);
    }
}
