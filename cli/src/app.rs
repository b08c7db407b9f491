//! Builds the workflow and client pieces from the loaded configuration

use crate::config::{current_mode, Backend, EnvironmentConfig, IntakeConfig};
use crate::error::CliError;
use intake_client::{
    FileKeyValueStore, IdentityProvider, ProjectStore, SqliteProjectStore, StaticIdentity,
    SubmissionCoordinator, SupabaseConfig, SupabaseIdentity, SupabaseProjectStore, WebhookClient,
};
use intake_workflow::QuestionCatalog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct AppContext {
    pub config: IntakeConfig,
    pub config_path: PathBuf,
    pub mode: String,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>) -> Result<Self, CliError> {
        let (config, config_path) = IntakeConfig::load(config_path)?;
        let mode = current_mode();
        debug!(path = %config_path.display(), mode = %mode, "Loaded configuration");

        Ok(Self::new(config, config_path, mode))
    }

    pub fn new(config: IntakeConfig, config_path: PathBuf, mode: String) -> Self {
        Self {
            config,
            config_path,
            mode,
        }
    }

    /// Custom catalog from `[questionnaire] catalog_path`, or the built-in one
    pub fn catalog(&self) -> Result<QuestionCatalog, CliError> {
        match &self.config.questionnaire.catalog_path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    CliError::Config(format!(
                        "Failed to read question catalog {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let catalog = QuestionCatalog::from_toml_str(&content)?;
                info!(path = %path.display(), questions = catalog.len(), "Loaded custom catalog");
                Ok(catalog)
            }
            None => Ok(QuestionCatalog::default()),
        }
    }

    pub fn settings_store(&self) -> FileKeyValueStore {
        FileKeyValueStore::new(&self.config.datastore.settings_path)
    }

    pub fn project_store(&self) -> Result<Arc<dyn ProjectStore>, CliError> {
        match self.config.datastore.backend {
            Backend::Sqlite => {
                let store = SqliteProjectStore::open(&self.config.datastore.sqlite_path)?;
                Ok(Arc::new(store))
            }
            Backend::Supabase => {
                let store = SupabaseProjectStore::new(self.supabase_config()?)?;
                Ok(Arc::new(store))
            }
        }
    }

    /// Supabase session when an access token is configured, else the static `[identity]`
    pub fn identity_provider(&self) -> Result<Box<dyn IdentityProvider>, CliError> {
        let identity = &self.config.identity;

        if identity.access_token.is_some() {
            return Ok(Box::new(SupabaseIdentity::new(self.supabase_config()?)?));
        }

        match &identity.user_id {
            Some(user_id) => {
                let provider = StaticIdentity::new(user_id.clone(), identity.email.clone());
                Ok(Box::new(match &identity.full_name {
                    Some(name) => provider.with_full_name(name.clone()),
                    None => provider,
                }))
            }
            None => Ok(Box::new(StaticIdentity::anonymous())),
        }
    }

    pub fn coordinator(&self) -> Result<SubmissionCoordinator, CliError> {
        let webhook =
            WebhookClient::with_timeout(Duration::from_secs(self.config.webhook.timeout_secs))
                .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(SubmissionCoordinator::new(self.project_store()?, webhook))
    }

    fn supabase_config(&self) -> Result<SupabaseConfig, CliError> {
        let env = self
            .config
            .environment(&self.mode)
            .cloned()
            .unwrap_or_default();

        let EnvironmentConfig {
            supabase_url: Some(url),
            supabase_anon_key: Some(anon_key),
        } = env
        else {
            return Err(CliError::Config(format!(
                "supabase_url and supabase_anon_key must be set in [environments.{}] or [environments.development]",
                self.mode
            )));
        };

        let mut config = SupabaseConfig::new(url, anon_key)
            .with_timeout(Duration::from_secs(self.config.webhook.timeout_secs));
        if let Some(token) = &self.config.identity.access_token {
            config = config.with_access_token(token.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentityConfig;

    fn context(config: IntakeConfig) -> AppContext {
        AppContext::new(config, PathBuf::from("intake.toml"), "development".to_string())
    }

    #[tokio::test]
    async fn test_static_identity_from_config() {
        let ctx = context(IntakeConfig {
            identity: IdentityConfig {
                user_id: Some("local-user".to_string()),
                email: Some("me@example.com".to_string()),
                full_name: Some("Me".to_string()),
                access_token: None,
            },
            ..Default::default()
        });

        let provider = ctx.identity_provider().unwrap();
        let user = intake_client::resolve_user(provider.as_ref()).await.unwrap();
        assert_eq!(user.identity.id, "local-user");
        assert_eq!(user.full_name(), Some("Me"));
    }

    #[test]
    fn test_supabase_backend_requires_environment() {
        let mut config = IntakeConfig::default();
        config.datastore.backend = Backend::Supabase;

        let result = context(config).project_store();
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_sqlite_backend_and_custom_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("questions.toml");
        std::fs::write(
            &catalog_path,
            "[[questions]]\nid = \"q1\"\nkey = \"name\"\nlabel = \"Name?\"\n",
        )
        .unwrap();

        let mut config = IntakeConfig::default();
        config.datastore.sqlite_path = dir.path().join("intake.db");
        config.questionnaire.catalog_path = Some(catalog_path);
        let ctx = context(config);

        assert_eq!(ctx.project_store().unwrap().backend_name(), "sqlite");
        assert_eq!(ctx.catalog().unwrap().len(), 1);
    }
}
