use crate::error::PersistenceError;
use crate::validation::validate_webhook_url;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Fixed key under which the webhook URL is persisted
pub const WEBHOOK_URL_KEY: &str = "n8nWebhookUrl";

pub const EMPTY_WEBHOOK_HINT: &str = "Leave empty if you don't want to use n8n integration.";
pub const INVALID_WEBHOOK_HINT: &str = "Please enter a valid URL (e.g., http://... or https://...).";

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Ephemeral store for tests and one-off sessions
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.values().remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PersistenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Hint shown under the webhook URL field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookHint {
    Empty,
    Invalid,
    Valid,
}

impl WebhookHint {
    pub fn for_value(value: &str) -> Self {
        if value.trim().is_empty() {
            WebhookHint::Empty
        } else if validate_webhook_url(value).is_err() {
            WebhookHint::Invalid
        } else {
            WebhookHint::Valid
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            WebhookHint::Empty => Some(EMPTY_WEBHOOK_HINT),
            WebhookHint::Invalid => Some(INVALID_WEBHOOK_HINT),
            WebhookHint::Valid => None,
        }
    }
}

/// The persisted webhook URL, loaded once and written on every edit
pub struct WebhookUrlSetting<'a> {
    store: &'a dyn KeyValueStore,
    value: String,
}

impl<'a> WebhookUrlSetting<'a> {
    pub fn load(store: &'a dyn KeyValueStore) -> Result<Self, PersistenceError> {
        let value = store.get(WEBHOOK_URL_KEY)?.unwrap_or_default();
        Ok(Self { store, value })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value to hand to the coordinator, `None` when blank
    pub fn as_option(&self) -> Option<&str> {
        Some(self.value.as_str()).filter(|v| !v.trim().is_empty())
    }

    /// Store the text verbatim, valid or not
    pub fn update(&mut self, text: impl Into<String>) -> Result<(), PersistenceError> {
        self.value = text.into();
        self.store.set(WEBHOOK_URL_KEY, &self.value)
    }

    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.value.clear();
        self.store.remove(WEBHOOK_URL_KEY)
    }

    pub fn hint(&self) -> WebhookHint {
        WebhookHint::for_value(&self.value)
    }
}
