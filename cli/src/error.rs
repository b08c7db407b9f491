use intake_client::{IdentityError, PersistenceError, StoreError, SubmitError};
use intake_workflow::CatalogError;
use std::fmt;

/// Main error type for the intake CLI
#[derive(Debug)]
pub enum CliError {
    /// Configuration-related errors
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// Rejected input (webhook URL, answers file, catalog)
    Validation(String),
    /// No signed-in user
    Authentication(String),
    /// Datastore write failed
    Store(String),
    /// Settings could not be read or written
    Persistence(String),
    /// Command execution errors
    Command(String),
    /// Generic errors from anyhow
    Other(anyhow::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Validation(msg) => write!(f, "Validation error: {msg}"),
            CliError::Authentication(msg) => write!(f, "Authentication error: {msg}"),
            CliError::Store(msg) => write!(f, "Submission failed: {msg}"),
            CliError::Persistence(msg) => write!(f, "Settings error: {msg}"),
            CliError::Command(msg) => write!(f, "Command error: {msg}"),
            CliError::Other(err) => write!(f, "Error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Io(_) => 3,
            CliError::Validation(_) => 4,
            CliError::Command(_) => 5,
            CliError::Authentication(_) => 6,
            CliError::Store(_) => 7,
            CliError::Persistence(_) => 8,
            CliError::Other(_) => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        CliError::Validation(err.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Config { message } => CliError::Config(message),
            other => CliError::Store(other.message()),
        }
    }
}

impl From<IdentityError> for CliError {
    fn from(err: IdentityError) -> Self {
        CliError::Authentication(err.to_string())
    }
}

impl From<PersistenceError> for CliError {
    fn from(err: PersistenceError) -> Self {
        CliError::Persistence(err.to_string())
    }
}

impl From<SubmitError> for CliError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(e) => CliError::Validation(e.to_string()),
            SubmitError::Authentication => CliError::Authentication(err.to_string()),
            SubmitError::InProgress | SubmitError::AlreadySubmitted => {
                CliError::Command(err.to_string())
            }
        }
    }
}
