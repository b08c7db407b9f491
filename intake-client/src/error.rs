use serde::Serialize;
use thiserror::Error;

/// Failure of the durable store write (phase 1)
#[derive(Error, Debug)]
pub enum StoreError {
    /// The datastore answered with an error body
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<String>,
        hint: Option<String>,
    },

    /// Network or connection error
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// The insert did not return exactly one row
    #[error("Expected a single inserted row, got {count}")]
    RowCount { count: usize },

    /// The inserted row came back without an id
    #[error("Datastore did not return a project id")]
    MissingId,

    /// Local database failure
    #[error("Database error: {message}")]
    Database { message: String },

    /// JSON parsing or serialization error
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// Invalid client configuration
    #[error("Invalid datastore configuration: {message}")]
    Config { message: String },
}

impl StoreError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            code: None,
            details: None,
            hint: None,
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// User-facing message for the failed submission
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::database(err.to_string())
    }
}

/// Failure while resolving the signed-in user
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Not signed in: {message}")]
    NotAuthenticated { message: String },

    #[error("Identity API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("Invalid identity configuration: {message}")]
    Config { message: String },
}

impl IdentityError {
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::NotAuthenticated {
            message: message.into(),
        }
    }
}

/// Input rejected before any side effect happened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid URL (e.g., http://... or https://...). Got '{url}': {reason}")]
    InvalidWebhookUrl { url: String, reason: String },
}

/// Non-fatal webhook relay failure (phase 2)
///
/// `status` and `status_text` are only present when the server answered.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("Webhook relay failed: {error_text}")]
pub struct RelayError {
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub error_text: String,
}

impl RelayError {
    /// Fallback text when the error body cannot be read
    pub const UNREADABLE_BODY: &'static str = "Could not retrieve error details.";

    pub fn transport(error_text: impl Into<String>) -> Self {
        Self {
            status: None,
            status_text: None,
            error_text: error_text.into(),
        }
    }

    pub fn http(status: u16, status_text: Option<String>, error_text: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            status_text,
            error_text: error_text.into(),
        }
    }
}

/// Pre-flight rejection of a submit call; neither phase ran
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("You must be signed in to submit project requirements")]
    Authentication,

    #[error("A submission is already in progress")]
    InProgress,

    #[error("These answers were already submitted")]
    AlreadySubmitted,
}

/// Failure of the key-value persistence layer
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Corrupt settings file: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_api_message_is_bare() {
        let err = StoreError::api(503, "network down");
        assert_eq!(err.message(), "network down");
    }

    #[test]
    fn test_relay_error_serializes_camel_case() {
        let err = RelayError::http(500, Some("Internal Server Error".to_string()), "boom");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], 500);
        assert_eq!(json["statusText"], "Internal Server Error");
        assert_eq!(json["errorText"], "boom");
    }

    #[test]
    fn test_validation_error_mentions_url() {
        let err = ValidationError::InvalidWebhookUrl {
            url: "ftp://bad".to_string(),
            reason: "unsupported scheme 'ftp'".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("ftp://bad"));
        assert!(text.starts_with("Please enter a valid URL"));
    }
}
