//! Shared plumbing for the Supabase REST adapters

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

/// PostgREST error code for "no rows returned" on a single-object request
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Accept header value that makes PostgREST return one object instead of an array
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    /// User session token; the anon key is used as bearer when absent
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(self.timeout).build()
    }

    /// `apikey`, bearer and JSON content type; `None` when a key is not a valid header value
    pub(crate) fn headers(&self) -> Option<HeaderMap> {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&self.anon_key).ok()?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", bearer)).ok()?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Some(headers)
    }

    pub(crate) fn single_object_headers(&self) -> Option<HeaderMap> {
        let mut headers = self.headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT));
        Some(headers)
    }
}

/// Error body returned by PostgREST
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostgrestError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl PostgrestError {
    /// Decode a PostgREST or GoTrue error body, falling back to the raw text
    pub fn from_body(body: &str) -> Self {
        #[derive(Deserialize)]
        struct AuthError {
            #[serde(alias = "error_description", alias = "msg")]
            message: String,
        }

        if let Ok(err) = serde_json::from_str::<PostgrestError>(body) {
            if !err.message.is_empty() {
                return err;
            }
        }
        if let Ok(err) = serde_json::from_str::<AuthError>(body) {
            return Self {
                message: err.message,
                ..Default::default()
            };
        }

        let message = if body.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            body.trim().to_string()
        };
        Self {
            message,
            ..Default::default()
        }
    }

    pub fn is_no_rows(&self) -> bool {
        self.code.as_deref() == Some(NO_ROWS_CODE)
    }
}
