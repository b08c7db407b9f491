use crate::error::RelayError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use shared_types::WebhookPayload;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Successful relay response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookDelivery {
    pub status: u16,
    /// Parsed JSON body, if the server returned one
    pub response: Option<Value>,
}

/// Posts submission payloads to an external workflow webhook
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http_client: reqwest::Client,
}

impl WebhookClient {
    pub fn new() -> Result<Self, RelayError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, RelayError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::transport(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// POST the payload as JSON. Any 2xx is a delivery; the body may be empty or non-JSON.
    pub async fn send(
        &self,
        url: &Url,
        payload: &WebhookPayload,
    ) -> Result<WebhookDelivery, RelayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http_client
            .post(url.clone())
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| RelayError::transport(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<Value>(&body).ok();
            if parsed.is_none() && !body.trim().is_empty() {
                debug!(status = status.as_u16(), "Webhook returned a non-JSON body");
            }
            Ok(WebhookDelivery {
                status: status.as_u16(),
                response: parsed,
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| RelayError::UNREADABLE_BODY.to_string());
            warn!(status = status.as_u16(), "Webhook responded with an error");

            Err(RelayError::http(
                status.as_u16(),
                status.canonical_reason().map(str::to_string),
                error_text,
            ))
        }
    }
}
