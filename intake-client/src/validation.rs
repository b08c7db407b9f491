use crate::error::ValidationError;
use url::Url;

/// Parse a webhook URL, accepting `http`, `https` and `https+<transport>` schemes
pub fn validate_webhook_url(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ValidationError::InvalidWebhookUrl {
        url: trimmed.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme if scheme.starts_with("https+") => Ok(url),
        scheme => Err(invalid(format!("unsupported scheme '{}'", scheme))),
    }
}

/// Blank input means "no webhook"; anything else must validate
pub fn parse_optional_webhook_url(raw: Option<&str>) -> Result<Option<Url>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => validate_webhook_url(value).map(Some),
    }
}
