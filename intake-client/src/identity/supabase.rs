use super::IdentityProvider;
use crate::error::IdentityError;
use crate::supabase::{PostgrestError, SupabaseConfig};
use async_trait::async_trait;
use shared_types::{UserIdentity, UserProfile};
use tracing::debug;

/// Supabase Auth user plus the `profiles` table
pub struct SupabaseIdentity {
    config: SupabaseConfig,
    http_client: reqwest::Client,
}

impl SupabaseIdentity {
    /// Requires a user access token; the anon key alone identifies nobody
    pub fn new(config: SupabaseConfig) -> Result<Self, IdentityError> {
        match config.access_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => return Err(IdentityError::not_authenticated("no access token configured")),
        }

        let http_client = config.http_client()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn headers(&self, single: bool) -> Result<reqwest::header::HeaderMap, IdentityError> {
        let headers = if single {
            self.config.single_object_headers()
        } else {
            self.config.headers()
        };
        headers.ok_or_else(|| IdentityError::Config {
            message: "Invalid Supabase key format".to_string(),
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn current_user(&self) -> Result<UserIdentity, IdentityError> {
        let url = self.config.endpoint("/auth/v1/user");

        let response = self
            .http_client
            .get(&url)
            .headers(self.headers(false)?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let identity: UserIdentity = response.json().await?;
            if !identity.is_authenticated() {
                return Err(IdentityError::not_authenticated("user has no id"));
            }
            return Ok(identity);
        }

        let error = PostgrestError::from_body(&response.text().await.unwrap_or_default());
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(IdentityError::not_authenticated(error.message))
            }
            _ => Err(IdentityError::Api {
                status: status.as_u16(),
                message: error.message,
                code: error.code,
            }),
        }
    }

    async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>, IdentityError> {
        let url = self.config.endpoint("/rest/v1/profiles");

        let response = self
            .http_client
            .get(&url)
            .query(&[("id", format!("eq.{}", user_id)), ("select", "*".to_string())])
            .headers(self.headers(true)?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Some(response.json().await?));
        }

        let error = PostgrestError::from_body(&response.text().await.unwrap_or_default());
        if error.is_no_rows() {
            debug!(user_id, "No profile row for user");
            return Ok(None);
        }

        Err(IdentityError::Api {
            status: status.as_u16(),
            message: error.message,
            code: error.code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_access_token() {
        let config = SupabaseConfig::new("https://x.supabase.co", "anon");
        assert!(matches!(
            SupabaseIdentity::new(config.clone()),
            Err(IdentityError::NotAuthenticated { .. })
        ));
        assert!(SupabaseIdentity::new(config.with_access_token("jwt")).is_ok());
    }
}
