use crate::error::IdentityError;
use async_trait::async_trait;
use shared_types::{UserIdentity, UserProfile};
use tracing::warn;

mod supabase;

pub use supabase::SupabaseIdentity;

/// Source of the signed-in user and their profile
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Result<UserIdentity, IdentityError>;

    /// Profile row for `user_id`; `Ok(None)` when the user has no profile
    async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>, IdentityError>;
}

/// Identity and profile read from configuration
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    identity: Option<UserIdentity>,
    profile: Option<UserProfile>,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            identity: Some(UserIdentity::new(user_id, email)),
            profile: None,
        }
    }

    /// A provider with nobody signed in
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            profile: None,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        if let Some(identity) = &self.identity {
            self.profile = Some(UserProfile {
                id: identity.id.clone(),
                full_name: Some(full_name.into()),
                ..Default::default()
            });
        }
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Result<UserIdentity, IdentityError> {
        self.identity
            .clone()
            .filter(UserIdentity::is_authenticated)
            .ok_or_else(|| IdentityError::not_authenticated("no user configured"))
    }

    async fn profile(&self, user_id: &str) -> Result<Option<UserProfile>, IdentityError> {
        Ok(self.profile.clone().filter(|p| p.id == user_id))
    }
}

/// The identity plus whatever profile could be loaded for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInUser {
    pub identity: UserIdentity,
    pub profile: Option<UserProfile>,
}

impl SignedInUser {
    pub fn full_name(&self) -> Option<&str> {
        self.profile.as_ref().and_then(UserProfile::display_name)
    }
}

/// Resolve the current user; profile failures are logged and treated as "no profile"
pub async fn resolve_user(
    provider: &dyn IdentityProvider,
) -> Result<SignedInUser, IdentityError> {
    let identity = provider.current_user().await?;

    let profile = match provider.profile(&identity.id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(user_id = %identity.id, error = %e, "Failed to load user profile");
            None
        }
    };

    Ok(SignedInUser { identity, profile })
}
