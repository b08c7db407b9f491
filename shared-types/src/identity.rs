use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Identity & Profile ============

/// The signed-in user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserIdentity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Row from the `profiles` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
        }
    }

    /// An identity is usable for submission only when it has a non-blank id
    pub fn is_authenticated(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

impl UserProfile {
    /// Full name if set and non-blank
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_identity_is_not_authenticated() {
        assert!(!UserIdentity::new("  ", None).is_authenticated());
        assert!(UserIdentity::new("abc", None).is_authenticated());
    }

    #[test]
    fn test_profile_display_name() {
        let mut profile = UserProfile {
            id: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), None);

        profile.full_name = Some(" ".to_string());
        assert_eq!(profile.display_name(), None);

        profile.full_name = Some("Ada Lovelace".to_string());
        assert_eq!(profile.display_name(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_profile_ignores_unknown_columns() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id":"abc","full_name":"Ada","website":null}"#).unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Ada"));
    }
}
