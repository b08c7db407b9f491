use crate::answers::AnswerSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// ============ Datastore records ============

/// Identifier assigned by the datastore to a stored project
///
/// PostgREST returns either a number or a string depending on the column type,
/// so both are accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ProjectId {
    Integer(i64),
    Text(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Integer(id) => write!(f, "{id}"),
            ProjectId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProjectId {
    fn from(id: i64) -> Self {
        ProjectId::Integer(id)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        ProjectId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Submitted,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
        }
    }
}

/// Row inserted into the `projects` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProject {
    pub user_id: String,
    pub requirements_json: AnswerSet,
    pub status: SubmissionStatus,
}

impl NewProject {
    pub fn submitted(user_id: impl Into<String>, requirements: AnswerSet) -> Self {
        Self {
            user_id: user_id.into(),
            requirements_json: requirements,
            status: SubmissionStatus::Submitted,
        }
    }
}

/// A stored project submission as returned by the datastore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: ProjectId,
    pub user_id: String,
    pub requirements_json: AnswerSet,
    pub status: SubmissionStatus,
}

// ============ Webhook relay ============

/// Body POSTed to the external workflow webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub user_id: String,
    pub user_email: Option<String>,
    /// Profile full name, "N/A" when the profile has none
    pub user_full_name: String,
    /// ISO-8601 timestamp of the submission attempt
    pub submission_timestamp: String,
    pub project_requirements: AnswerSet,
    #[ts(type = "string | number | null")]
    pub supabase_project_id: Option<ProjectId>,
}

impl WebhookPayload {
    /// Placeholder full name for users without a profile name
    pub const MISSING_FULL_NAME: &'static str = "N/A";

    /// Get JSON schema for this type
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(WebhookPayload);
        serde_json::to_value(&schema).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerValue;

    #[test]
    fn test_project_id_accepts_number_and_string() {
        let numeric: ProjectId = serde_json::from_str("42").unwrap();
        let text: ProjectId = serde_json::from_str("\"8f1c\"").unwrap();

        assert_eq!(numeric, ProjectId::Integer(42));
        assert_eq!(text, ProjectId::Text("8f1c".to_string()));
        assert_eq!(numeric.to_string(), "42");
    }

    #[test]
    fn test_new_project_wire_shape() {
        let mut answers = AnswerSet::new();
        answers.insert("project_name", AnswerValue::from("Site"));
        let row = NewProject::submitted("user-1", answers);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["user_id"], "user-1");
        assert_eq!(json["requirements_json"]["project_name"], "Site");
        assert_eq!(json["status"], "submitted");
    }

    #[test]
    fn test_webhook_payload_uses_camel_case() {
        let payload = WebhookPayload {
            user_id: "u1".to_string(),
            user_email: None,
            user_full_name: WebhookPayload::MISSING_FULL_NAME.to_string(),
            submission_timestamp: "2024-05-01T10:00:00.000Z".to_string(),
            project_requirements: AnswerSet::new(),
            supabase_project_id: Some(ProjectId::Integer(7)),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["userId"], "u1");
        assert!(json["userEmail"].is_null());
        assert_eq!(json["userFullName"], "N/A");
        assert_eq!(json["supabaseProjectId"], 7);
        assert!(json["projectRequirements"].is_object());
    }

    #[test]
    fn test_webhook_schema_generation() {
        let schema = WebhookPayload::json_schema();
        let schema_str = serde_json::to_string(&schema).unwrap();
        assert!(schema_str.contains("WebhookPayload"));
        assert!(schema_str.contains("supabaseProjectId"));
    }
}
