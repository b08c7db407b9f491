use super::ProjectStore;
use crate::error::StoreError;
use crate::supabase::{PostgrestError, SupabaseConfig};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use serde_json::Value;
use shared_types::{NewProject, ProjectId};
use tracing::debug;

/// `projects` table behind Supabase's PostgREST API
pub struct SupabaseProjectStore {
    config: SupabaseConfig,
    http_client: reqwest::Client,
}

impl SupabaseProjectStore {
    pub fn new(config: SupabaseConfig) -> Result<Self, StoreError> {
        if config.url.is_empty() {
            return Err(StoreError::config("Supabase URL cannot be empty"));
        }
        if config.anon_key.is_empty() {
            return Err(StoreError::config("Supabase anon key cannot be empty"));
        }

        let http_client = config.http_client()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn extract_id(body: Value) -> Result<ProjectId, StoreError> {
        let row = match body {
            Value::Array(mut rows) => {
                if rows.len() != 1 {
                    return Err(StoreError::RowCount { count: rows.len() });
                }
                rows.remove(0)
            }
            other => other,
        };

        match row.get("id") {
            Some(Value::Number(n)) => n
                .as_i64()
                .map(ProjectId::Integer)
                .ok_or(StoreError::MissingId),
            Some(Value::String(s)) => Ok(ProjectId::Text(s.clone())),
            _ => Err(StoreError::MissingId),
        }
    }
}

#[async_trait]
impl ProjectStore for SupabaseProjectStore {
    async fn insert_project(&self, project: NewProject) -> Result<ProjectId, StoreError> {
        let url = self.config.endpoint("/rest/v1/projects?select=id");

        let mut headers = self
            .config
            .single_object_headers()
            .ok_or_else(|| StoreError::config("Invalid Supabase key format"))?;
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&project)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            debug!(status = status.as_u16(), "Supabase insert succeeded");
            if body.trim().is_empty() {
                return Err(StoreError::RowCount { count: 0 });
            }
            let value: Value = serde_json::from_str(&body)?;
            Self::extract_id(value)
        } else {
            let error = PostgrestError::from_body(&body);
            Err(StoreError::Api {
                status: status.as_u16(),
                message: error.message,
                code: error.code,
                details: error.details,
                hint: error.hint,
            })
        }
    }

    fn backend_name(&self) -> &'static str {
        "supabase"
    }
}
