use crate::error::StoreError;
use async_trait::async_trait;
use shared_types::{NewProject, ProjectId};

pub mod migrations;
mod sqlite;
mod supabase;

pub use sqlite::SqliteProjectStore;
pub use supabase::SupabaseProjectStore;

/// Durable store for submitted project requirements
///
/// An insert must yield exactly one row id. Anything else is a `StoreError`.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert_project(&self, project: NewProject) -> Result<ProjectId, StoreError>;

    /// Short name used in logs
    fn backend_name(&self) -> &'static str;
}
