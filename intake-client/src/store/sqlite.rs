use super::migrations::run_store_migrations;
use super::ProjectStore;
use crate::error::StoreError;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use shared_types::{NewProject, ProjectId, SubmissionRecord, SubmissionStatus};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

type DbConnection = Arc<Mutex<Connection>>;

/// Local `projects` table backed by SQLite
pub struct SqliteProjectStore {
    connection: DbConnection,
}

impl SqliteProjectStore {
    /// Open (or create) the database file and run migrations
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::database(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(db_path)?;
        debug!(path = %db_path.display(), "Opened project database");
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, StoreError> {
        run_store_migrations(&mut conn)
            .map_err(|e| StoreError::database(format!("Migration failed: {}", e)))?;
        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Fetch a stored submission by id
    pub fn get_project(&self, id: i64) -> Result<Option<SubmissionRecord>, StoreError> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| StoreError::database(format!("Lock error: {}", e)))?;

        let row = conn
            .query_row(
                "SELECT id, user_id, requirements_json FROM projects WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, user_id, requirements)| -> Result<_, StoreError> {
            Ok(SubmissionRecord {
                id: ProjectId::Integer(id),
                user_id,
                requirements_json: serde_json::from_str(&requirements)?,
                status: SubmissionStatus::Submitted,
            })
        })
        .transpose()
    }

    pub fn count_for_user(&self, user_id: &str) -> Result<i64, StoreError> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| StoreError::database(format!("Lock error: {}", e)))?;

        Ok(conn.query_row(
            "SELECT COUNT(*) FROM projects WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?)
    }
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    async fn insert_project(&self, project: NewProject) -> Result<ProjectId, StoreError> {
        let requirements = serde_json::to_string(&project.requirements_json)?;
        let created_at = chrono::Utc::now().timestamp();

        let conn = self
            .connection
            .lock()
            .map_err(|e| StoreError::database(format!("Lock error: {}", e)))?;

        conn.execute(
            r#"
            INSERT INTO projects (user_id, requirements_json, status, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                project.user_id,
                requirements,
                project.status.as_str(),
                created_at
            ],
        )?;

        Ok(ProjectId::Integer(conn.last_insert_rowid()))
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{AnswerSet, AnswerValue};

    fn answers() -> AnswerSet {
        [
            ("project_name".to_string(), AnswerValue::from("Bakery")),
            ("features".to_string(), AnswerValue::from(vec!["blog", "shop"])),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_insert_returns_increasing_ids() {
        let store = SqliteProjectStore::in_memory().unwrap();

        let first = store
            .insert_project(NewProject::submitted("u1", answers()))
            .await
            .unwrap();
        let second = store
            .insert_project(NewProject::submitted("u1", answers()))
            .await
            .unwrap();

        assert_eq!(first, ProjectId::Integer(1));
        assert_eq!(second, ProjectId::Integer(2));
        assert_eq!(store.count_for_user("u1").unwrap(), 2);
        assert_eq!(store.count_for_user("other").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_requirements_round_trip_through_json_column() {
        let store = SqliteProjectStore::in_memory().unwrap();
        let id = store
            .insert_project(NewProject::submitted("u1", answers()))
            .await
            .unwrap();

        let ProjectId::Integer(row_id) = id else {
            panic!("sqlite ids are integers");
        };
        let record = store.get_project(row_id).unwrap().unwrap();
        assert_eq!(record.user_id, "u1");
        assert_eq!(record.requirements_json, answers());
        assert_eq!(record.status, SubmissionStatus::Submitted);

        assert!(store.get_project(999).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("intake.db");

        let store = SqliteProjectStore::open(&path).unwrap();
        store
            .insert_project(NewProject::submitted("u1", AnswerSet::new()))
            .await
            .unwrap();
        drop(store);

        let reopened = SqliteProjectStore::open(&path).unwrap();
        assert_eq!(reopened.count_for_user("u1").unwrap(), 1);
    }
}
