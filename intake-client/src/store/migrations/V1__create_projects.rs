/// Create the projects table holding submitted requirements
pub fn migration() -> String {
    r#"
CREATE TABLE projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    requirements_json TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'submitted' CHECK (status IN ('submitted')),
    created_at INTEGER NOT NULL
);

CREATE INDEX idx_projects_user_id ON projects(user_id);
"#
    .to_string()
}
