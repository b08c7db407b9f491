use refinery::embed_migrations;

embed_migrations!("src/store/migrations");

/// Run the project store migrations on a database connection
///
/// Creates the `projects` table. Works with any connection refinery can migrate.
///
/// # Example
/// ```no_run
/// use rusqlite::Connection;
/// use intake_client::store::migrations::run_store_migrations;
///
/// let mut conn = Connection::open("intake.db")?;
/// run_store_migrations(&mut conn)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn run_store_migrations<C>(conn: &mut C) -> anyhow::Result<()>
where
    C: refinery::Migrate,
{
    migrations::runner().run(conn)?;
    Ok(())
}

/// Check if the projects table exists
pub fn has_store_schema(conn: &rusqlite::Connection) -> anyhow::Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='projects'")?;
    Ok(stmt.exists([])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_store_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(!has_store_schema(&conn).unwrap());

        run_store_migrations(&mut conn).expect("Migrations should succeed");
        assert!(has_store_schema(&conn).unwrap());

        conn.execute(
            "INSERT INTO projects (user_id, requirements_json, status, created_at)
             VALUES ('u1', '{}', 'submitted', 1700000000)",
            [],
        )
        .unwrap();

        let rejected = conn.execute(
            "INSERT INTO projects (user_id, requirements_json, status, created_at)
             VALUES ('u1', '{}', 'draft', 1700000000)",
            [],
        );
        assert!(rejected.is_err(), "status CHECK should reject 'draft'");
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_store_migrations(&mut conn).unwrap();
        run_store_migrations(&mut conn).unwrap();
    }
}
