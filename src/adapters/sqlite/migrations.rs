//! Embedded schema migrations.
//!
//! The schema ships inside the binary. Applied versions are recorded in
//! `schema_migrations`, so running against an up-to-date database is a
//! no-op.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration {version} ({name}) failed: {source}")]
    Failed {
        version: i64,
        name: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("Could not read applied schema version: {0}")]
    VersionLookup(#[source] sqlx::Error),
}

/// One embedded migration step.
#[derive(Debug)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub sql: &'static str,
}

/// All migrations, oldest first. Schema changes append here.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: include_str!("../../../migrations/001_initial_schema.sql"),
}];

/// Apply every migration newer than the recorded schema version and return
/// the number applied.
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize, MigrationError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .execute(pool)
    .await
    .map_err(MigrationError::VersionLookup)?;

    let current: i64 =
        sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_migrations")
            .fetch_one(pool)
            .await
            .map_err(MigrationError::VersionLookup)?;

    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        sqlx::raw_sql(migration.sql)
            .execute(pool)
            .await
            .map_err(|source| MigrationError::Failed {
                version: migration.version,
                name: migration.name,
                source,
            })?;

        sqlx::query("INSERT INTO schema_migrations (version, name) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(pool)
            .await
            .map_err(|source| MigrationError::Failed {
                version: migration.version,
                name: migration.name,
                source,
            })?;

        info!(version = migration.version, name = migration.name, "Applied migration");
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_test_pool;

    #[tokio::test]
    async fn test_migrations_create_schema() {
        let pool = create_test_pool().await.unwrap();
        let applied = run_migrations(&pool).await.unwrap();
        assert_eq!(applied, MIGRATIONS.len());

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        for expected in ["agent_assignments", "agents", "documents", "schema_migrations"] {
            assert!(tables.iter().any(|t| t == expected), "missing table {expected}");
        }
    }

    #[tokio::test]
    async fn test_rerun_is_noop() {
        let pool = create_test_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();
        let applied = run_migrations(&pool).await.unwrap();
        assert_eq!(applied, 0);
    }
}
