use deadpool_postgres::PoolError;
use thiserror::Error;
use tokio_postgres::Error as PgError;
use tracing::{info, instrument};

use super::schema::{
    CANDIDATES_DDL, JOBS_DDL, SCHEMA_DDL, SKILL_LINK_INDEXES_DDL, SKILL_LINKS_DDL, SKILLS_DDL,
};
use crate::db::PgPool;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to run migration: {0}")]
    Postgres(#[from] PgError),
}

struct Migration {
    id: i32,
    description: &'static str,
    statements: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        id: 1,
        description: "skill catalog, jobs, candidates and skill links",
        statements: &[SKILLS_DDL, JOBS_DDL, CANDIDATES_DDL, SKILL_LINKS_DDL],
    },
    Migration {
        id: 2,
        description: "reverse skill lookups + recency indexes",
        statements: &[SKILL_LINK_INDEXES_DDL],
    },
];

/// Applies pending migrations in id order. Each migration runs in its own
/// transaction and is recorded in `tl.schema_migrations`.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<usize, MigrationError> {
    let mut client = pool.get().await?;
    client
        .batch_execute(&format!(
            "{SCHEMA_DDL}
             CREATE TABLE IF NOT EXISTS tl.schema_migrations (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
             );"
        ))
        .await?;

    let mut applied = 0;
    for migration in MIGRATIONS {
        let already_applied: bool = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM tl.schema_migrations WHERE id = $1)",
                &[&migration.id],
            )
            .await?
            .get(0);

        if already_applied {
            continue;
        }

        let tx = client.transaction().await?;
        for statement in migration.statements {
            tx.batch_execute(statement).await?;
        }
        tx.execute(
            "INSERT INTO tl.schema_migrations (id, description) VALUES ($1, $2)",
            &[&migration.id, &migration.description],
        )
        .await?;
        tx.commit().await?;

        applied += 1;
        info!(
            id = migration.id,
            description = migration.description,
            "applied migration"
        );
    }

    Ok(applied)
}
