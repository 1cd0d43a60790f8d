//! Plain-SQL schema migrations, applied one statement at a time.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;
use tokio::fs;

pub const INIT_MIGRATION: &str = "migrations/0001_init.sql";

/// Read a migration file from disk and apply it.
pub async fn run_file(db: &SqlitePool, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        anyhow::bail!("Migration file not found: {}", path.display());
    }

    let sql = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading migration {}", path.display()))?;
    apply(db, &sql).await
}

/// Split `sql` on `;` and execute each non-empty statement in order.
pub async fn apply(db: &SqlitePool, sql: &str) -> Result<()> {
    let statements = sql
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    tracing::info!("Running {} migration statements...", statements.len());

    for stmt in statements {
        tracing::debug!("Executing migration SQL: {}", stmt);
        sqlx::query(stmt)
            .execute(db)
            .await
            .with_context(|| format!("executing migration statement `{stmt}`"))?;
    }

    Ok(())
}
