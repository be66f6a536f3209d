//! Operational log storage
//!
//! Best-effort append sink for device diagnostics. Callers must not let a
//! failed log write mask the error being recorded.

use serde::Serialize;
use sqlx::SqlitePool;
use voltlog_common::Result;

/// One operational log entry
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LogEntry {
    pub id: i64,
    pub created_at: String,
    pub message: String,
}

/// Append a diagnostic message
pub async fn append(pool: &SqlitePool, message: &str) -> Result<()> {
    sqlx::query("INSERT INTO log (created_at, message) VALUES (?, ?)")
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(message)
        .execute(pool)
        .await?;

    Ok(())
}

/// Fetch all log entries, oldest first
pub async fn fetch(pool: &SqlitePool) -> Result<Vec<LogEntry>> {
    let entries = sqlx::query_as::<_, LogEntry>(
        "SELECT id, created_at, message FROM log ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Clear the operational log
pub async fn clear(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM log").execute(pool).await?;

    Ok(())
}
