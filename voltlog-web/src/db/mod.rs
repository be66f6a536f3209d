//! Database access for voltlog-web
//!
//! SQLite-backed measurement store. The write path is append-only; the read
//! path always returns ascending timestamp order so every reader derives the
//! same run-start anchor.

pub mod log;
pub mod measurements;
pub mod settings;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Connect to an in-memory database, used by tests and demos.
///
/// Pinned to a single connection: each SQLite in-memory connection is its
/// own database, so a larger pool would scatter tables across connections.
pub async fn connect_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize voltlog tables
///
/// Creates measurements, settings, and log tables if they don't exist
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS measurements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            timestamp REAL NOT NULL,
            voltage REAL NOT NULL,
            current REAL NOT NULL,
            power REAL NOT NULL,
            temperature REAL NOT NULL,
            data_plus REAL NOT NULL,
            data_minus REAL NOT NULL,
            mode_id INTEGER NOT NULL,
            mode_name TEXT,
            accumulated_current REAL NOT NULL,
            accumulated_power REAL NOT NULL,
            accumulated_time REAL NOT NULL,
            resistance REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_measurements_name_ts ON measurements(name, timestamp)",
    )
    .execute(pool)
    .await?;

    // Settings table for runtime key-value configuration
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Operational log for device diagnostics
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            message TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (measurements, settings, log)");

    Ok(())
}
