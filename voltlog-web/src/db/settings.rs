//! Key-value settings storage
//!
//! Runtime-editable device settings (device version, serial port, poll rate,
//! default session name) and the connection status snapshot. Keys outside
//! the known set are rejected at the API boundary, not here.

use sqlx::SqlitePool;
use voltlog_common::{ConnectionStatus, Error, Result};

use crate::device::DeviceSettings;

/// Settings keys exposed through the settings API
pub const EDITABLE_KEYS: &[&str] = &["version", "port", "rate", "name"];

const STATUS_KEY: &str = "status";

/// Read one setting value
pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(value)
}

/// Write one setting value (upsert)
pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Assemble device settings from stored values, with defaults matching a
/// freshly installed service.
pub async fn device_settings(pool: &SqlitePool) -> Result<DeviceSettings> {
    let version = get(pool, "version").await?.unwrap_or_else(|| "UM34C".to_string());
    let port = get(pool, "port").await?.unwrap_or_default();
    let rate = match get(pool, "rate").await? {
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| Error::Internal(format!("Stored poll rate is not a number: {value}")))?,
        None => 1.0,
    };

    Ok(DeviceSettings { version, port, rate })
}

/// Read the connection status snapshot; unset or unrecognized values read as
/// disconnected.
pub async fn status(pool: &SqlitePool) -> Result<ConnectionStatus> {
    let value = get(pool, STATUS_KEY).await?;

    Ok(value
        .as_deref()
        .and_then(ConnectionStatus::parse)
        .unwrap_or(ConnectionStatus::Disconnected))
}

/// Write the connection status snapshot
pub async fn set_status(pool: &SqlitePool, status: ConnectionStatus) -> Result<()> {
    set(pool, STATUS_KEY, status.as_str()).await
}
