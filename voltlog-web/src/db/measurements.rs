//! Measurement series storage
//!
//! Append-only write path (no update or delete during an import run) and an
//! ordered read path: `fetch` always returns ascending timestamp order, which
//! the export engine relies on for anchor detection.

use sqlx::SqlitePool;
use voltlog_common::{Measurement, Result};

const COLUMNS: &str = "name, timestamp, voltage, current, power, temperature, \
     data_plus, data_minus, mode_id, mode_name, \
     accumulated_current, accumulated_power, accumulated_time, resistance";

/// Append one measurement row
pub async fn insert(pool: &SqlitePool, m: &Measurement) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO measurements (
            name, timestamp, voltage, current, power, temperature,
            data_plus, data_minus, mode_id, mode_name,
            accumulated_current, accumulated_power, accumulated_time, resistance
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&m.name)
    .bind(m.timestamp)
    .bind(m.voltage)
    .bind(m.current)
    .bind(m.power)
    .bind(m.temperature)
    .bind(m.data_plus)
    .bind(m.data_minus)
    .bind(m.mode_id)
    .bind(&m.mode_name)
    .bind(m.accumulated_current)
    .bind(m.accumulated_power)
    .bind(m.accumulated_time)
    .bind(m.resistance)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch a session's measurements in ascending timestamp order.
///
/// `limit` of `None` fetches the whole session (SQLite treats LIMIT -1 as
/// unbounded).
pub async fn fetch(
    pool: &SqlitePool,
    name: &str,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<Measurement>> {
    let query = format!(
        "SELECT {COLUMNS} FROM measurements WHERE name = ? \
         ORDER BY timestamp ASC LIMIT ? OFFSET ?"
    );

    let rows = sqlx::query_as::<_, Measurement>(&query)
        .bind(name)
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Count a session's measurements
pub async fn count(pool: &SqlitePool, name: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurements WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Distinct session names, most recently written first
pub async fn session_names(pool: &SqlitePool) -> Result<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM measurements GROUP BY name ORDER BY MAX(timestamp) DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// Name of the most recently written session, if any
pub async fn latest_session_name(pool: &SqlitePool) -> Result<Option<String>> {
    let name: Option<String> = sqlx::query_scalar(
        "SELECT name FROM measurements GROUP BY name ORDER BY MAX(timestamp) DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(name)
}

/// Resolve a caller-supplied session selection.
///
/// An empty selection means "no session selected" and resolves to the most
/// recently written session; a named selection passes through even when the
/// session has zero rows (those are distinct states).
pub async fn resolve_session(pool: &SqlitePool, selected: &str) -> Result<String> {
    if !selected.is_empty() {
        return Ok(selected.to_string());
    }

    Ok(latest_session_name(pool).await?.unwrap_or_default())
}

/// Delete all measurements belonging to a session
pub async fn destroy(pool: &SqlitePool, name: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM measurements WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
