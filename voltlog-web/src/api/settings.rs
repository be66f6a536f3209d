//! Device settings API
//!
//! Runtime-editable key-value settings backing the device configuration:
//! device version, serial port, poll rate, and the default session name.

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{db, ApiError, ApiResult, AppState};

/// GET /api/settings response
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: BTreeMap<String, String>,
}

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<SettingsResponse>> {
    let mut settings = BTreeMap::new();
    for key in db::settings::EDITABLE_KEYS.iter().copied() {
        if let Some(value) = db::settings::get(&state.db, key).await? {
            settings.insert(key.to_string(), value);
        }
    }

    Ok(Json(SettingsResponse { settings }))
}

/// PUT /api/settings
///
/// Accepts a partial map; unknown keys are rejected, the poll rate must
/// parse as a number.
pub async fn put_settings(
    State(state): State<AppState>,
    Json(updates): Json<BTreeMap<String, String>>,
) -> ApiResult<Json<SettingsResponse>> {
    for (key, value) in &updates {
        if !db::settings::EDITABLE_KEYS.contains(&key.as_str()) {
            return Err(ApiError::BadRequest(format!("Unknown setting: {key}")));
        }
        if key == "rate" && value.parse::<f64>().is_err() {
            return Err(ApiError::BadRequest(format!(
                "Poll rate must be a number, got: {value}"
            )));
        }
    }

    for (key, value) in &updates {
        db::settings::set(&state.db, key, value).await?;
    }

    get_settings(State(state)).await
}

/// Build settings routes
pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/api/settings", get(get_settings).put(put_settings))
}
