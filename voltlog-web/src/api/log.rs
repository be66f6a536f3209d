//! Operational log API

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::log::LogEntry;
use crate::{db, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub entries: Vec<LogEntry>,
}

/// GET /api/log
pub async fn get_log(State(state): State<AppState>) -> ApiResult<Json<LogResponse>> {
    let entries = db::log::fetch(&state.db).await?;
    Ok(Json(LogResponse { entries }))
}

/// DELETE /api/log
pub async fn clear_log(State(state): State<AppState>) -> ApiResult<Json<LogResponse>> {
    db::log::clear(&state.db).await?;
    Ok(Json(LogResponse { entries: Vec::new() }))
}

/// Build log routes
pub fn log_routes() -> Router<AppState> {
    Router::new().route("/api/log", get(get_log).delete(clear_log))
}
