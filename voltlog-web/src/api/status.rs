//! Connection status endpoint
//!
//! Read-only snapshot used by clients to gate UI actions (e.g. disabling the
//! import button while a capture is connected).

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use voltlog_common::ConnectionStatus;

use crate::{db, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: ConnectionStatus,
    pub import_running: bool,
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    let status = db::settings::status(&state.db).await?;

    Ok(Json(StatusResponse {
        status,
        import_running: state.importer.is_running(),
    }))
}

/// Build status routes
pub fn status_routes() -> Router<AppState> {
    Router::new().route("/api/status", get(get_status))
}
