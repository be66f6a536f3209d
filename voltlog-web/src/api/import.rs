//! Import API handlers
//!
//! POST /api/import runs one device import to completion before responding;
//! no background task outlives the request. A second request during a run
//! gets 409 immediately.

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::import::ImportOutcome;
use crate::{db, ApiResult, AppState};

/// POST /api/import request
#[derive(Debug, Deserialize)]
pub struct StartImportRequest {
    pub session_name: String,
}

/// POST /api/import response
#[derive(Debug, Serialize)]
pub struct StartImportResponse {
    pub session_name: String,
    #[serde(flatten)]
    pub outcome: ImportOutcome,
}

/// POST /api/import
///
/// 400 on an empty session name, 409 while another import is running; both
/// are rejected before the device is opened. A device failure mid-run is a
/// normal 200 response carrying the outcome, with already-written rows kept.
pub async fn start_import(
    State(state): State<AppState>,
    Json(request): Json<StartImportRequest>,
) -> ApiResult<Json<StartImportResponse>> {
    let settings = db::settings::device_settings(&state.db).await?;
    let outcome = state
        .importer
        .start(&request.session_name, state.devices.as_ref(), &settings)
        .await?;

    Ok(Json(StartImportResponse {
        session_name: request.session_name.trim().to_string(),
        outcome,
    }))
}

/// Build import routes
pub fn import_routes() -> Router<AppState> {
    Router::new().route("/api/import", post(start_import))
}
