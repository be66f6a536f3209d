//! Session browsing API
//!
//! Lists sessions, serves paged measurement views, graph series, and session
//! deletion. Read-side only; all data comes from the measurement store in
//! ascending timestamp order.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use voltlog_common::{time, Measurement};

use crate::pagination::{build_pages, PageLink, PAGE_SIZE};
use crate::{db, ApiError, ApiResult, AppState};

/// GET /api/sessions
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let names = db::measurements::session_names(&state.db).await?;
    Ok(Json(names))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

/// GET /api/sessions/{name}/measurements response
#[derive(Debug, Serialize)]
pub struct MeasurementsPage {
    pub name: String,
    pub page: u64,
    pub total: i64,
    pub measurements: Vec<Measurement>,
    pub pages: Vec<PageLink>,
}

/// GET /api/sessions/{name}/measurements?page=N
///
/// Fixed page size of 100. An unknown session yields an empty page rather
/// than an error; page numbers out of range yield empty rows plus the page
/// links needed to navigate back.
pub async fn session_measurements(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<MeasurementsPage>> {
    let name = db::measurements::resolve_session(&state.db, &name).await?;
    let total = db::measurements::count(&state.db, &name).await?;

    let page = query.page.max(1);
    let pages = build_pages(total as u64, PAGE_SIZE, page, |number| {
        format!("/api/sessions/{name}/measurements?page={number}")
    });

    let offset = (page - 1).saturating_mul(PAGE_SIZE).min(i64::MAX as u64);
    let measurements = db::measurements::fetch(
        &state.db,
        &name,
        Some(PAGE_SIZE as i64),
        Some(offset as i64),
    )
    .await?;

    Ok(Json(MeasurementsPage {
        name,
        page,
        total,
        measurements,
        pages,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GraphQuery {
    #[serde(default = "default_left_axis")]
    pub left_axis: String,
    #[serde(default = "default_right_axis")]
    pub right_axis: String,
}

fn default_left_axis() -> String {
    "voltage".to_string()
}

fn default_right_axis() -> String {
    "current".to_string()
}

/// One graph sample pairing the two requested axes
#[derive(Debug, Serialize)]
pub struct GraphPoint {
    pub time: String,
    pub left: f64,
    pub right: f64,
}

/// GET /api/sessions/{name}/graph?left_axis=voltage&right_axis=current
pub async fn session_graph(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<GraphQuery>,
) -> ApiResult<Json<Vec<GraphPoint>>> {
    let name = db::measurements::resolve_session(&state.db, &name).await?;

    let probe = Measurement::from_sample("", 0.0, 0.0, 0.0);
    for axis in [&query.left_axis, &query.right_axis] {
        if probe.numeric_field(axis).is_none() {
            return Err(ApiError::BadRequest(format!("Unknown graph axis: {axis}")));
        }
    }

    let measurements = db::measurements::fetch(&state.db, &name, None, None).await?;
    let points = measurements
        .iter()
        .map(|m| GraphPoint {
            time: time::format_timestamp(m.timestamp),
            // Axis names were validated above
            left: m.numeric_field(&query.left_axis).unwrap_or_default(),
            right: m.numeric_field(&query.right_axis).unwrap_or_default(),
        })
        .collect();

    Ok(Json(points))
}

#[derive(Debug, Serialize)]
pub struct DestroyResponse {
    pub name: String,
    pub deleted: u64,
}

/// DELETE /api/sessions/{name}
pub async fn destroy_session(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DestroyResponse>> {
    let deleted = db::measurements::destroy(&state.db, &name).await?;
    tracing::info!(session = %name, deleted, "Session measurements deleted");

    Ok(Json(DestroyResponse { name, deleted }))
}

/// Build session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:name/measurements", get(session_measurements))
        .route("/api/sessions/:name/graph", get(session_graph))
        .route("/api/sessions/:name/export", get(super::export::export_csv))
        .route("/api/sessions/:name", delete(destroy_session))
}
