//! voltlog-web library interface
//!
//! Records time-series measurements streamed from a power-meter device,
//! persists them under named sessions, and serves them back as paged JSON
//! views, graph series, and streamed CSV exports.

pub mod api;
pub mod db;
pub mod device;
pub mod error;
pub mod export;
pub mod import;
pub mod pagination;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::device::DeviceFactory;
use crate::import::ImportCoordinator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Single-flight import coordinator; the only cross-request shared
    /// mutable state
    pub importer: Arc<ImportCoordinator>,
    /// Opens device sessions from stored settings
    pub devices: Arc<dyn DeviceFactory>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, devices: Arc<dyn DeviceFactory>) -> Self {
        Self {
            importer: Arc::new(ImportCoordinator::new(db.clone())),
            db,
            devices,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::status_routes())
        .merge(api::import_routes())
        .merge(api::session_routes())
        .merge(api::settings_routes())
        .merge(api::log_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
