//! HTTP API handlers for voltlog-web
//!
//! Thin JSON+CSV shell over the import coordinator, the measurement store,
//! and the export engine. Clients poll; nothing is pushed.

pub mod export;
pub mod health;
pub mod import;
pub mod log;
pub mod sessions;
pub mod settings;
pub mod status;

pub use health::health_routes;
pub use import::import_routes;
pub use log::log_routes;
pub use sessions::session_routes;
pub use settings::settings_routes;
pub use status::status_routes;
