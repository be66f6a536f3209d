//! voltlog-web - Power measurement recording service
//!
//! Records time-series measurements from a power-meter device into named
//! sessions and serves them back over HTTP as paged views, graph series,
//! and CSV exports.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voltlog_common::config::ServiceConfig;
use voltlog_web::device::{DeviceFactory, SimulatedDeviceFactory};
use voltlog_web::AppState;

#[derive(Parser, Debug)]
#[command(name = "voltlog-web", version, about = "Power measurement recorder")]
struct Args {
    /// Configuration file path
    #[arg(long, env = "VOLTLOG_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP bind address, overrides the configuration file
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Starting voltlog-web");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = ServiceConfig::load(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    info!("Database: {}", config.database.display());
    let db_pool = voltlog_web::db::init_database_pool(&config.database).await?;
    info!("Database connection established");

    let devices: Arc<dyn DeviceFactory> = match config.device.kind.as_str() {
        "simulated" => Arc::new(SimulatedDeviceFactory::new(config.device.simulated_samples)),
        other => anyhow::bail!(
            "Unknown device kind '{other}'; only 'simulated' ships in-tree, \
             hardware transports implement the device session trait externally"
        ),
    };
    info!("Device transport: {}", config.device.kind);

    let state = AppState::new(db_pool, devices);
    let app = voltlog_web::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("Listening on http://{}", config.listen);

    axum::serve(listener, app).await?;

    Ok(())
}
