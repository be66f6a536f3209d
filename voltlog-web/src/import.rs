//! Single-flight import pipeline
//!
//! Drives one device session at a time, converting its decoded record stream
//! into persisted measurements. Exclusivity is enforced with a compare-and-
//! swap on a single flag owned by the coordinator: imports are user-triggered
//! and rare, so mutual exclusion without fairness or queuing is enough. A
//! concurrent start observes the flag already set and is rejected
//! immediately, never blocked or queued.

use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use voltlog_common::{ConnectionStatus, Error, Measurement, Result};

use crate::db;
use crate::device::{DeviceFactory, DeviceSession, DeviceSettings};

/// Terminal result of one import run.
///
/// Device and storage failures are data, not panics: the run aborts, rows
/// already written stay (a valid prefix), and the caller gets a summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ImportOutcome {
    /// Stream exhausted without error
    Completed { records: u64 },
    /// Device or storage failure mid-run; `records` rows were kept
    DeviceFailed { records: u64, message: String },
}

/// Owns the import state machine and its exclusivity gate
pub struct ImportCoordinator {
    db: SqlitePool,
    in_progress: Arc<AtomicBool>,
}

/// Clears the in-progress flag when the run ends, on every exit path
/// including unwinding. Owns its flag so it can travel into the run task.
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ImportCoordinator {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a run is currently active
    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Run one import to completion (or failure).
    ///
    /// Rejected with [`Error::Validation`] on an empty session name and with
    /// [`Error::ImportBusy`] while another run is active; both happen before
    /// the factory is even consulted, so a rejected request performs no
    /// device I/O. The device is opened only after the gate is acquired.
    /// Device and storage failures mid-run are returned as
    /// [`ImportOutcome::DeviceFailed`] with the full diagnostic appended to
    /// the operational log, and the device is disconnected exactly once on
    /// every path that reached it. The run itself executes in a spawned task:
    /// if the caller goes away mid-run, the run still finishes, disconnects
    /// the device, and releases the gate.
    pub async fn start(
        &self,
        session_name: &str,
        factory: &dyn DeviceFactory,
        settings: &DeviceSettings,
    ) -> Result<ImportOutcome> {
        let name = session_name.trim();
        if name.is_empty() {
            return Err(Error::Validation(
                "Session name must not be empty".to_string(),
            ));
        }

        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::ImportBusy)?;
        let guard = RunGuard(self.in_progress.clone());

        // The gate is held here, so an open failure cannot shadow a busy
        // rejection; the guard releases it on this early return.
        let device = factory
            .open(settings)
            .map_err(|e| Error::Device(format!("Failed to open device: {e}")))?;

        let task = tokio::spawn(run_session(
            self.db.clone(),
            name.to_string(),
            device,
            guard,
        ));
        task.await
            .map_err(|e| Error::Internal(format!("Import task failed: {e}")))
    }
}

/// One complete run: status transitions, the record loop, device release,
/// and failure diagnostics. Owns the gate guard for its whole lifetime.
async fn run_session(
    db: SqlitePool,
    name: String,
    mut device: Box<dyn DeviceSession>,
    _guard: RunGuard,
) -> ImportOutcome {
    if let Err(e) = db::settings::set_status(&db, ConnectionStatus::Importing).await {
        warn!(error = %e, "Failed to record importing status");
    }

    info!(session = %name, "Import run started");
    let started = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;

    let result = run_loop(&db, &name, started, device.as_mut()).await;

    // Guaranteed release: disconnect runs before the outcome is even
    // inspected, success or failure alike.
    device.disconnect().await;

    if let Err(e) = db::settings::set_status(&db, ConnectionStatus::Disconnected).await {
        warn!(error = %e, "Failed to restore disconnected status");
    }

    match result {
        Ok(records) => {
            info!(session = %name, records, "Import run completed");
            ImportOutcome::Completed { records }
        }
        Err((records, error)) => {
            let detail = format!(
                "Import of session '{name}' failed: {:?}",
                anyhow::Error::new(error)
            );
            let message = first_line(&detail).to_string();

            warn!(session = %name, records, "{message}");

            // Best-effort: a failed log write must not mask the error
            // being recorded.
            if let Err(log_error) = db::log::append(&db, &detail).await {
                warn!(error = %log_error, "Failed to append import failure to operational log");
            }

            ImportOutcome::DeviceFailed { records, message }
        }
    }
}

/// Consume the record stream, one insert per record, in order, without
/// batching. Returns the number of rows written so far alongside any
/// error, so a failure still reports the persisted prefix.
async fn run_loop(
    db: &SqlitePool,
    name: &str,
    started: f64,
    device: &mut dyn DeviceSession,
) -> std::result::Result<u64, (u64, Error)> {
    if let Err(e) = device.connect().await {
        return Err((0, Error::Device(e.to_string())));
    }

    let mut written: u64 = 0;
    loop {
        let record = match device.next_record().await {
            Ok(Some(record)) => record,
            Ok(None) => break,
            Err(e) => return Err((written, Error::Device(e.to_string()))),
        };

        let timestamp = started + written as f64;
        let measurement =
            Measurement::from_sample(name, timestamp, record.voltage, record.current);

        if let Err(e) = db::measurements::insert(db, &measurement).await {
            return Err((written, e));
        }
        written += 1;
    }

    Ok(written)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}
