//! Device session abstraction
//!
//! The import pipeline pulls decoded records through the [`DeviceSession`]
//! trait and never touches transport specifics. Hardware transports (serial,
//! BLE) implement the trait outside this crate; the in-tree implementation is
//! a simulated device used for demos and tests.

pub mod sim;

use async_trait::async_trait;
use thiserror::Error;

pub use sim::SimulatedDeviceFactory;

/// Device-level failure; caught at the import coordinator boundary and never
/// allowed to crash the host process.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Failed to connect: {0}")]
    Connect(String),

    #[error("Device I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// One decoded device sample. The recording protocols supply only voltage
/// and current; derived and accumulated fields are filled in downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRecord {
    pub voltage: f64,
    pub current: f64,
}

/// Stored device settings (editable at runtime through the settings API)
#[derive(Debug, Clone)]
pub struct DeviceSettings {
    /// Device model identifier, e.g. "UM34C"
    pub version: String,
    /// Serial port path; empty when not configured
    pub port: String,
    /// Sample rate in records per second
    pub rate: f64,
}

/// One device connection producing a finite, pull-based record stream.
///
/// The stream is not restartable: once `next_record` returns `Ok(None)` or
/// an error, the session is spent. `disconnect` must be safe to call even
/// when `connect` failed or was never reached.
#[async_trait]
pub trait DeviceSession: Send {
    async fn connect(&mut self) -> Result<(), DeviceError>;

    /// Pull the next decoded record; `Ok(None)` means the stream is
    /// exhausted without error.
    async fn next_record(&mut self) -> Result<Option<DeviceRecord>, DeviceError>;

    /// Release the connection, best-effort.
    async fn disconnect(&mut self);
}

/// Opens device sessions from stored settings
pub trait DeviceFactory: Send + Sync {
    fn open(&self, settings: &DeviceSettings) -> Result<Box<dyn DeviceSession>, DeviceError>;
}
