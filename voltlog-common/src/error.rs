//! Common error types for voltlog

use thiserror::Error;

/// Common result type for voltlog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the voltlog crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter; rejected before any I/O
    #[error("Invalid input: {0}")]
    Validation(String),

    /// An import run is already active; later requests are rejected, not queued
    #[error("Import is already running")]
    ImportBusy,

    /// Device connect, read, or protocol failure
    #[error("Device error: {0}")]
    Device(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
