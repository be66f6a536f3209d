//! Shared types for voltlog
//!
//! Common pieces used by the voltlog service crates: the error taxonomy,
//! the measurement data model, service configuration, and elapsed-time
//! formatting.

pub mod config;
pub mod error;
pub mod time;
pub mod types;

pub use error::{Error, Result};
pub use types::{ConnectionStatus, Measurement};
