//! Service configuration loading
//!
//! Bootstrap configuration comes from a TOML file resolved in priority
//! order: command-line argument, `VOLTLOG_CONFIG` environment variable,
//! platform config directory, compiled defaults. Per-device settings
//! (port, poll rate, default session name) live in the database settings
//! table instead and are editable at runtime.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP bind address
    #[serde(default = "default_listen")]
    pub listen: String,
    /// SQLite database file path
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Device transport configuration
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Device transport selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Transport kind; only "simulated" ships in-tree, hardware transports
    /// implement the device session trait externally
    #[serde(default = "default_device_kind")]
    pub kind: String,
    /// Number of samples one simulated recording produces
    #[serde(default = "default_simulated_samples")]
    pub simulated_samples: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            database: default_database(),
            device: DeviceConfig::default(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            kind: default_device_kind(),
            simulated_samples: default_simulated_samples(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:5040".to_string()
}

fn default_database() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("voltlog").join("voltlog.db"))
        .unwrap_or_else(|| PathBuf::from("voltlog.db"))
}

fn default_device_kind() -> String {
    "simulated".to_string()
}

fn default_simulated_samples() -> u32 {
    60
}

impl ServiceConfig {
    /// Load configuration from an explicit path, or from the default
    /// platform location when none is given. A missing default file yields
    /// compiled defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = default_config_path();
                match default_path {
                    Some(path) if path.exists() => Self::from_file(&path),
                    _ => Ok(Self::default()),
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// Default configuration file path for the platform
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("voltlog").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen, "127.0.0.1:5040");
        assert_eq!(config.device.kind, "simulated");
        assert_eq!(config.device.simulated_samples, 60);
    }

    #[test]
    fn parse_partial_toml() {
        let config: ServiceConfig = toml::from_str(
            r#"
            listen = "0.0.0.0:8080"

            [device]
            kind = "simulated"
            simulated_samples = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.device.simulated_samples, 10);
        assert_eq!(config.database, default_database());
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listen, "127.0.0.1:5040");
    }
}
