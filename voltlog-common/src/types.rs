//! Core data model: measurements and connection status

use serde::{Deserialize, Serialize};

/// One stored sample belonging to a named session.
///
/// Immutable once stored. Within a session, ordering is by ascending
/// `timestamp`; within one import run timestamps are strictly increasing
/// (`start_time + sequence_index`). Fields the device protocol does not
/// supply are stored as zero (`mode_name` as NULL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Measurement {
    /// Session name this sample belongs to
    pub name: String,
    /// Sample time in seconds (device or wall-clock time)
    pub timestamp: f64,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub temperature: f64,
    pub data_plus: f64,
    pub data_minus: f64,
    pub mode_id: i64,
    pub mode_name: Option<String>,
    pub accumulated_current: f64,
    pub accumulated_power: f64,
    pub accumulated_time: f64,
    pub resistance: f64,
}

impl Measurement {
    /// Build a measurement from one decoded device sample.
    ///
    /// Only voltage and current come from the device; every other field is
    /// zero-valued and `mode_name` is NULL.
    pub fn from_sample(name: &str, timestamp: f64, voltage: f64, current: f64) -> Self {
        Self {
            name: name.to_string(),
            timestamp,
            voltage,
            current,
            power: 0.0,
            temperature: 0.0,
            data_plus: 0.0,
            data_minus: 0.0,
            mode_id: 0,
            mode_name: None,
            accumulated_current: 0.0,
            accumulated_power: 0.0,
            accumulated_time: 0.0,
            resistance: 0.0,
        }
    }

    /// Look up a numeric field by its stored column name.
    ///
    /// Returns `None` for unknown names and for `mode_name` (not numeric).
    pub fn numeric_field(&self, field: &str) -> Option<f64> {
        match field {
            "timestamp" => Some(self.timestamp),
            "voltage" => Some(self.voltage),
            "current" => Some(self.current),
            "power" => Some(self.power),
            "temperature" => Some(self.temperature),
            "data_plus" => Some(self.data_plus),
            "data_minus" => Some(self.data_minus),
            "mode_id" => Some(self.mode_id as f64),
            "accumulated_current" => Some(self.accumulated_current),
            "accumulated_power" => Some(self.accumulated_power),
            "accumulated_time" => Some(self.accumulated_time),
            "resistance" => Some(self.resistance),
            _ => None,
        }
    }
}

/// Connection status snapshot exposed to callers to gate UI actions.
///
/// The import coordinator is the only writer of transitions into and out of
/// `Importing`; live-capture components own the remaining transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Importing,
    Error,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Importing => "importing",
            ConnectionStatus::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "disconnected" => Some(ConnectionStatus::Disconnected),
            "connecting" => Some(ConnectionStatus::Connecting),
            "connected" => Some(ConnectionStatus::Connected),
            "importing" => Some(ConnectionStatus::Importing),
            "error" => Some(ConnectionStatus::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_fields_default_to_zero() {
        let m = Measurement::from_sample("run", 100.0, 5.02, 0.45);
        assert_eq!(m.voltage, 5.02);
        assert_eq!(m.current, 0.45);
        assert_eq!(m.power, 0.0);
        assert_eq!(m.mode_id, 0);
        assert_eq!(m.mode_name, None);
        assert_eq!(m.resistance, 0.0);
    }

    #[test]
    fn numeric_field_lookup() {
        let m = Measurement::from_sample("run", 100.0, 5.0, 0.5);
        assert_eq!(m.numeric_field("voltage"), Some(5.0));
        assert_eq!(m.numeric_field("timestamp"), Some(100.0));
        assert_eq!(m.numeric_field("mode_name"), None);
        assert_eq!(m.numeric_field("bogus"), None);
    }

    #[test]
    fn status_round_trip() {
        for status in [
            ConnectionStatus::Disconnected,
            ConnectionStatus::Connecting,
            ConnectionStatus::Connected,
            ConnectionStatus::Importing,
            ConnectionStatus::Error,
        ] {
            assert_eq!(ConnectionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ConnectionStatus::parse("bogus"), None);
    }
}
