//! CSV export engine
//!
//! Turns a session's time-ordered measurement series into CSV rows with two
//! derived elapsed-time columns. Rows are produced one at a time; the HTTP
//! layer owns the transport and streams the body, so memory use is
//! independent of session size.
//!
//! The run-start anchor is the timestamp of the first measurement whose
//! resistance is below [`LOAD_RESISTANCE_THRESHOLD`]; above it the device is
//! reading an open circuit, so nothing is actually running yet. Before the
//! anchor is found elapsed time is zero; once found it stays fixed for the
//! rest of the stream even if the resistance rises above the threshold again.

use voltlog_common::{time, Error, Measurement, Result};

/// Resistance readings at or above this value flag an open or disconnected
/// load.
pub const LOAD_RESISTANCE_THRESHOLD: f64 = 9999.9;

/// Raw stored columns passed through verbatim: (field name, header title)
const RAW_FIELDS: &[(&str, &str)] = &[
    ("timestamp", "Timestamp"),
    ("voltage", "Voltage (V)"),
    ("current", "Current (A)"),
    ("power", "Power (W)"),
    ("temperature", "Temperature"),
    ("data_plus", "Data+ (V)"),
    ("data_minus", "Data- (V)"),
    ("mode_id", "Mode ID"),
    ("accumulated_current", "Accumulated current (mAh)"),
    ("accumulated_power", "Accumulated power (mWh)"),
    ("accumulated_time", "Accumulated time (s)"),
    ("resistance", "Resistance (Ohm)"),
];

/// Default export column order when the caller does not specify one
pub const DEFAULT_FIELDS: &[&str] = &[
    "time",
    "run_time",
    "run_time_seconds",
    "voltage",
    "current",
    "power",
    "temperature",
    "data_plus",
    "data_minus",
    "mode_name",
    "accumulated_current",
    "accumulated_power",
    "accumulated_time",
    "resistance",
];

/// One resolved output column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    /// Combined human-readable timestamp
    Time,
    /// Elapsed time since the run-start anchor, `HH:MM:SS`
    RunTime,
    /// Elapsed time since the run-start anchor, integer seconds
    RunTimeSeconds,
    /// Stored mode name, empty when NULL
    ModeName,
    /// Stored numeric field passed through verbatim
    Raw {
        field: &'static str,
        title: &'static str,
    },
}

impl Column {
    fn resolve(name: &str) -> Option<Column> {
        match name {
            "time" => Some(Column::Time),
            "run_time" => Some(Column::RunTime),
            "run_time_seconds" => Some(Column::RunTimeSeconds),
            "mode_name" => Some(Column::ModeName),
            _ => RAW_FIELDS
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(field, title)| Column::Raw { field, title }),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Column::Time => "Time",
            Column::RunTime => "Run time",
            Column::RunTimeSeconds => "Run time (seconds)",
            Column::ModeName => "Mode",
            Column::Raw { title, .. } => title,
        }
    }
}

/// Streams one session into CSV-compatible rows.
///
/// Stateful: the exporter tracks the run-start anchor across rows, so it
/// must see the series in ascending timestamp order (the store's fetch
/// guarantees that ordering).
#[derive(Debug)]
pub struct CsvExporter {
    columns: Vec<Column>,
    anchor: Option<f64>,
}

impl CsvExporter {
    /// Resolve an ordered, caller-specified column list.
    ///
    /// Fails fast with a validation error on an unknown column name, before
    /// any row is produced.
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::Validation(
                "Export requires at least one column".to_string(),
            ));
        }

        let columns = fields
            .iter()
            .map(|name| {
                Column::resolve(name.as_ref())
                    .ok_or_else(|| Error::Validation(format!("Unknown export column: {}", name.as_ref())))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            columns,
            anchor: None,
        })
    }

    /// Exporter over the default column list
    pub fn with_default_fields() -> Self {
        Self {
            columns: DEFAULT_FIELDS
                .iter()
                .filter_map(|name| Column::resolve(name))
                .collect(),
            anchor: None,
        }
    }

    /// Header row: human-readable column titles in caller order
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.title().to_string()).collect()
    }

    /// Render one measurement into a row, advancing anchor state.
    pub fn row(&mut self, m: &Measurement) -> Vec<String> {
        if self.anchor.is_none() && m.resistance < LOAD_RESISTANCE_THRESHOLD {
            self.anchor = Some(m.timestamp);
        }

        let elapsed = match self.anchor {
            Some(anchor) => (m.timestamp - anchor).floor() as i64,
            None => 0,
        };

        self.columns
            .iter()
            .map(|column| match column {
                Column::Time => time::format_timestamp(m.timestamp),
                Column::RunTime => time::format_run_time(elapsed),
                Column::RunTimeSeconds => elapsed.to_string(),
                Column::ModeName => m.mode_name.clone().unwrap_or_default(),
                Column::Raw { field, .. } => m
                    .numeric_field(field)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }
}
