//! Shared test fixtures: in-memory database and scripted device sessions
#![allow(dead_code)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use voltlog_web::device::{
    DeviceError, DeviceFactory, DeviceRecord, DeviceSession, DeviceSettings,
};

pub async fn test_pool() -> SqlitePool {
    voltlog_web::db::connect_memory()
        .await
        .expect("in-memory database")
}

/// Device settings fixture matching the stored defaults
pub fn test_settings() -> DeviceSettings {
    DeviceSettings {
        version: "UM34C".to_string(),
        port: String::new(),
        rate: 1.0,
    }
}

/// Observable connect/disconnect counts for a device moved into the
/// coordinator
#[derive(Clone, Default)]
pub struct Counters {
    pub connects: Arc<AtomicUsize>,
    pub disconnects: Arc<AtomicUsize>,
}

impl Counters {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

pub enum Step {
    Record(DeviceRecord),
    Fail(String),
}

/// Replays a fixed script of records and failures
pub struct ScriptedDevice {
    steps: VecDeque<Step>,
    connect_error: Option<String>,
    counters: Counters,
}

impl ScriptedDevice {
    pub fn boxed(steps: Vec<Step>) -> (Box<dyn DeviceSession>, Counters) {
        let counters = Counters::default();
        let device = ScriptedDevice {
            steps: steps.into(),
            connect_error: None,
            counters: counters.clone(),
        };
        (Box::new(device), counters)
    }

    pub fn failing_connect(message: &str) -> (Box<dyn DeviceSession>, Counters) {
        let counters = Counters::default();
        let device = ScriptedDevice {
            steps: VecDeque::new(),
            connect_error: Some(message.to_string()),
            counters: counters.clone(),
        };
        (Box::new(device), counters)
    }
}

/// `count` records with recognizable voltages (5.00, 5.01, ...)
pub fn sample_steps(count: usize) -> Vec<Step> {
    (0..count)
        .map(|i| {
            Step::Record(DeviceRecord {
                voltage: 5.0 + i as f64 * 0.01,
                current: 0.5,
            })
        })
        .collect()
}

#[async_trait]
impl DeviceSession for ScriptedDevice {
    async fn connect(&mut self) -> Result<(), DeviceError> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        match self.connect_error.take() {
            Some(message) => Err(DeviceError::Connect(message)),
            None => Ok(()),
        }
    }

    async fn next_record(&mut self) -> Result<Option<DeviceRecord>, DeviceError> {
        match self.steps.pop_front() {
            Some(Step::Record(record)) => Ok(Some(record)),
            Some(Step::Fail(message)) => Err(DeviceError::Protocol(message)),
            None => Ok(None),
        }
    }

    async fn disconnect(&mut self) {
        self.counters.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Parks inside the record stream until released, to hold the import gate
/// open from a test
pub struct BlockingDevice {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
    pub counters: Counters,
}

#[async_trait]
impl DeviceSession for BlockingDevice {
    async fn connect(&mut self) -> Result<(), DeviceError> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        Ok(())
    }

    async fn next_record(&mut self) -> Result<Option<DeviceRecord>, DeviceError> {
        self.release.notified().await;
        Ok(None)
    }

    async fn disconnect(&mut self) {
        self.counters.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Factory handing out one device prepared by the test; counts opens so a
/// test can assert the factory was never consulted
pub struct StubFactory {
    device: std::sync::Mutex<Option<Box<dyn DeviceSession>>>,
    opens: Arc<AtomicUsize>,
}

impl StubFactory {
    pub fn with(device: Box<dyn DeviceSession>) -> Self {
        Self {
            device: std::sync::Mutex::new(Some(device)),
            opens: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl DeviceFactory for StubFactory {
    fn open(&self, _settings: &DeviceSettings) -> Result<Box<dyn DeviceSession>, DeviceError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.device
            .lock()
            .expect("factory lock")
            .take()
            .ok_or_else(|| DeviceError::Connect("no device available".to_string()))
    }
}

/// Factory whose open always fails, standing in for a held or missing port
pub struct FailingFactory {
    pub message: String,
    pub opens: Arc<AtomicUsize>,
}

impl FailingFactory {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            opens: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl DeviceFactory for FailingFactory {
    fn open(&self, _settings: &DeviceSettings) -> Result<Box<dyn DeviceSession>, DeviceError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Err(DeviceError::Connect(self.message.clone()))
    }
}

/// Factory handing out a fresh scripted recording per open
pub struct ScriptedFactory {
    pub samples: usize,
}

impl DeviceFactory for ScriptedFactory {
    fn open(&self, _settings: &DeviceSettings) -> Result<Box<dyn DeviceSession>, DeviceError> {
        let (device, _) = ScriptedDevice::boxed(sample_steps(self.samples));
        Ok(device)
    }
}

/// Factory handing out blocking devices that share one started/release pair
/// and one set of counters
pub struct BlockingFactory {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
    pub counters: Counters,
}

impl BlockingFactory {
    pub fn new() -> (Self, Arc<Notify>, Arc<Notify>) {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        (
            Self {
                started: started.clone(),
                release: release.clone(),
                counters: Counters::default(),
            },
            started,
            release,
        )
    }
}

impl DeviceFactory for BlockingFactory {
    fn open(&self, _settings: &DeviceSettings) -> Result<Box<dyn DeviceSession>, DeviceError> {
        Ok(Box::new(BlockingDevice {
            started: self.started.clone(),
            release: self.release.clone(),
            counters: self.counters.clone(),
        }))
    }
}
