//! Simulated power-meter device
//!
//! Produces a finite stream of plausible USB-load samples (5 V bus, slow
//! current ripple) without any hardware attached. Wired in when the service
//! is configured with `device.kind = "simulated"`.

use async_trait::async_trait;

use super::{DeviceError, DeviceFactory, DeviceRecord, DeviceSession, DeviceSettings};

/// Factory producing [`SimulatedDevice`] sessions of a fixed length
pub struct SimulatedDeviceFactory {
    samples: u32,
}

impl SimulatedDeviceFactory {
    pub fn new(samples: u32) -> Self {
        Self { samples }
    }
}

impl DeviceFactory for SimulatedDeviceFactory {
    fn open(&self, _settings: &DeviceSettings) -> Result<Box<dyn DeviceSession>, DeviceError> {
        Ok(Box::new(SimulatedDevice::new(self.samples)))
    }
}

/// A single simulated recording
pub struct SimulatedDevice {
    remaining: u32,
    index: u32,
    connected: bool,
}

impl SimulatedDevice {
    pub fn new(samples: u32) -> Self {
        Self {
            remaining: samples,
            index: 0,
            connected: false,
        }
    }
}

#[async_trait]
impl DeviceSession for SimulatedDevice {
    async fn connect(&mut self) -> Result<(), DeviceError> {
        self.connected = true;
        Ok(())
    }

    async fn next_record(&mut self) -> Result<Option<DeviceRecord>, DeviceError> {
        if !self.connected {
            return Err(DeviceError::Protocol("Read before connect".to_string()));
        }
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let phase = self.index as f64 / 10.0;
        self.index += 1;

        Ok(Some(DeviceRecord {
            voltage: 5.0 + 0.05 * phase.sin(),
            current: 0.5 + 0.1 * (phase / 3.0).cos(),
        }))
    }

    async fn disconnect(&mut self) {
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produces_requested_sample_count() {
        let mut device = SimulatedDevice::new(3);
        device.connect().await.unwrap();

        let mut count = 0;
        while let Some(record) = device.next_record().await.unwrap() {
            assert!(record.voltage > 4.0 && record.voltage < 6.0);
            count += 1;
        }
        assert_eq!(count, 3);

        device.disconnect().await;
    }

    #[tokio::test]
    async fn read_before_connect_is_a_protocol_error() {
        let mut device = SimulatedDevice::new(3);
        assert!(device.next_record().await.is_err());
    }
}
