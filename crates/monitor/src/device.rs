//! Wearable Device Simulator

use crate::settings::DeviceSettings;
use alerting::Alert;
use chrono::{DateTime, Utc};
use registry::{MonitoringRegistry, RegistryError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::info;
use vitals::{DoctorId, PatientId, Reading};

/// One scripted measurement.
///
/// Without a `timestamp` the reading is stamped when the device records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedReading {
    pub heart_rate: i32,
    pub systolic: i32,
    pub diastolic: i32,
    pub oxygen_saturation: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ScriptedReading {
    pub fn new(heart_rate: i32, systolic: i32, diastolic: i32, oxygen_saturation: i32) -> Self {
        Self {
            heart_rate,
            systolic,
            diastolic,
            oxygen_saturation,
            timestamp: None,
        }
    }

    /// Pin the measurement time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Reading as recorded at `now`, unless a time was scripted
    pub fn record(&self, now: DateTime<Utc>) -> Reading {
        Reading::new(
            self.heart_rate,
            self.systolic,
            self.diastolic,
            self.oxygen_saturation,
        )
        .at(self.timestamp.unwrap_or(now))
    }
}

/// Wearable that replays a scripted sequence of readings
#[derive(Debug, Clone)]
pub struct WearableDevice {
    id: String,
    patient_id: PatientId,
    device_type: String,
    reviewer: DoctorId,
    readings: VecDeque<ScriptedReading>,
}

impl WearableDevice {
    pub fn new(
        id: impl Into<String>,
        patient_id: PatientId,
        device_type: impl Into<String>,
        reviewer: DoctorId,
    ) -> Self {
        Self {
            id: id.into(),
            patient_id,
            device_type: device_type.into(),
            reviewer,
            readings: VecDeque::new(),
        }
    }

    pub fn with_readings(mut self, readings: impl IntoIterator<Item = ScriptedReading>) -> Self {
        self.readings.extend(readings);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    pub fn reviewer(&self) -> &DoctorId {
        &self.reviewer
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }

    /// Next scripted reading, `None` once the script is exhausted
    pub fn record_vital_signs(&mut self) -> Option<Reading> {
        let reading = self.readings.pop_front()?.record(Utc::now());
        info!("{} {} recorded: {}", self.device_type, self.id, reading);
        Some(reading)
    }

    /// Send a reading to the registry on behalf of the paired patient
    pub fn transmit(
        &self,
        registry: &mut MonitoringRegistry,
        reading: Reading,
    ) -> Result<Option<Alert>, RegistryError> {
        info!("{} transmitting data for patient {}", self.id, self.patient_id);
        registry.transmit(&self.patient_id, reading)
    }
}

impl From<DeviceSettings> for WearableDevice {
    fn from(settings: DeviceSettings) -> Self {
        WearableDevice::new(
            settings.id,
            settings.patient_id,
            settings.device_type,
            settings.reviewer,
        )
        .with_readings(settings.readings)
    }
}
