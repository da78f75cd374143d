//! Monitor Settings
//!
//! Layered configuration: serde defaults, then an optional TOML file, then
//! `RHMS__*` environment variables (e.g. `RHMS__SYSTEM_NAME`,
//! `RHMS__LOGGING__LEVEL`).

use crate::device::ScriptedReading;
use chrono::{DateTime, TimeZone, Utc};
use config::{Config, ConfigError, Environment, File};
use recommendation::TemplateEntry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vitals::{ChronicCondition, Doctor, DoctorId, Patient, PatientId, ThresholdConfig};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Maximum level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// A simulated wearable and the doctor reviewing its alerts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSettings {
    pub id: String,
    pub patient_id: PatientId,
    pub device_type: String,
    pub reviewer: DoctorId,
    /// Readings replayed in order, one per monitoring cycle
    #[serde(default)]
    pub readings: Vec<ScriptedReading>,
}

/// Monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub system_name: String,
    pub logging: LoggingSettings,
    /// Appointment time handed to the follow-up scheduler
    pub follow_up_at: DateTime<Utc>,
    pub thresholds: ThresholdConfig,
    /// Extra or replacement recommendation templates
    pub recommendations: Vec<TemplateEntry>,
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub devices: Vec<DeviceSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            system_name: "RHMS-NEU-2025".to_string(),
            logging: LoggingSettings::default(),
            follow_up_at: Utc
                .with_ymd_and_hms(2025, 12, 1, 10, 0, 0)
                .single()
                .unwrap_or_default(),
            thresholds: ThresholdConfig::default(),
            recommendations: Vec::new(),
            patients: vec![
                Patient::new(
                    "P001",
                    "Ali Yilmaz",
                    58,
                    ChronicCondition::Hypertension,
                    "+90-555-1234",
                ),
                Patient::new(
                    "P002",
                    "Ayse Demir",
                    45,
                    ChronicCondition::Diabetes,
                    "+90-555-5678",
                ),
                Patient::new(
                    "P003",
                    "Mehmet Kaya",
                    62,
                    ChronicCondition::Hypertension,
                    "+90-555-9012",
                ),
            ],
            doctors: vec![
                Doctor::new("D001", "Dr. Elif Ozturk", "Cardiology", "+90-555-1111"),
                Doctor::new("D002", "Dr. Can Arslan", "Endocrinology", "+90-555-2222"),
            ],
            devices: vec![
                DeviceSettings {
                    id: "WD001".to_string(),
                    patient_id: PatientId::new("P001"),
                    device_type: "Smartwatch".to_string(),
                    reviewer: DoctorId::new("D001"),
                    readings: vec![ScriptedReading::new(145, 190, 100, 85)],
                },
                DeviceSettings {
                    id: "WD002".to_string(),
                    patient_id: PatientId::new("P002"),
                    device_type: "Fitness Band".to_string(),
                    reviewer: DoctorId::new("D002"),
                    readings: vec![
                        ScriptedReading::new(75, 118, 78, 98),
                        ScriptedReading::new(112, 128, 82, 96),
                    ],
                },
                DeviceSettings {
                    id: "WD003".to_string(),
                    patient_id: PatientId::new("P003"),
                    device_type: "Smartwatch".to_string(),
                    reviewer: DoctorId::new("D001"),
                    readings: vec![ScriptedReading::new(88, 150, 95, 96)],
                },
            ],
        }
    }
}

impl Settings {
    /// Load settings, using `path` when given or `rhms.toml` in the working
    /// directory if present
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("rhms").required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("RHMS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
