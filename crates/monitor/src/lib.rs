//! Remote Health Monitoring Driver
//!
//! Wires the core crates together: loads the roster from [`Settings`],
//! replays simulated wearable readings through the registry, and runs the
//! doctor review workflow for every alert raised.

pub mod device;
pub mod settings;
pub mod workflow;

pub use device::{ScriptedReading, WearableDevice};
pub use settings::{DeviceSettings, LoggingSettings, Settings};
pub use workflow::{
    review_latest_alert, run_device, Appointment, CycleOutcome, LoggingScheduler, WorkflowError,
};

use alerting::Alert;
use anyhow::{Context, Result};
use recommendation::RecommendationEngine;
use registry::{MonitoringRegistry, RegistryError, SystemStatus};
use serde::Serialize;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vitals::ThresholdEvaluator;

/// Everything a monitoring run produced
#[derive(Debug, Serialize)]
pub struct Report {
    pub status: SystemStatus,
    pub outcomes: Vec<CycleOutcome>,
    pub alerts: Vec<Alert>,
    pub appointments: Vec<Appointment>,
}

/// Initialize logging
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let level = Level::from_str(&settings.level)
        .with_context(|| format!("Invalid log level: {}", settings.level))?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
    .context("Failed to set tracing subscriber")
}

/// Build a registry and register the configured patients and doctors
pub fn build_registry(settings: &Settings) -> Result<MonitoringRegistry, RegistryError> {
    let evaluator = ThresholdEvaluator::new(settings.thresholds.clone());
    let mut registry = MonitoringRegistry::new(settings.system_name.clone(), evaluator);

    for patient in &settings.patients {
        registry.register_patient(patient.clone())?;
    }
    for doctor in &settings.doctors {
        registry.register_doctor(doctor.clone())?;
    }

    Ok(registry)
}

/// Run one monitoring cycle per configured device
pub fn run(settings: &Settings) -> Result<Report> {
    let mut registry = build_registry(settings).context("Failed to register roster")?;
    let engine = RecommendationEngine::default().with_templates(settings.recommendations.clone());
    let mut scheduler = LoggingScheduler::new();
    let mut outcomes = Vec::new();

    for device_settings in &settings.devices {
        let mut device = WearableDevice::from(device_settings.clone());
        info!(
            "Monitoring cycle: device {} ({}) for patient {}",
            device.id(),
            device.device_type(),
            device.patient_id()
        );

        let cycle = run_device(
            &mut registry,
            &engine,
            &mut scheduler,
            &mut device,
            settings.follow_up_at,
        )
        .with_context(|| format!("Monitoring cycle failed for device {}", device.id()))?;
        outcomes.extend(cycle);
    }

    let status = registry.status();
    info!("Run complete: {} alerts, {} unresolved", status.total_alerts, status.unresolved_alerts);

    Ok(Report {
        status,
        outcomes,
        alerts: registry.alerts().to_vec(),
        appointments: scheduler.appointments().to_vec(),
    })
}
