//! Monitoring Cycle and Doctor Review Workflow

use crate::device::WearableDevice;
use alerting::Alert;
use chrono::{DateTime, Utc};
use recommendation::{
    FollowUpError, FollowUpScheduler, RecommendationEngine, RecommendationError, Review,
};
use registry::{MonitoringRegistry, RegistryError};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use vitals::{Doctor, DoctorId, Patient, PatientId, Reading};

/// Workflow errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    #[error(transparent)]
    FollowUp(#[from] FollowUpError),
}

/// A booked follow-up appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub at: DateTime<Utc>,
}

/// Scheduler that logs and keeps every booking in memory
#[derive(Debug, Default)]
pub struct LoggingScheduler {
    appointments: Vec<Appointment>,
}

impl LoggingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }
}

impl FollowUpScheduler for LoggingScheduler {
    fn schedule_follow_up(
        &mut self,
        patient: &Patient,
        doctor: &Doctor,
        at: DateTime<Utc>,
    ) -> Result<(), FollowUpError> {
        info!(
            "Follow-up scheduled: {} with {} at {}",
            patient.name(),
            doctor.name(),
            at.format("%Y-%m-%d %H:%M")
        );
        self.appointments.push(Appointment {
            patient_id: patient.id().clone(),
            doctor_id: doctor.id().clone(),
            at,
        });
        Ok(())
    }
}

/// Outcome of one reading going through the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutcome {
    pub device_id: String,
    pub patient_id: PatientId,
    pub reading: Reading,
    pub alert: Option<Alert>,
    pub review: Option<Review>,
    /// Set when the reading was rejected as physically impossible
    pub rejected: Option<String>,
}

/// Doctor reviews the patient's active alert.
///
/// Books a follow-up when the review calls for one, then resolves the alert.
/// Returns `None` when the patient has no unresolved alert.
pub fn review_latest_alert(
    registry: &mut MonitoringRegistry,
    engine: &RecommendationEngine,
    scheduler: &mut dyn FollowUpScheduler,
    doctor_id: &DoctorId,
    patient_id: &PatientId,
    follow_up_at: DateTime<Utc>,
) -> Result<Option<Review>, WorkflowError> {
    let alert = match registry.find_most_recent_unresolved_alert(patient_id) {
        Some(alert) => alert.clone(),
        None => return Ok(None),
    };
    let patient = registry.patient(patient_id)?.clone();
    let doctor = registry.doctor(doctor_id)?.clone();

    info!("{} reviewing alert {}", doctor.name(), alert.id());
    let review = engine.review(&alert, &patient)?;

    if review.needs_follow_up {
        scheduler.schedule_follow_up(&patient, &doctor, follow_up_at)?;
    }
    registry.resolve_alert(alert.id())?;

    Ok(Some(review))
}

/// Replay every scripted reading of a device through transmit and review.
///
/// Physically impossible readings are logged and skipped; any other error
/// stops the cycle.
pub fn run_device(
    registry: &mut MonitoringRegistry,
    engine: &RecommendationEngine,
    scheduler: &mut dyn FollowUpScheduler,
    device: &mut WearableDevice,
    follow_up_at: DateTime<Utc>,
) -> Result<Vec<CycleOutcome>, WorkflowError> {
    let mut outcomes = Vec::with_capacity(device.remaining());

    while let Some(reading) = device.record_vital_signs() {
        let mut outcome = CycleOutcome {
            device_id: device.id().to_string(),
            patient_id: device.patient_id().clone(),
            reading: reading.clone(),
            alert: None,
            review: None,
            rejected: None,
        };

        match device.transmit(registry, reading) {
            Ok(Some(alert)) => {
                outcome.alert = Some(alert);
                outcome.review = review_latest_alert(
                    registry,
                    engine,
                    scheduler,
                    device.reviewer(),
                    device.patient_id(),
                    follow_up_at,
                )?;
            }
            Ok(None) => info!("No doctor review needed for {}: vitals normal", device.patient_id()),
            Err(RegistryError::InvalidReading(err)) => {
                warn!("Skipping reading from {}: {}", device.id(), err);
                outcome.rejected = Some(err.to_string());
            }
            Err(err) => return Err(err.into()),
        }

        outcomes.push(outcome);
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ScriptedReading;
    use chrono::TimeZone;
    use vitals::{ChronicCondition, Severity};

    struct RejectingScheduler;

    impl FollowUpScheduler for RejectingScheduler {
        fn schedule_follow_up(
            &mut self,
            _: &Patient,
            _: &Doctor,
            _: DateTime<Utc>,
        ) -> Result<(), FollowUpError> {
            Err(FollowUpError::Rejected("calendar full".to_string()))
        }
    }

    fn registry() -> MonitoringRegistry {
        let mut registry = MonitoringRegistry::default();
        registry
            .register_patient(Patient::new(
                "P001",
                "Ali Yilmaz",
                58,
                ChronicCondition::Hypertension,
                "-",
            ))
            .unwrap();
        registry
            .register_doctor(Doctor::new("D001", "Dr. Elif Ozturk", "Cardiology", "-"))
            .unwrap();
        registry
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_review_books_follow_up_and_resolves() {
        let mut registry = registry();
        let mut scheduler = LoggingScheduler::new();
        let patient = PatientId::new("P001");
        registry.transmit(&patient, Reading::new(145, 190, 100, 85)).unwrap();

        let review = review_latest_alert(
            &mut registry,
            &RecommendationEngine::default(),
            &mut scheduler,
            &DoctorId::new("D001"),
            &patient,
            at(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(review.severity, Severity::High);
        assert_eq!(scheduler.appointments().len(), 1);
        assert_eq!(scheduler.appointments()[0].at, at());
        assert_eq!(registry.find_most_recent_unresolved_alert(&patient), None);
    }

    #[test]
    fn test_no_alert_no_review() {
        let mut registry = registry();
        let mut scheduler = LoggingScheduler::new();
        let review = review_latest_alert(
            &mut registry,
            &RecommendationEngine::default(),
            &mut scheduler,
            &DoctorId::new("D001"),
            &PatientId::new("P001"),
            at(),
        )
        .unwrap();

        assert_eq!(review, None);
        assert!(scheduler.appointments().is_empty());
    }

    #[test]
    fn test_scheduler_failure_leaves_alert_open() {
        let mut registry = registry();
        let patient = PatientId::new("P001");
        registry.transmit(&patient, Reading::new(110, 125, 80, 97)).unwrap();

        let result = review_latest_alert(
            &mut registry,
            &RecommendationEngine::default(),
            &mut RejectingScheduler,
            &DoctorId::new("D001"),
            &patient,
            at(),
        );

        assert!(matches!(result, Err(WorkflowError::FollowUp(_))));
        assert!(registry.find_most_recent_unresolved_alert(&patient).is_some());
    }

    #[test]
    fn test_unknown_doctor() {
        let mut registry = registry();
        let patient = PatientId::new("P001");
        registry.transmit(&patient, Reading::new(145, 190, 100, 85)).unwrap();

        let result = review_latest_alert(
            &mut registry,
            &RecommendationEngine::default(),
            &mut LoggingScheduler::new(),
            &DoctorId::new("D404"),
            &patient,
            at(),
        );
        assert!(matches!(
            result,
            Err(WorkflowError::Registry(RegistryError::UnknownDoctor(_)))
        ));
    }

    #[test]
    fn test_run_device_skips_invalid_reading() {
        let mut registry = registry();
        let mut scheduler = LoggingScheduler::new();
        let mut device = WearableDevice::new(
            "WD001",
            PatientId::new("P001"),
            "Smartwatch",
            DoctorId::new("D001"),
        )
        .with_readings([
            ScriptedReading::new(75, 118, 78, 98),
            ScriptedReading::new(-3, 118, 78, 98),
            ScriptedReading::new(75, 118, 78, 93),
        ]);

        let outcomes = run_device(
            &mut registry,
            &RecommendationEngine::default(),
            &mut scheduler,
            &mut device,
            at(),
        )
        .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].alert.is_none());
        assert!(outcomes[1].rejected.is_some());
        let low = outcomes[2].review.as_ref().unwrap();
        assert_eq!(low.severity, Severity::Low);
        assert!(!low.needs_follow_up);
        assert!(scheduler.appointments().is_empty());
        assert_eq!(registry.alerts().len(), 1);
    }
}
