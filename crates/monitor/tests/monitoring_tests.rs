//! End-to-end monitoring scenarios

use monitor::{run, DeviceSettings, ScriptedReading, Settings};
use vitals::{DoctorId, PatientId, Severity};

#[test]
fn test_default_roster_run() {
    let report = run(&Settings::default()).unwrap();

    assert_eq!(report.status.patients, 3);
    assert_eq!(report.status.doctors, 2);
    assert_eq!(report.status.total_alerts, 3);
    assert_eq!(report.status.unresolved_alerts, 0);
    assert_eq!(report.status.by_severity.high, 1);
    assert_eq!(report.status.by_severity.medium, 2);

    assert_eq!(report.outcomes.len(), 4);
    assert!(report.outcomes[1].alert.is_none());
    assert!(report.outcomes[1].review.is_none());

    assert_eq!(report.appointments.len(), 3);
    assert!(report.alerts.iter().all(|alert| alert.is_resolved()));
}

#[test]
fn test_critical_hypertension_scenario() {
    let report = run(&Settings::default()).unwrap();
    let first = &report.outcomes[0];

    assert_eq!(first.patient_id, PatientId::new("P001"));
    let alert = first.alert.as_ref().unwrap();
    assert_eq!(alert.severity(), Some(Severity::High));
    assert!(alert.vitals().is_abnormal());

    let review = first.review.as_ref().unwrap();
    assert!(review.needs_follow_up);
    assert!(review.text.contains("Ali Yilmaz"));
}

#[test]
fn test_low_alert_not_followed_up() {
    let settings = Settings {
        devices: vec![DeviceSettings {
            id: "WD010".to_string(),
            patient_id: PatientId::new("P002"),
            device_type: "Fitness Band".to_string(),
            reviewer: DoctorId::new("D002"),
            readings: vec![ScriptedReading::new(72, 115, 75, 93)],
        }],
        ..Default::default()
    };

    let report = run(&settings).unwrap();

    assert_eq!(report.status.by_severity.low, 1);
    assert!(report.appointments.is_empty());
    assert!(!report.outcomes[0].review.as_ref().unwrap().needs_follow_up);
}

#[test]
fn test_unknown_reviewer_fails_run() {
    let settings = Settings {
        devices: vec![DeviceSettings {
            id: "WD011".to_string(),
            patient_id: PatientId::new("P001"),
            device_type: "Smartwatch".to_string(),
            reviewer: DoctorId::new("D999"),
            readings: vec![ScriptedReading::new(145, 190, 100, 85)],
        }],
        ..Default::default()
    };

    assert!(run(&settings).is_err());
}

#[test]
fn test_duplicate_roster_entry_fails_run() {
    let mut settings = Settings::default();
    let duplicate = settings.patients[0].clone();
    settings.patients.push(duplicate);

    let err = run(&settings).unwrap_err();
    assert!(format!("{:#}", err).contains("Duplicate patient id: P001"));
}

#[test]
fn test_readings_stamped_during_run() {
    let settings = Settings::default();
    let started = chrono::Utc::now();
    let report = run(&settings).unwrap();

    assert!(report
        .outcomes
        .iter()
        .all(|outcome| outcome.reading.timestamp >= started));
    let times: Vec<_> = report.outcomes.iter().map(|o| o.reading.timestamp).collect();
    assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
}
