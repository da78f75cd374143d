//! Alert Record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use vitals::{PatientId, Severity, VitalSigns};

/// Globally monotonic alert identifier, starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{:04}", self.0)
    }
}

/// Alert raised for an abnormal reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    id: AlertId,
    patient_id: PatientId,
    vitals: VitalSigns,
    severity: Option<Severity>,
    resolved: bool,
    created_at: DateTime<Utc>,
}

impl Alert {
    /// Severity is taken from the vitals verdict and never changes afterwards.
    ///
    /// [`AlertHistory`](crate::AlertHistory) only builds alerts from abnormal
    /// vitals; an alert built here from normal vitals carries no severity.
    pub fn new(
        id: AlertId,
        patient_id: PatientId,
        vitals: VitalSigns,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            patient_id,
            severity: vitals.severity(),
            vitals,
            resolved: false,
            created_at,
        }
    }

    pub fn id(&self) -> AlertId {
        self.id
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn vitals(&self) -> &VitalSigns {
        &self.vitals
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns false if the alert was already resolved
    pub(crate) fn resolve(&mut self) -> bool {
        !std::mem::replace(&mut self.resolved, true)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = self.severity.map_or("NONE", |s| s.as_str());
        let status = if self.resolved { "resolved" } else { "open" };
        write!(
            f,
            "Alert[{}] patient={} severity={} status={} vitals=({})",
            self.id,
            self.patient_id,
            severity,
            status,
            self.vitals.reading()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals::{ChronicCondition, Reading, ThresholdEvaluator};

    fn alert(id: u64, patient: &str, reading: Reading) -> Alert {
        let evaluator = ThresholdEvaluator::default();
        let vitals = VitalSigns::assess(reading, ChronicCondition::Other, &evaluator).unwrap();
        Alert::new(AlertId(id), patient.into(), vitals, Utc::now())
    }

    #[test]
    fn test_severity_taken_from_vitals() {
        let alert = alert(1, "P001", Reading::new(145, 190, 100, 85));
        assert_eq!(alert.severity(), Some(Severity::High));
        assert!(!alert.is_resolved());
    }

    #[test]
    fn test_resolve_reports_change_once() {
        let mut alert = alert(7, "P001", Reading::new(110, 118, 78, 98));
        assert!(alert.resolve());
        assert!(!alert.resolve());
        assert!(alert.is_resolved());
        assert_eq!(alert.severity(), Some(Severity::Medium));
    }

    #[test]
    fn test_display() {
        let alert = alert(3, "P002", Reading::new(110, 118, 78, 98));
        assert_eq!(
            alert.to_string(),
            concat!(
                "Alert[A0003] patient=P002 severity=MEDIUM status=open ",
                "vitals=(HR: 110 bpm, BP: 118/78 mmHg, SpO2: 98%)"
            )
        );
    }
}
