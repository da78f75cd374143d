//! Recommendation Engine Implementation

use crate::templates::{TemplateEntry, TemplateTable};
use alerting::{Alert, AlertId};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use vitals::{ChronicCondition, Patient, PatientId, Severity};

/// Recommendation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationError {
    /// Alert carries no severity, or the table has no row for it
    #[error("Alert {alert} has no recognised severity ({severity:?})")]
    UnknownSeverity {
        alert: AlertId,
        severity: Option<Severity>,
    },

    #[error("Alert {alert} belongs to patient {expected}, not {actual}")]
    PatientMismatch {
        alert: AlertId,
        expected: PatientId,
        actual: PatientId,
    },
}

/// Outcome of a doctor's review of one alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub alert_id: AlertId,
    pub patient_id: PatientId,
    pub severity: Severity,
    pub text: String,
    pub needs_follow_up: bool,
}

/// Pure mapping from (alert, patient) to a [`Review`]
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    templates: TemplateTable,
}

impl RecommendationEngine {
    pub fn new(templates: TemplateTable) -> Self {
        Self { templates }
    }

    /// Add or replace a template row
    pub fn with_template(
        mut self,
        severity: Severity,
        condition: Option<ChronicCondition>,
        text: impl Into<String>,
    ) -> Self {
        self.templates.insert(severity, condition, text);
        self
    }

    pub fn with_templates(mut self, entries: impl IntoIterator<Item = TemplateEntry>) -> Self {
        self.templates.extend(entries);
        self
    }

    pub fn templates(&self) -> &TemplateTable {
        &self.templates
    }

    /// MEDIUM and HIGH alerts require a follow-up
    pub fn needs_follow_up(severity: Severity) -> bool {
        match severity {
            Severity::Low => false,
            Severity::Medium | Severity::High => true,
        }
    }

    /// Derive recommendation text and the follow-up decision
    pub fn review(&self, alert: &Alert, patient: &Patient) -> Result<Review, RecommendationError> {
        if alert.patient_id() != patient.id() {
            return Err(RecommendationError::PatientMismatch {
                alert: alert.id(),
                expected: alert.patient_id().clone(),
                actual: patient.id().clone(),
            });
        }

        let unknown = || RecommendationError::UnknownSeverity {
            alert: alert.id(),
            severity: alert.severity(),
        };
        let severity = alert.severity().ok_or_else(unknown)?;
        let guidance = self
            .templates
            .lookup(severity, patient.condition())
            .ok_or_else(unknown)?;

        let needs_follow_up = Self::needs_follow_up(severity);
        let mut text = format!(
            "Recommendation for {} ({}), {} alert {}:\n{}\nVitals: {}",
            patient.name(),
            patient.condition(),
            severity,
            alert.id(),
            guidance,
            alert.vitals().reading(),
        );
        if needs_follow_up {
            text.push_str("\nFollow-up appointment required.");
        }

        debug!("Rendered recommendation for alert {}", alert.id());
        info!(
            "Reviewed alert {} for {} (severity: {}, follow-up: {})",
            alert.id(),
            patient.id(),
            severity,
            needs_follow_up
        );

        Ok(Review {
            alert_id: alert.id(),
            patient_id: patient.id().clone(),
            severity,
            text,
            needs_follow_up,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vitals::{Reading, ThresholdEvaluator, VitalSigns};

    fn patient(condition: ChronicCondition) -> Patient {
        Patient::new("P001", "Ali Yilmaz", 58, condition, "+90-555-1234")
    }

    fn alert(reading: Reading, condition: ChronicCondition) -> Alert {
        let evaluator = ThresholdEvaluator::default();
        let vitals = VitalSigns::assess(reading, condition, &evaluator).unwrap();
        Alert::new(AlertId(1), PatientId::new("P001"), vitals, Utc::now())
    }

    #[test]
    fn test_high_hypertension_is_urgent() {
        let engine = RecommendationEngine::default();
        let patient = patient(ChronicCondition::Hypertension);
        let alert = alert(Reading::new(145, 190, 100, 85), ChronicCondition::Hypertension);
        let review = engine.review(&alert, &patient).unwrap();

        assert_eq!(review.severity, Severity::High);
        assert!(review.needs_follow_up);
        assert!(review.text.contains("hypertensive crisis"));
        assert!(review.text.contains("HR: 145 bpm, BP: 190/100 mmHg, SpO2: 85%"));
        assert!(review.text.ends_with("Follow-up appointment required."));
    }

    #[test]
    fn test_medium_needs_follow_up() {
        let engine = RecommendationEngine::default();
        let patient = patient(ChronicCondition::Diabetes);
        let alert = alert(Reading::new(110, 118, 78, 98), ChronicCondition::Diabetes);
        let review = engine.review(&alert, &patient).unwrap();

        assert_eq!(review.severity, Severity::Medium);
        assert!(review.needs_follow_up);
        assert!(review.text.contains("blood glucose"));
    }

    #[test]
    fn test_low_does_not_need_follow_up() {
        let engine = RecommendationEngine::default();
        let patient = patient(ChronicCondition::Other);
        let alert = alert(Reading::new(75, 118, 78, 93), ChronicCondition::Other);
        let review = engine.review(&alert, &patient).unwrap();

        assert_eq!(review.severity, Severity::Low);
        assert!(!review.needs_follow_up);
        assert!(!review.text.contains("Follow-up"));
    }

    #[test]
    fn test_missing_severity_rejected() {
        let engine = RecommendationEngine::default();
        let patient = patient(ChronicCondition::Other);
        let alert = alert(Reading::new(75, 118, 78, 98), ChronicCondition::Other);
        let result = engine.review(&alert, &patient);

        assert_eq!(
            result,
            Err(RecommendationError::UnknownSeverity {
                alert: AlertId(1),
                severity: None,
            })
        );
    }

    #[test]
    fn test_missing_template_rejected() {
        let engine = RecommendationEngine::new(TemplateTable::empty());
        let patient = patient(ChronicCondition::Other);
        let alert = alert(Reading::new(110, 118, 78, 98), ChronicCondition::Other);
        let result = engine.review(&alert, &patient);

        assert!(matches!(
            result,
            Err(RecommendationError::UnknownSeverity {
                severity: Some(Severity::Medium),
                ..
            })
        ));
    }

    #[test]
    fn test_patient_mismatch_rejected() {
        let engine = RecommendationEngine::default();
        let other = Patient::new("P002", "Ayse Demir", 45, ChronicCondition::Diabetes, "-");
        let alert = alert(Reading::new(110, 118, 78, 98), ChronicCondition::Other);
        let result = engine.review(&alert, &other);

        assert!(matches!(
            result,
            Err(RecommendationError::PatientMismatch { .. })
        ));
    }

    #[test]
    fn test_custom_template() {
        let engine = RecommendationEngine::default().with_template(
            Severity::Medium,
            Some(ChronicCondition::Other),
            "Call the care coordinator.",
        );
        let patient = patient(ChronicCondition::Other);
        let alert = alert(Reading::new(110, 118, 78, 98), ChronicCondition::Other);
        let review = engine.review(&alert, &patient).unwrap();

        assert!(review.text.contains("Call the care coordinator."));
    }

    #[test]
    fn test_review_is_deterministic() {
        let engine = RecommendationEngine::default();
        let patient = patient(ChronicCondition::Hypertension);
        let alert = alert(Reading::new(80, 135, 80, 97), ChronicCondition::Hypertension);

        assert_eq!(engine.review(&alert, &patient), engine.review(&alert, &patient));
    }
}
