//! Device Readings and Assessed Vital Signs

use crate::error::VitalsError;
use crate::patient::ChronicCondition;
use crate::thresholds::{Severity, ThresholdEvaluator, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw measurement produced by a wearable device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Heart rate (bpm)
    pub heart_rate: i32,
    /// Systolic blood pressure (mmHg)
    pub systolic: i32,
    /// Diastolic blood pressure (mmHg)
    pub diastolic: i32,
    /// Oxygen saturation (%)
    pub oxygen_saturation: i32,
    /// Measurement time
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    /// Create a reading stamped with the current time
    pub fn new(heart_rate: i32, systolic: i32, diastolic: i32, oxygen_saturation: i32) -> Self {
        Self {
            heart_rate,
            systolic,
            diastolic,
            oxygen_saturation,
            timestamp: Utc::now(),
        }
    }

    /// Override the measurement time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HR: {} bpm, BP: {}/{} mmHg, SpO2: {}%",
            self.heart_rate, self.systolic, self.diastolic, self.oxygen_saturation
        )
    }
}

/// Immutable reading plus the verdict derived from it.
///
/// The verdict is computed exactly once, in [`VitalSigns::assess`], using
/// the thresholds for the patient's condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VitalSigns {
    reading: Reading,
    verdict: Verdict,
}

impl VitalSigns {
    /// Validate physical bounds and evaluate thresholds
    pub fn assess(
        reading: Reading,
        condition: ChronicCondition,
        evaluator: &ThresholdEvaluator,
    ) -> Result<Self, VitalsError> {
        let verdict = evaluator.evaluate(&reading, condition)?;
        Ok(Self { reading, verdict })
    }

    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    pub fn heart_rate(&self) -> i32 {
        self.reading.heart_rate
    }

    pub fn systolic(&self) -> i32 {
        self.reading.systolic
    }

    pub fn diastolic(&self) -> i32 {
        self.reading.diastolic
    }

    pub fn oxygen_saturation(&self) -> i32 {
        self.reading.oxygen_saturation
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.reading.timestamp
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_abnormal(&self) -> bool {
        self.verdict.is_abnormal
    }

    pub fn severity(&self) -> Option<Severity> {
        self.verdict.severity
    }
}

impl fmt::Display for VitalSigns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict.severity {
            Some(severity) => write!(f, "{} [ABNORMAL: {}]", self.reading, severity),
            None => write!(f, "{} [normal]", self.reading),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_assess_normal_reading() {
        let evaluator = ThresholdEvaluator::default();
        let reading = Reading::new(75, 118, 78, 98);
        let vitals = VitalSigns::assess(reading, ChronicCondition::Diabetes, &evaluator).unwrap();

        assert!(!vitals.is_abnormal());
        assert_eq!(vitals.severity(), None);
        assert_eq!(vitals.to_string(), "HR: 75 bpm, BP: 118/78 mmHg, SpO2: 98% [normal]");
    }

    #[test]
    fn test_assess_keeps_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 11, 20, 8, 30, 0).unwrap();
        let evaluator = ThresholdEvaluator::default();
        let reading = Reading::new(145, 190, 100, 85).at(at);
        let vitals =
            VitalSigns::assess(reading, ChronicCondition::Hypertension, &evaluator).unwrap();

        assert_eq!(vitals.timestamp(), at);
        assert_eq!(vitals.severity(), Some(Severity::High));
        assert!(vitals.to_string().ends_with("[ABNORMAL: HIGH]"));
    }

    #[test]
    fn test_assess_rejects_impossible_reading() {
        let evaluator = ThresholdEvaluator::default();
        let reading = Reading::new(-1, 120, 80, 98);
        let result = VitalSigns::assess(reading, ChronicCondition::Other, &evaluator);
        assert!(matches!(
            result,
            Err(VitalsError::InvalidReading {
                field: "heart_rate",
                ..
            })
        ));
    }
}
