//! Vital Signs
//!
//! Patient model, device readings, physical-bounds validation, and
//! condition-aware threshold evaluation.

mod error;
mod patient;
mod reading;
mod thresholds;
mod validator;

pub use error::VitalsError;
pub use patient::{ChronicCondition, Doctor, DoctorId, Patient, PatientId};
pub use reading::{Reading, VitalSigns};
pub use thresholds::{
    Severity, ThresholdConfig, ThresholdEvaluator, ThresholdProfile, Verdict, VitalLimits,
};
pub use validator::{BoundsConfig, Validator};
