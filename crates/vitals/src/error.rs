//! Vital-Sign Error Types

use thiserror::Error;

/// Errors raised while validating or parsing vital-sign data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VitalsError {
    /// Value outside physically possible bounds
    #[error("Invalid reading: {field} value {value} is outside physical bounds [{min}, {max}]")]
    InvalidReading {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// Diastolic pressure above systolic pressure
    #[error("Invalid reading: diastolic {diastolic} mmHg exceeds systolic {systolic} mmHg")]
    InvertedPressure { systolic: i32, diastolic: i32 },

    /// Unrecognised chronic condition name
    #[error("Unknown chronic condition: {0}")]
    UnknownCondition(String),
}
