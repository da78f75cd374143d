//! Physical-Bounds Validator

use crate::error::VitalsError;
use crate::reading::Reading;
use serde::{Deserialize, Serialize};

/// Physically possible ranges, inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Heart rate range (bpm)
    pub heart_rate_range: (i32, i32),
    /// Systolic pressure range (mmHg)
    pub systolic_range: (i32, i32),
    /// Diastolic pressure range (mmHg)
    pub diastolic_range: (i32, i32),
    /// Oxygen saturation range (%)
    pub oxygen_range: (i32, i32),
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            heart_rate_range: (0, 300),
            systolic_range: (0, 300),
            diastolic_range: (0, 250),
            oxygen_range: (0, 100),
        }
    }
}

/// Rejects readings no sensor could legitimately produce
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: BoundsConfig,
}

impl Validator {
    pub fn new(config: BoundsConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: i32,
        range: (i32, i32),
    ) -> Result<(), VitalsError> {
        if value < range.0 || value > range.1 {
            Err(VitalsError::InvalidReading {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    pub fn validate_heart_rate(&self, bpm: i32) -> Result<(), VitalsError> {
        self.validate_range("heart_rate", bpm, self.config.heart_rate_range)
    }

    pub fn validate_systolic(&self, mmhg: i32) -> Result<(), VitalsError> {
        self.validate_range("systolic", mmhg, self.config.systolic_range)
    }

    pub fn validate_diastolic(&self, mmhg: i32) -> Result<(), VitalsError> {
        self.validate_range("diastolic", mmhg, self.config.diastolic_range)
    }

    pub fn validate_oxygen(&self, percent: i32) -> Result<(), VitalsError> {
        self.validate_range("oxygen_saturation", percent, self.config.oxygen_range)
    }

    /// Validate every field of a reading; the first violation wins
    pub fn validate(&self, reading: &Reading) -> Result<(), VitalsError> {
        self.validate_heart_rate(reading.heart_rate)?;
        self.validate_systolic(reading.systolic)?;
        self.validate_diastolic(reading.diastolic)?;
        self.validate_oxygen(reading.oxygen_saturation)?;

        if reading.diastolic > reading.systolic {
            return Err(VitalsError::InvertedPressure {
                systolic: reading.systolic,
                diastolic: reading.diastolic,
            });
        }

        Ok(())
    }
}
