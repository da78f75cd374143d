//! Threshold Evaluator
//!
//! Condition-aware classification of a reading into a [`Verdict`]. Each vital
//! is checked against its [`VitalLimits`]; the highest severity across all
//! vitals wins.

use crate::error::VitalsError;
use crate::patient::ChronicCondition;
use crate::reading::Reading;
use crate::validator::{BoundsConfig, Validator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Deviation from safe ranges, ordered `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub is_abnormal: bool,
    pub severity: Option<Severity>,
}

impl Verdict {
    pub const NORMAL: Verdict = Verdict {
        is_abnormal: false,
        severity: None,
    };

    /// Build a verdict whose abnormality flag always agrees with its severity
    pub fn from_severity(severity: Option<Severity>) -> Self {
        Self {
            is_abnormal: severity.is_some(),
            severity,
        }
    }
}

/// Cut-points for a single vital; any of them may be absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VitalLimits {
    /// Values strictly below are HIGH
    pub critical_low: Option<i32>,
    /// Values strictly below are LOW
    pub mild_low: Option<i32>,
    /// Values at or above are MEDIUM
    pub moderate_high: Option<i32>,
    /// Values strictly above are HIGH
    pub critical_high: Option<i32>,
}

impl VitalLimits {
    pub const fn new(
        critical_low: Option<i32>,
        mild_low: Option<i32>,
        moderate_high: Option<i32>,
        critical_high: Option<i32>,
    ) -> Self {
        Self {
            critical_low,
            mild_low,
            moderate_high,
            critical_high,
        }
    }

    /// Classify a single value
    pub fn classify(&self, value: i32) -> Option<Severity> {
        if self.critical_low.is_some_and(|limit| value < limit)
            || self.critical_high.is_some_and(|limit| value > limit)
        {
            Some(Severity::High)
        } else if self.moderate_high.is_some_and(|limit| value >= limit) {
            Some(Severity::Medium)
        } else if self.mild_low.is_some_and(|limit| value < limit) {
            Some(Severity::Low)
        } else {
            None
        }
    }
}

/// Limits for every monitored vital
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdProfile {
    pub heart_rate: VitalLimits,
    pub systolic: VitalLimits,
    pub diastolic: VitalLimits,
    pub oxygen_saturation: VitalLimits,
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        Self {
            heart_rate: VitalLimits::new(Some(40), Some(50), Some(100), Some(130)),
            systolic: VitalLimits::new(Some(80), Some(90), Some(140), Some(180)),
            diastolic: VitalLimits::new(None, None, Some(90), Some(110)),
            oxygen_saturation: VitalLimits::new(Some(90), Some(95), None, None),
        }
    }
}

impl ThresholdProfile {
    /// Default profile with stricter blood-pressure cut-points
    pub fn hypertension() -> Self {
        Self::default().with_stricter_blood_pressure()
    }

    /// Lower the upper blood-pressure cut-points; other limits are kept
    pub fn with_stricter_blood_pressure(self) -> Self {
        Self {
            systolic: VitalLimits {
                moderate_high: Some(130),
                critical_high: Some(160),
                ..self.systolic
            },
            diastolic: VitalLimits {
                moderate_high: Some(85),
                critical_high: Some(100),
                ..self.diastolic
            },
            ..self
        }
    }

    /// Highest severity breached by the reading
    pub fn classify(&self, reading: &Reading) -> Option<Severity> {
        [
            self.heart_rate.classify(reading.heart_rate),
            self.systolic.classify(reading.systolic),
            self.diastolic.classify(reading.diastolic),
            self.oxygen_saturation.classify(reading.oxygen_saturation),
        ]
        .into_iter()
        .flatten()
        .max()
    }
}

/// Threshold configuration.
///
/// Deserializes as a layer over the built-in table: omitted cut-points keep
/// their built-in values, and configured overrides are merged into the
/// built-in ones rather than replacing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ThresholdLayer")]
pub struct ThresholdConfig {
    /// Physically possible ranges
    pub bounds: BoundsConfig,
    /// Profile used when a condition has no override
    pub default: ThresholdProfile,
    /// Per-condition profiles
    pub overrides: HashMap<ChronicCondition, ThresholdProfile>,
}

impl ThresholdConfig {
    /// Configuration around `default`, with the Hypertension override
    /// derived from it
    pub fn with_default_profile(default: ThresholdProfile) -> Self {
        let mut overrides = HashMap::new();
        overrides.insert(
            ChronicCondition::Hypertension,
            default.clone().with_stricter_blood_pressure(),
        );

        Self {
            bounds: BoundsConfig::default(),
            default,
            overrides,
        }
    }

    /// Profile applied to patients with the given condition
    pub fn profile_for(&self, condition: ChronicCondition) -> &ThresholdProfile {
        self.overrides.get(&condition).unwrap_or(&self.default)
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::with_default_profile(ThresholdProfile::default())
    }
}

/// Cut-points as written in configuration; absent ones keep the base value
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LimitsLayer {
    critical_low: Option<i32>,
    mild_low: Option<i32>,
    moderate_high: Option<i32>,
    critical_high: Option<i32>,
}

impl LimitsLayer {
    fn apply(self, base: VitalLimits) -> VitalLimits {
        VitalLimits {
            critical_low: self.critical_low.or(base.critical_low),
            mild_low: self.mild_low.or(base.mild_low),
            moderate_high: self.moderate_high.or(base.moderate_high),
            critical_high: self.critical_high.or(base.critical_high),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct ProfileLayer {
    heart_rate: LimitsLayer,
    systolic: LimitsLayer,
    diastolic: LimitsLayer,
    oxygen_saturation: LimitsLayer,
}

impl ProfileLayer {
    fn apply(self, base: &ThresholdProfile) -> ThresholdProfile {
        ThresholdProfile {
            heart_rate: self.heart_rate.apply(base.heart_rate),
            systolic: self.systolic.apply(base.systolic),
            diastolic: self.diastolic.apply(base.diastolic),
            oxygen_saturation: self.oxygen_saturation.apply(base.oxygen_saturation),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ThresholdLayer {
    bounds: BoundsConfig,
    default: ProfileLayer,
    overrides: HashMap<ChronicCondition, ProfileLayer>,
}

impl From<ThresholdLayer> for ThresholdConfig {
    fn from(layer: ThresholdLayer) -> Self {
        let default = layer.default.apply(&ThresholdProfile::default());
        let mut config = ThresholdConfig::with_default_profile(default);
        config.bounds = layer.bounds;

        for (condition, profile) in layer.overrides {
            let merged = profile.apply(config.profile_for(condition));
            config.overrides.insert(condition, merged);
        }
        config
    }
}

/// Pure, stateless classifier of readings
#[derive(Debug, Clone)]
pub struct ThresholdEvaluator {
    config: ThresholdConfig,
    validator: Validator,
}

impl ThresholdEvaluator {
    pub fn new(config: ThresholdConfig) -> Self {
        let validator = Validator::new(config.bounds.clone());
        Self { config, validator }
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Profile applied to patients with the given condition
    pub fn profile_for(&self, condition: ChronicCondition) -> &ThresholdProfile {
        self.config.profile_for(condition)
    }

    /// Evaluate a reading for a patient with the given condition.
    ///
    /// Fails only when the reading is physically impossible.
    pub fn evaluate(
        &self,
        reading: &Reading,
        condition: ChronicCondition,
    ) -> Result<Verdict, VitalsError> {
        self.validator.validate(reading)?;

        let severity = self.profile_for(condition).classify(reading);
        debug!("Evaluated {} for {}: {:?}", reading, condition, severity);

        Ok(Verdict::from_severity(severity))
    }
}

impl Default for ThresholdEvaluator {
    fn default() -> Self {
        Self::new(ThresholdConfig::default())
    }
}
