//! Recommendation Template Table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vitals::{ChronicCondition, Severity};

/// One table row; `condition: None` is the generic entry for the severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub severity: Severity,
    #[serde(default)]
    pub condition: Option<ChronicCondition>,
    pub text: String,
}

/// Guidance text keyed by severity and (optionally) chronic condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTable {
    entries: HashMap<(Severity, Option<ChronicCondition>), String>,
}

impl TemplateTable {
    /// Table with no rows
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace a row
    pub fn insert(
        &mut self,
        severity: Severity,
        condition: Option<ChronicCondition>,
        text: impl Into<String>,
    ) {
        self.entries.insert((severity, condition), text.into());
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = TemplateEntry>) {
        for entry in entries {
            self.insert(entry.severity, entry.condition, entry.text);
        }
    }

    /// Condition-specific row first, then the generic row for the severity
    pub fn lookup(&self, severity: Severity, condition: ChronicCondition) -> Option<&str> {
        self.entries
            .get(&(severity, Some(condition)))
            .or_else(|| self.entries.get(&(severity, None)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const DEFAULT_TEMPLATES: &[(Severity, Option<ChronicCondition>, &str)] = &[
    (
        Severity::High,
        None,
        "URGENT: critical vital signs. Contact the patient immediately and arrange emergency \
         evaluation.",
    ),
    (
        Severity::High,
        Some(ChronicCondition::Hypertension),
        "URGENT: hypertensive crisis risk. Contact the patient immediately, confirm \
         antihypertensive adherence and arrange emergency blood-pressure management.",
    ),
    (
        Severity::High,
        Some(ChronicCondition::Diabetes),
        "URGENT: critical vital signs in a diabetic patient. Contact the patient immediately, \
         check blood glucose and arrange emergency evaluation.",
    ),
    (
        Severity::Medium,
        None,
        "Abnormal vital signs. Review current medication and recheck vitals within 24 hours.",
    ),
    (
        Severity::Medium,
        Some(ChronicCondition::Hypertension),
        "Elevated blood pressure. Review antihypertensive dosage, limit sodium intake and recheck \
         blood pressure within 24 hours.",
    ),
    (
        Severity::Medium,
        Some(ChronicCondition::Diabetes),
        "Abnormal vital signs in a diabetic patient. Monitor blood glucose closely and recheck \
         vitals within 24 hours.",
    ),
    (
        Severity::Low,
        None,
        "Minor deviation from normal ranges. Continue routine monitoring.",
    ),
];

impl Default for TemplateTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for &(severity, condition, text) in DEFAULT_TEMPLATES {
            table.insert(severity, condition, text);
        }
        table
    }
}
