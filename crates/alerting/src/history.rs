//! Append-Only Alert History

use crate::alert::{Alert, AlertId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};
use vitals::{PatientId, Severity, VitalSigns};

/// Alert history errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    #[error("Unknown alert: {0}")]
    UnknownAlert(AlertId),
}

/// Alert counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Insertion-ordered alert log.
///
/// Alerts are never removed. Alongside the log, a per-patient index keeps
/// the positions of unresolved alerts in insertion order so the active
/// alert is the last entry.
#[derive(Debug, Default)]
pub struct AlertHistory {
    /// All alerts, oldest first
    alerts: Vec<Alert>,
    /// Unresolved alert positions by patient, oldest first
    unresolved: HashMap<PatientId, Vec<usize>>,
}

impl AlertHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert for abnormal vitals. Normal vitals leave the history
    /// untouched and return `None`.
    pub fn record(
        &mut self,
        patient_id: &PatientId,
        vitals: VitalSigns,
        created_at: DateTime<Utc>,
    ) -> Option<&Alert> {
        if !vitals.is_abnormal() {
            debug!("No alert for {}: vitals normal", patient_id);
            return None;
        }

        let position = self.alerts.len();
        let id = AlertId(position as u64 + 1);
        let alert = Alert::new(id, patient_id.clone(), vitals, created_at);

        info!("Alert recorded: {}", alert);
        self.unresolved.entry(patient_id.clone()).or_default().push(position);
        self.alerts.push(alert);

        self.alerts.last()
    }

    /// Mark an alert resolved. Returns false if it was already resolved.
    pub fn resolve(&mut self, id: AlertId) -> Result<bool, AlertError> {
        let position = Self::position(id);
        let alert = position
            .and_then(|p| self.alerts.get_mut(p))
            .ok_or(AlertError::UnknownAlert(id))?;

        if !alert.resolve() {
            debug!("Alert {} already resolved", id);
            return Ok(false);
        }

        if let Some(positions) = self.unresolved.get_mut(alert.patient_id()) {
            positions.retain(|&p| Some(p) != position);
        }
        info!("Alert resolved: {}", id);
        Ok(true)
    }

    pub fn get(&self, id: AlertId) -> Option<&Alert> {
        Self::position(id).and_then(|p| self.alerts.get(p))
    }

    /// Most recent unresolved alert for a patient, answered from the index
    pub fn most_recent_unresolved(&self, patient_id: &PatientId) -> Option<&Alert> {
        self.unresolved
            .get(patient_id)
            .and_then(|positions| positions.last())
            .map(|&p| &self.alerts[p])
    }

    /// Same answer as [`most_recent_unresolved`](Self::most_recent_unresolved),
    /// by scanning the log from newest to oldest
    pub fn most_recent_unresolved_scan(&self, patient_id: &PatientId) -> Option<&Alert> {
        self.alerts
            .iter()
            .rev()
            .find(|alert| alert.patient_id() == patient_id && !alert.is_resolved())
    }

    /// All alerts, insertion order
    pub fn as_slice(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn for_patient<'a>(
        &'a self,
        patient_id: &'a PatientId,
    ) -> impl Iterator<Item = &'a Alert> + 'a {
        self.alerts.iter().filter(move |alert| alert.patient_id() == patient_id)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved.values().map(Vec::len).sum()
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        self.alerts
            .iter()
            .filter_map(Alert::severity)
            .fold(SeverityCounts::default(), |mut counts, severity| {
                match severity {
                    Severity::Low => counts.low += 1,
                    Severity::Medium => counts.medium += 1,
                    Severity::High => counts.high += 1,
                }
                counts
            })
    }

    // Ids are allocated from positions, so the mapping is fixed.
    fn position(id: AlertId) -> Option<usize> {
        usize::try_from(id.0.checked_sub(1)?).ok()
    }
}
