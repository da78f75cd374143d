//! Registry Implementation

use crate::{EntityKind, RegistryError};
use alerting::{Alert, AlertHistory, AlertId, SeverityCounts};
use chrono::Utc;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};
use vitals::{Doctor, DoctorId, Patient, PatientId, Reading, ThresholdEvaluator, VitalSigns};

/// Snapshot of registry counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemStatus {
    pub name: String,
    pub patients: usize,
    pub doctors: usize,
    pub total_alerts: usize,
    pub unresolved_alerts: usize,
    pub by_severity: SeverityCounts,
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System: {}", self.name)?;
        writeln!(f, "Registered patients: {}", self.patients)?;
        writeln!(f, "Registered doctors: {}", self.doctors)?;
        writeln!(
            f,
            "Alerts: {} total, {} unresolved",
            self.total_alerts, self.unresolved_alerts
        )?;
        write!(
            f,
            "By severity: HIGH={} MEDIUM={} LOW={}",
            self.by_severity.high, self.by_severity.medium, self.by_severity.low
        )
    }
}

/// Owned aggregate of patients, doctors and alert history.
///
/// All mutation goes through `&mut self`; wrap it in a
/// [`SharedRegistry`](crate::SharedRegistry) to share it between threads.
#[derive(Debug)]
pub struct MonitoringRegistry {
    name: String,
    evaluator: ThresholdEvaluator,
    patients: BTreeMap<PatientId, Patient>,
    doctors: BTreeMap<DoctorId, Doctor>,
    history: AlertHistory,
}

impl MonitoringRegistry {
    pub fn new(name: impl Into<String>, evaluator: ThresholdEvaluator) -> Self {
        let name = name.into();
        info!("Creating monitoring registry {}", name);
        Self {
            name,
            evaluator,
            patients: BTreeMap::new(),
            doctors: BTreeMap::new(),
            history: AlertHistory::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluator(&self) -> &ThresholdEvaluator {
        &self.evaluator
    }

    /// Register a patient; an existing id leaves the registry unchanged
    pub fn register_patient(&mut self, patient: Patient) -> Result<(), RegistryError> {
        match self.patients.entry(patient.id().clone()) {
            Entry::Occupied(entry) => {
                warn!("Rejected duplicate patient id {}", entry.key());
                Err(RegistryError::DuplicateId {
                    kind: EntityKind::Patient,
                    id: entry.key().to_string(),
                })
            }
            Entry::Vacant(entry) => {
                info!("Registered {}", patient);
                entry.insert(patient);
                Ok(())
            }
        }
    }

    /// Register a doctor; an existing id leaves the registry unchanged
    pub fn register_doctor(&mut self, doctor: Doctor) -> Result<(), RegistryError> {
        match self.doctors.entry(doctor.id().clone()) {
            Entry::Occupied(entry) => {
                warn!("Rejected duplicate doctor id {}", entry.key());
                Err(RegistryError::DuplicateId {
                    kind: EntityKind::Doctor,
                    id: entry.key().to_string(),
                })
            }
            Entry::Vacant(entry) => {
                info!("Registered {}", doctor);
                entry.insert(doctor);
                Ok(())
            }
        }
    }

    pub fn patient(&self, id: &PatientId) -> Result<&Patient, RegistryError> {
        self.patients
            .get(id)
            .ok_or_else(|| RegistryError::UnknownPatient(id.clone()))
    }

    pub fn doctor(&self, id: &DoctorId) -> Result<&Doctor, RegistryError> {
        self.doctors
            .get(id)
            .ok_or_else(|| RegistryError::UnknownDoctor(id.clone()))
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values()
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.values()
    }

    pub fn update_patient_contact(
        &mut self,
        id: &PatientId,
        contact: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let patient = self
            .patients
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownPatient(id.clone()))?;
        patient.set_contact(contact);
        info!("Updated contact for patient {}", id);
        Ok(())
    }

    /// Evaluate a reading for a registered patient.
    ///
    /// Returns the new alert when the reading is abnormal and `None` when it
    /// is normal. Invalid readings are rejected before anything is recorded.
    pub fn transmit(
        &mut self,
        patient_id: &PatientId,
        reading: Reading,
    ) -> Result<Option<Alert>, RegistryError> {
        let condition = self.patient(patient_id)?.condition();
        let vitals = VitalSigns::assess(reading, condition, &self.evaluator)?;
        debug!("Received from {}: {}", patient_id, vitals);

        Ok(self.history.record(patient_id, vitals, Utc::now()).cloned())
    }

    /// Newest unresolved alert for the patient, if any
    pub fn find_most_recent_unresolved_alert(&self, patient_id: &PatientId) -> Option<&Alert> {
        self.history.most_recent_unresolved(patient_id)
    }

    /// Mark an alert resolved; resolving twice is a no-op
    pub fn resolve_alert(&mut self, alert_id: AlertId) -> Result<(), RegistryError> {
        self.history.resolve(alert_id)?;
        Ok(())
    }

    pub fn alert(&self, alert_id: AlertId) -> Result<&Alert, RegistryError> {
        self.history
            .get(alert_id)
            .ok_or(RegistryError::UnknownAlert(alert_id))
    }

    /// Alert history in insertion order
    pub fn alerts(&self) -> &[Alert] {
        self.history.as_slice()
    }

    pub fn alerts_for_patient<'a>(
        &'a self,
        patient_id: &'a PatientId,
    ) -> impl Iterator<Item = &'a Alert> + 'a {
        self.history.for_patient(patient_id)
    }

    pub fn history(&self) -> &AlertHistory {
        &self.history
    }

    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            name: self.name.clone(),
            patients: self.patients.len(),
            doctors: self.doctors.len(),
            total_alerts: self.history.len(),
            unresolved_alerts: self.history.unresolved_count(),
            by_severity: self.history.severity_counts(),
        }
    }
}

impl Default for MonitoringRegistry {
    fn default() -> Self {
        Self::new("RHMS", ThresholdEvaluator::default())
    }
}
