//! Thread-Shareable Registry Handle

use crate::monitoring::{MonitoringRegistry, SystemStatus};
use crate::RegistryError;
use alerting::{Alert, AlertId};
use std::sync::{Arc, Mutex, MutexGuard};
use vitals::{Doctor, Patient, PatientId, Reading};

/// Registry behind a single lock.
///
/// One mutex guards patients, doctors and history, so alert ids and the
/// history order stay globally monotonic across threads.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<MonitoringRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: MonitoringRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MonitoringRegistry>, RegistryError> {
        self.inner
            .lock()
            .map_err(|e| RegistryError::LockPoisoned(format!("Lock error: {}", e)))
    }

    /// Run a closure with exclusive access to the registry
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut MonitoringRegistry) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let mut registry = self.lock()?;
        f(&mut *registry)
    }

    pub fn register_patient(&self, patient: Patient) -> Result<(), RegistryError> {
        self.lock()?.register_patient(patient)
    }

    pub fn register_doctor(&self, doctor: Doctor) -> Result<(), RegistryError> {
        self.lock()?.register_doctor(doctor)
    }

    pub fn transmit(
        &self,
        patient_id: &PatientId,
        reading: Reading,
    ) -> Result<Option<Alert>, RegistryError> {
        self.lock()?.transmit(patient_id, reading)
    }

    pub fn find_most_recent_unresolved_alert(
        &self,
        patient_id: &PatientId,
    ) -> Result<Option<Alert>, RegistryError> {
        Ok(self
            .lock()?
            .find_most_recent_unresolved_alert(patient_id)
            .cloned())
    }

    pub fn resolve_alert(&self, alert_id: AlertId) -> Result<(), RegistryError> {
        self.lock()?.resolve_alert(alert_id)
    }

    /// Copy of the alert history, insertion order
    pub fn alerts(&self) -> Result<Vec<Alert>, RegistryError> {
        Ok(self.lock()?.alerts().to_vec())
    }

    pub fn status(&self) -> Result<SystemStatus, RegistryError> {
        Ok(self.lock()?.status())
    }

    /// Recover the registry once every other handle is gone
    pub fn into_inner(self) -> Result<MonitoringRegistry, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(|e| e.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }
}
