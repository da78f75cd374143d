//! Monitoring Registry
//!
//! Owns registered patients and doctors together with the alert history, and
//! runs the transmit pipeline: validation, threshold evaluation, and alert
//! creation.

mod monitoring;
mod shared;

pub use monitoring::{MonitoringRegistry, SystemStatus};
pub use shared::SharedRegistry;

use alerting::{AlertError, AlertId};
use std::fmt;
use thiserror::Error;
use vitals::{DoctorId, PatientId, VitalsError};

/// Kind of registered entity, used in duplicate-id errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Patient,
    Doctor,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Patient => f.write_str("patient"),
            EntityKind::Doctor => f.write_str("doctor"),
        }
    }
}

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("Unknown patient: {0}")]
    UnknownPatient(PatientId),

    #[error("Unknown doctor: {0}")]
    UnknownDoctor(DoctorId),

    #[error("Unknown alert: {0}")]
    UnknownAlert(AlertId),

    #[error(transparent)]
    InvalidReading(#[from] VitalsError),

    #[error("Registry lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<AlertError> for RegistryError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::UnknownAlert(id) => RegistryError::UnknownAlert(id),
        }
    }
}
