//! Patients, Doctors and Chronic Conditions

use crate::error::VitalsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique patient identifier (e.g. `P001`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Unique doctor identifier (e.g. `D001`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(String);

impl DoctorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DoctorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Standing diagnosis that modulates threshold evaluation
// Lowercase aliases: the config loader lowercases map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChronicCondition {
    #[serde(alias = "hypertension")]
    Hypertension,
    #[serde(alias = "diabetes")]
    Diabetes,
    /// Any condition without dedicated thresholds
    #[serde(alias = "other")]
    Other,
}

impl ChronicCondition {
    pub const ALL: [ChronicCondition; 3] = [
        ChronicCondition::Hypertension,
        ChronicCondition::Diabetes,
        ChronicCondition::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChronicCondition::Hypertension => "Hypertension",
            ChronicCondition::Diabetes => "Diabetes",
            ChronicCondition::Other => "Other",
        }
    }
}

impl fmt::Display for ChronicCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChronicCondition {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hypertension" => Ok(ChronicCondition::Hypertension),
            "diabetes" => Ok(ChronicCondition::Diabetes),
            "other" => Ok(ChronicCondition::Other),
            _ => Err(VitalsError::UnknownCondition(s.to_string())),
        }
    }
}

/// A monitored patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    id: PatientId,
    name: String,
    age: u32,
    condition: ChronicCondition,
    contact: String,
}

impl Patient {
    pub fn new(
        id: impl Into<PatientId>,
        name: impl Into<String>,
        age: u32,
        condition: ChronicCondition,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            condition,
            contact: contact.into(),
        }
    }

    pub fn id(&self) -> &PatientId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn condition(&self) -> ChronicCondition {
        self.condition
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Contact info is the only mutable patient field
    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.contact = contact.into();
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient[ID={}, Name={}, Age={}, Condition={}]",
            self.id, self.name, self.age, self.condition
        )
    }
}

/// A reviewing doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    id: DoctorId,
    name: String,
    specialty: String,
    contact: String,
}

impl Doctor {
    pub fn new(
        id: impl Into<DoctorId>,
        name: impl Into<String>,
        specialty: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specialty: specialty.into(),
            contact: contact.into(),
        }
    }

    pub fn id(&self) -> &DoctorId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Doctor[ID={}, Name={}, Specialty={}]", self.id, self.name, self.specialty)
    }
}
