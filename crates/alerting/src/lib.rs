//! Alerting
//!
//! Alert records raised for abnormal vital signs, kept in an append-only
//! history with per-patient lookup of the active (most recent unresolved)
//! alert.

mod alert;
mod history;

pub use alert::{Alert, AlertId};
pub use history::{AlertError, AlertHistory, SeverityCounts};
