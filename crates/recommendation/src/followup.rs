//! Follow-Up Scheduling Seam

use chrono::{DateTime, Utc};
use thiserror::Error;
use vitals::{Doctor, Patient};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FollowUpError {
    #[error("Follow-up rejected: {0}")]
    Rejected(String),
}

/// External collaborator that books follow-up appointments.
///
/// The appointment time is always chosen by the caller.
pub trait FollowUpScheduler {
    fn schedule_follow_up(
        &mut self,
        patient: &Patient,
        doctor: &Doctor,
        at: DateTime<Utc>,
    ) -> Result<(), FollowUpError>;
}
