use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::ReceptionStatus;
use crate::domain::errors::DomainError;

/// A batch-intake session at a PVZ
///
/// # Invariants
/// - At most one reception per PVZ is `InProgress` at any time
/// - Transitions `InProgress -> Close` exactly once
/// - `date_time` (start time) is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reception {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub pvz_id: Uuid,
    pub status: ReceptionStatus,
}

impl Reception {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Closes the reception
    ///
    /// # Returns
    /// * `Ok(())` - Status moved to `Close`
    /// * `Err(DomainError::ReceptionClosed)` - Already closed
    pub fn close(&mut self) -> Result<(), DomainError> {
        let next_status = ReceptionStatus::Close;
        if !self.status.can_transition_to(next_status) {
            return Err(DomainError::ReceptionClosed);
        }

        self.status = next_status;
        Ok(())
    }
}
