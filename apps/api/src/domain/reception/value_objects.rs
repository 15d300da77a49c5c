use serde::{Deserialize, Serialize};

/// Lifecycle status of a reception
///
/// # Status Transitions
/// ```text
/// (none) -> InProgress -> Close
/// ```
/// `Close` is terminal; a new intake session is always a new reception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reception_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatus {
    /// Reception is open and accepts products
    InProgress,
    /// Reception has been closed
    Close,
}

impl ReceptionStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Example
    /// ```
    /// use pvz_api::domain::reception::ReceptionStatus;
    ///
    /// assert!(ReceptionStatus::InProgress.can_transition_to(ReceptionStatus::Close));
    /// assert!(!ReceptionStatus::Close.can_transition_to(ReceptionStatus::InProgress));
    /// ```
    pub fn can_transition_to(&self, next: ReceptionStatus) -> bool {
        matches!(
            (self, next),
            (ReceptionStatus::InProgress, ReceptionStatus::Close)
        )
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ReceptionStatus::InProgress)
    }
}

impl std::fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceptionStatus::InProgress => write!(f, "in_progress"),
            ReceptionStatus::Close => write!(f, "close"),
        }
    }
}
