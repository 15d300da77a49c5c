use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::pvz::DateWindow;
use crate::domain::reception::{Reception, ReceptionStatus};

/// Repository contract for receptions
#[async_trait]
pub trait ReceptionRepository: Send {
    /// Insert an open reception for the PVZ
    ///
    /// A second open reception for the same PVZ fails with
    /// `ReceptionNotClosed`.
    async fn create_reception(&mut self, id: Uuid, pvz_id: Uuid) -> DomainResult<Reception>;

    /// Most recently started reception of the PVZ
    ///
    /// Fails with `ReceptionNotFound` if the PVZ has none.
    async fn last_reception(&mut self, pvz_id: Uuid) -> DomainResult<Reception>;

    /// Persist a status change, returning the stored record
    ///
    /// Fails with `ReceptionNotFound` if no such reception exists.
    async fn update_reception_status(
        &mut self,
        reception_id: Uuid,
        status: ReceptionStatus,
    ) -> DomainResult<Reception>;

    /// Receptions of the given PVZs ordered by start time then id,
    /// restricted to the window if one is given
    async fn receptions_of(
        &mut self,
        pvz_ids: &[Uuid],
        window: Option<DateWindow>,
    ) -> DomainResult<Vec<Reception>>;
}
