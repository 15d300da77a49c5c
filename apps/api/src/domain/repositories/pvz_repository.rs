use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::pvz::{City, DateWindow, PageRequest, Pvz};

/// Repository contract for pickup points
///
/// Implemented by a transaction handle, so every call runs inside that
/// transaction.
#[async_trait]
pub trait PvzRepository: Send {
    /// Insert a PVZ; the store assigns the registration date
    async fn create_pvz(&mut self, id: Uuid, city: City) -> DomainResult<Pvz>;

    /// Lock the PVZ row so that lifecycle operations on it serialize
    ///
    /// Succeeds without effect if the PVZ does not exist.
    async fn lock_pvz(&mut self, pvz_id: Uuid) -> DomainResult<()>;

    /// One page of PVZs ordered by registration date, newest first
    ///
    /// With a window, only PVZs having at least one reception started inside
    /// it are eligible.
    async fn pvz_page(
        &mut self,
        window: Option<DateWindow>,
        page: PageRequest,
    ) -> DomainResult<Vec<Pvz>>;
}
