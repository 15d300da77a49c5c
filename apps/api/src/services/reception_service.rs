use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{ReceptionOperations, ServiceConfig};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::reception::Reception;
use crate::domain::repositories::{with_transaction, PvzRepository, ReceptionRepository, Store};

/// Opens and closes receptions
///
/// Both operations lock the PVZ row first, so concurrent calls for the same
/// PVZ are serialized by the store.
pub struct ReceptionService<S: Store> {
    store: Arc<S>,
    config: ServiceConfig,
}

impl<S: Store> ReceptionService<S> {
    pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl<S: Store> ReceptionOperations for ReceptionService<S> {
    #[tracing::instrument(skip(self))]
    async fn open_reception(&self, pvz_id: Uuid) -> DomainResult<Reception> {
        let reception =
            with_transaction(self.store.as_ref(), self.config.transaction_timeout, |tx| {
                Box::pin(async move {
                    tx.lock_pvz(pvz_id).await?;

                    match tx.last_reception(pvz_id).await {
                        Ok(last) if last.is_open() => return Err(DomainError::ReceptionNotClosed),
                        Ok(_) | Err(DomainError::ReceptionNotFound) => {}
                        Err(err) => return Err(err),
                    }

                    tx.create_reception(Uuid::new_v4(), pvz_id).await
                })
            })
            .await?;

        tracing::info!(reception_id = %reception.id, "reception created");
        Ok(reception)
    }

    #[tracing::instrument(skip(self))]
    async fn close_last_reception(&self, pvz_id: Uuid) -> DomainResult<Reception> {
        let reception =
            with_transaction(self.store.as_ref(), self.config.transaction_timeout, |tx| {
                Box::pin(async move {
                    tx.lock_pvz(pvz_id).await?;

                    let mut last = tx.last_reception(pvz_id).await?;
                    last.close()?;

                    tx.update_reception_status(last.id, last.status).await
                })
            })
            .await?;

        tracing::info!(reception_id = %reception.id, "reception closed");
        Ok(reception)
    }
}
