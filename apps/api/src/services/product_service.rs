use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{ProductOperations, ServiceConfig};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::{Product, ProductType};
use crate::domain::repositories::{
    with_transaction, ProductRepository, PvzRepository, ReceptionRepository, Store,
};

/// Adds and removes products in the last reception of a PVZ
pub struct ProductService<S: Store> {
    store: Arc<S>,
    config: ServiceConfig,
}

impl<S: Store> ProductService<S> {
    pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl<S: Store> ProductOperations for ProductService<S> {
    #[tracing::instrument(skip(self))]
    async fn add_product(&self, pvz_id: Uuid, product_type: &str) -> DomainResult<Product> {
        // parsed before the transaction so a bad type never reaches the store
        let product_type: ProductType = product_type.parse()?;

        let product =
            with_transaction(self.store.as_ref(), self.config.transaction_timeout, |tx| {
                Box::pin(async move {
                    tx.lock_pvz(pvz_id).await?;

                    let reception = tx.last_reception(pvz_id).await?;
                    if !reception.is_open() {
                        return Err(DomainError::ReceptionClosed);
                    }

                    tx.create_product(Uuid::new_v4(), reception.id, product_type)
                        .await
                })
            })
            .await?;

        tracing::info!(
            product_id = %product.id,
            reception_id = %product.reception_id,
            product_type = %product.product_type,
            "product added"
        );
        Ok(product)
    }

    /// Deletes the newest product of the newest reception, whatever its status
    #[tracing::instrument(skip(self))]
    async fn delete_last_product(&self, pvz_id: Uuid) -> DomainResult<()> {
        let deleted =
            with_transaction(self.store.as_ref(), self.config.transaction_timeout, |tx| {
                Box::pin(async move {
                    tx.lock_pvz(pvz_id).await?;

                    let reception = tx.last_reception(pvz_id).await?;
                    let product = tx.last_product(reception.id).await?;
                    tx.delete_product(product.id).await?;

                    Ok(product.id)
                })
            })
            .await?;

        tracing::info!(product_id = %deleted, "product deleted");
        Ok(())
    }
}
