use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{PvzOperations, ServiceConfig};
use crate::domain::errors::DomainResult;
use crate::domain::product::Product;
use crate::domain::pvz::{City, DateWindow, ExtendedPvz, ExtendedReception, PageRequest, Pvz};
use crate::domain::reception::Reception;
use crate::domain::repositories::{
    with_transaction, ProductRepository, PvzRepository, ReceptionRepository, Store,
};

/// PVZ registration and listing over any [`Store`]
pub struct PvzService<S: Store> {
    store: Arc<S>,
    config: ServiceConfig,
}

impl<S: Store> PvzService<S> {
    pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl<S: Store> PvzOperations for PvzService<S> {
    #[tracing::instrument(skip(self))]
    async fn add_pvz(&self, city: &str) -> DomainResult<Pvz> {
        let city: City = city.parse()?;

        let pvz = with_transaction(self.store.as_ref(), self.config.transaction_timeout, |tx| {
            Box::pin(async move { tx.create_pvz(Uuid::new_v4(), city).await })
        })
        .await?;

        tracing::info!(pvz_id = %pvz.id, city = %pvz.city, "pvz created");
        Ok(pvz)
    }

    #[tracing::instrument(skip(self))]
    async fn list_pvz(
        &self,
        window: Option<DateWindow>,
        page: PageRequest,
    ) -> DomainResult<Vec<ExtendedPvz>> {
        let (pvzs, receptions, products) =
            with_transaction(self.store.as_ref(), self.config.transaction_timeout, |tx| {
                Box::pin(async move {
                    let pvzs = tx.pvz_page(window, page).await?;
                    if pvzs.is_empty() {
                        return Ok((pvzs, Vec::new(), Vec::new()));
                    }

                    let pvz_ids: Vec<Uuid> = pvzs.iter().map(|pvz| pvz.id).collect();
                    let receptions = tx.receptions_of(&pvz_ids, window).await?;

                    let reception_ids: Vec<Uuid> = receptions.iter().map(|r| r.id).collect();
                    let products = if reception_ids.is_empty() {
                        Vec::new()
                    } else {
                        tx.products_of(&reception_ids).await?
                    };

                    Ok((pvzs, receptions, products))
                })
            })
            .await?;

        let listing = assemble(pvzs, receptions, products);
        tracing::debug!(returned = listing.len(), "pvz page assembled");
        Ok(listing)
    }
}

/// Builds the listing tree from flat rows
///
/// Keeps the PVZ order of `pvzs` and the row order of `receptions` and
/// `products` within each parent.
fn assemble(pvzs: Vec<Pvz>, receptions: Vec<Reception>, products: Vec<Product>) -> Vec<ExtendedPvz> {
    let mut products_by_reception: HashMap<Uuid, Vec<Product>> = HashMap::new();
    for product in products {
        products_by_reception
            .entry(product.reception_id)
            .or_default()
            .push(product);
    }

    let mut receptions_by_pvz: HashMap<Uuid, Vec<ExtendedReception>> = HashMap::new();
    for reception in receptions {
        let products = products_by_reception
            .remove(&reception.id)
            .unwrap_or_default();
        receptions_by_pvz
            .entry(reception.pvz_id)
            .or_default()
            .push(ExtendedReception {
                reception,
                products,
            });
    }

    pvzs.into_iter()
        .map(|pvz| {
            let receptions = receptions_by_pvz.remove(&pvz.id).unwrap_or_default();
            ExtendedPvz { pvz, receptions }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::product::ProductType;
    use crate::domain::reception::ReceptionStatus;
    use crate::infrastructure::memory::InMemoryStore;
    use chrono::{Duration, Utc};

    fn service(store: &Arc<InMemoryStore>) -> PvzService<InMemoryStore> {
        PvzService::new(store.clone(), ServiceConfig::default())
    }

    async fn seed_reception(store: &InMemoryStore, pvz_id: Uuid, products: &[ProductType]) -> Uuid {
        let products = products.to_vec();
        with_transaction(store, ServiceConfig::default().transaction_timeout, |tx| {
            Box::pin(async move {
                let reception = tx.create_reception(Uuid::new_v4(), pvz_id).await?;
                for product_type in products {
                    tx.create_product(Uuid::new_v4(), reception.id, product_type)
                        .await?;
                }
                tx.update_reception_status(reception.id, ReceptionStatus::Close)
                    .await?;
                Ok(reception.id)
            })
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn add_pvz_validates_city() {
        let store = Arc::new(InMemoryStore::new());
        let service = service(&store);

        let pvz = service.add_pvz("Казань").await.unwrap();
        assert_eq!(pvz.city, City::Kazan);

        let err = service.add_pvz("Новосибирск").await.unwrap_err();
        assert!(matches!(err, DomainError::IncorrectCity));

        let listed = service.list_pvz(None, PageRequest::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn listing_without_receptions_has_empty_children() {
        let store = Arc::new(InMemoryStore::new());
        let service = service(&store);
        let pvz = service.add_pvz("Москва").await.unwrap();

        let listed = service.list_pvz(None, PageRequest::default()).await.unwrap();

        assert_eq!(listed, vec![ExtendedPvz::empty(pvz)]);
    }

    #[tokio::test]
    async fn listing_nests_products_under_their_reception() {
        let store = Arc::new(InMemoryStore::new());
        let service = service(&store);
        let pvz = service.add_pvz("Москва").await.unwrap();

        let first = seed_reception(&store, pvz.id, &[ProductType::Shoes]).await;
        let second = seed_reception(
            &store,
            pvz.id,
            &[ProductType::Electronics, ProductType::Clothes],
        )
        .await;
        let _empty = seed_reception(&store, pvz.id, &[]).await;

        let listed = service.list_pvz(None, PageRequest::default()).await.unwrap();
        let receptions = &listed[0].receptions;

        assert_eq!(receptions.len(), 3);
        assert_eq!(receptions[0].reception.id, first);
        assert_eq!(receptions[0].products.len(), 1);
        assert_eq!(receptions[1].reception.id, second);
        let types: Vec<ProductType> = receptions[1]
            .products
            .iter()
            .map(|p| p.product_type)
            .collect();
        assert_eq!(types, vec![ProductType::Electronics, ProductType::Clothes]);
        assert!(receptions[2].products.is_empty());
    }

    #[tokio::test]
    async fn pages_are_newest_first_and_disjoint() {
        let store = Arc::new(InMemoryStore::new());
        let service = service(&store);
        let mut created = Vec::new();
        for _ in 0..5 {
            created.push(service.add_pvz("Санкт-Петербург").await.unwrap().id);
        }

        let first = service
            .list_pvz(None, PageRequest::new(1, 2).unwrap())
            .await
            .unwrap();
        let third = service
            .list_pvz(None, PageRequest::new(3, 2).unwrap())
            .await
            .unwrap();
        let beyond = service
            .list_pvz(None, PageRequest::new(4, 2).unwrap())
            .await
            .unwrap();

        let first_ids: Vec<Uuid> = first.iter().map(|e| e.pvz.id).collect();
        assert_eq!(first_ids, vec![created[4], created[3]]);
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].pvz.id, created[0]);
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn date_window_filters_receptions_and_pvzs() {
        let store = Arc::new(InMemoryStore::new());
        let service = service(&store);
        let idle = service.add_pvz("Казань").await.unwrap();
        let busy = service.add_pvz("Москва").await.unwrap();

        let before = Utc::now() - Duration::seconds(1);
        seed_reception(&store, busy.id, &[ProductType::Clothes]).await;
        let after = Utc::now() + Duration::seconds(1);

        let window = DateWindow::new(before, after).unwrap();
        let listed = service
            .list_pvz(Some(window), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].pvz.id, busy.id);
        assert_eq!(listed[0].receptions.len(), 1);

        let past = DateWindow::new(before - Duration::days(2), before - Duration::days(1)).unwrap();
        let listed = service
            .list_pvz(Some(past), PageRequest::default())
            .await
            .unwrap();
        assert!(listed.is_empty());

        let unfiltered = service.list_pvz(None, PageRequest::default()).await.unwrap();
        assert!(unfiltered.iter().any(|e| e.pvz.id == idle.id));
    }
}
