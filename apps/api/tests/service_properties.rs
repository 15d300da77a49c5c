//! Lifecycle and listing properties checked against the in-memory store
//!
//! These exercise the services through their public traits only, the same
//! way the HTTP handlers do.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pvz_api::domain::errors::DomainError;
use pvz_api::domain::product::ProductType;
use pvz_api::domain::pvz::{City, DateWindow, PageRequest};
use pvz_api::domain::reception::ReceptionStatus;
use pvz_api::infrastructure::memory::InMemoryStore;
use pvz_api::services::{
    ProductOperations, ProductService, PvzOperations, PvzService, ReceptionOperations,
    ReceptionService, ServiceConfig,
};
use uuid::Uuid;

struct Services {
    pvz: Arc<PvzService<InMemoryStore>>,
    receptions: Arc<ReceptionService<InMemoryStore>>,
    products: Arc<ProductService<InMemoryStore>>,
}

fn services() -> Services {
    let store = Arc::new(InMemoryStore::new());
    let config = ServiceConfig::default();
    Services {
        pvz: Arc::new(PvzService::new(store.clone(), config)),
        receptions: Arc::new(ReceptionService::new(store.clone(), config)),
        products: Arc::new(ProductService::new(store, config)),
    }
}

async fn new_pvz(s: &Services) -> Uuid {
    s.pvz.add_pvz("Москва").await.unwrap().id
}

async fn product_ids(s: &Services, pvz_id: Uuid) -> Vec<Uuid> {
    s.pvz
        .list_pvz(None, PageRequest::new(1, 30).unwrap())
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.pvz.id == pvz_id)
        .flat_map(|e| e.receptions)
        .flat_map(|r| r.products)
        .map(|p| p.id)
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_opens_leave_one_open_reception() {
    let s = services();
    let pvz_id = new_pvz(&s).await;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let receptions = s.receptions.clone();
            tokio::spawn(async move { receptions.open_reception(pvz_id).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(reception) => {
                assert_eq!(reception.status, ReceptionStatus::InProgress);
                successes += 1;
            }
            Err(err) => assert!(matches!(err, DomainError::ReceptionNotClosed), "{err}"),
        }
    }
    assert_eq!(successes, 1);

    let listing = s.pvz.list_pvz(None, PageRequest::default()).await.unwrap();
    let open = listing[0]
        .receptions
        .iter()
        .filter(|r| r.reception.is_open())
        .count();
    assert_eq!(open, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_all_land_in_the_open_reception() {
    let s = services();
    let pvz_id = new_pvz(&s).await;
    let reception = s.receptions.open_reception(pvz_id).await.unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let products = s.products.clone();
            tokio::spawn(async move { products.add_product(pvz_id, "одежда").await })
        })
        .collect();

    for handle in handles {
        let product = handle.await.unwrap().unwrap();
        assert_eq!(product.reception_id, reception.id);
    }
    assert_eq!(product_ids(&s, pvz_id).await.len(), 10);
}

#[tokio::test]
async fn close_is_not_idempotent() {
    let s = services();
    let pvz_id = new_pvz(&s).await;
    s.receptions.open_reception(pvz_id).await.unwrap();

    assert!(s.receptions.close_last_reception(pvz_id).await.is_ok());
    assert!(matches!(
        s.receptions.close_last_reception(pvz_id).await,
        Err(DomainError::ReceptionClosed)
    ));
}

#[tokio::test]
async fn add_product_validation_order() {
    let s = services();
    let pvz_id = new_pvz(&s).await;

    // type is validated before the reception state
    assert!(matches!(
        s.products.add_product(pvz_id, "книги").await,
        Err(DomainError::IncorrectProductType)
    ));
    assert!(matches!(
        s.products.add_product(pvz_id, "обувь").await,
        Err(DomainError::ReceptionNotFound)
    ));

    s.receptions.open_reception(pvz_id).await.unwrap();
    s.receptions.close_last_reception(pvz_id).await.unwrap();

    assert!(matches!(
        s.products.add_product(pvz_id, "книги").await,
        Err(DomainError::IncorrectProductType)
    ));
    assert!(matches!(
        s.products.add_product(pvz_id, "обувь").await,
        Err(DomainError::ReceptionClosed)
    ));
}

#[tokio::test]
async fn delete_is_lifo_within_latest_reception() {
    let s = services();
    let pvz_id = new_pvz(&s).await;
    s.receptions.open_reception(pvz_id).await.unwrap();

    let mut added = Vec::new();
    for product_type in ["электроника", "одежда", "обувь"] {
        added.push(s.products.add_product(pvz_id, product_type).await.unwrap().id);
    }

    while let Some(expected_gone) = added.pop() {
        s.products.delete_last_product(pvz_id).await.unwrap();
        let remaining = product_ids(&s, pvz_id).await;
        assert!(!remaining.contains(&expected_gone));
        assert_eq!(remaining, added);
    }

    assert!(matches!(
        s.products.delete_last_product(pvz_id).await,
        Err(DomainError::EmptyReception)
    ));
}

#[tokio::test]
async fn add_pvz_round_trip() {
    let s = services();
    let before = Utc::now();

    let pvz = s.pvz.add_pvz("Санкт-Петербург").await.unwrap();
    let listing = s.pvz.list_pvz(None, PageRequest::default()).await.unwrap();

    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].pvz.id, pvz.id);
    assert_eq!(listing[0].pvz.city, City::SaintPetersburg);
    assert!(listing[0].pvz.registration_date >= before);
    assert!(listing[0].receptions.is_empty());
}

#[tokio::test]
async fn full_scenario() {
    let s = services();
    let pvz_id = new_pvz(&s).await;

    s.receptions.open_reception(pvz_id).await.unwrap();
    assert!(matches!(
        s.receptions.open_reception(pvz_id).await,
        Err(DomainError::ReceptionNotClosed)
    ));

    let first = s.products.add_product(pvz_id, "электроника").await.unwrap();
    let second = s.products.add_product(pvz_id, "обувь").await.unwrap();
    assert_eq!(second.product_type, ProductType::Shoes);

    s.receptions.close_last_reception(pvz_id).await.unwrap();
    assert!(matches!(
        s.products.add_product(pvz_id, "одежда").await,
        Err(DomainError::ReceptionClosed)
    ));

    s.products.delete_last_product(pvz_id).await.unwrap();
    assert_eq!(product_ids(&s, pvz_id).await, vec![first.id]);
}

#[tokio::test]
async fn twelve_pvzs_paginate_ten_then_two() {
    let s = services();
    let mut created = Vec::new();
    for _ in 0..12 {
        created.push(s.pvz.add_pvz("Казань").await.unwrap());
    }

    let page1 = s
        .pvz
        .list_pvz(None, PageRequest::new(1, 10).unwrap())
        .await
        .unwrap();
    let page2 = s
        .pvz
        .list_pvz(None, PageRequest::new(2, 10).unwrap())
        .await
        .unwrap();

    assert_eq!(page1.len(), 10);
    assert_eq!(page2.len(), 2);
    assert!(page1
        .windows(2)
        .all(|w| w[0].pvz.registration_date >= w[1].pvz.registration_date));

    let newest_first: Vec<Uuid> = created.iter().rev().map(|p| p.id).collect();
    let listed: Vec<Uuid> = page1.iter().chain(page2.iter()).map(|e| e.pvz.id).collect();
    assert_eq!(listed, newest_first);
}

#[tokio::test]
async fn date_filter_excludes_pvz_with_reception_outside_window() {
    let s = services();
    let early = new_pvz(&s).await;
    s.receptions.open_reception(early).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let window_start = Utc::now();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let late = new_pvz(&s).await;
    s.receptions.open_reception(late).await.unwrap();
    let window_end = Utc::now() + chrono::Duration::seconds(1);
    let window = DateWindow::new(window_start, window_end).unwrap();

    let filtered = s
        .pvz
        .list_pvz(Some(window), PageRequest::default())
        .await
        .unwrap();
    let filtered: Vec<Uuid> = filtered.iter().map(|e| e.pvz.id).collect();
    assert_eq!(filtered, vec![late]);

    let unfiltered = s.pvz.list_pvz(None, PageRequest::default()).await.unwrap();
    assert!(unfiltered.iter().any(|e| e.pvz.id == early));
}
