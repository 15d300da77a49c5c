use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::{Product, ProductType};
use crate::domain::pvz::{City, DateWindow, PageRequest, Pvz};
use crate::domain::reception::{Reception, ReceptionStatus};
use crate::domain::repositories::{
    ProductRepository, PvzRepository, ReceptionRepository, Store, StoreTransaction,
    UserRepository,
};
use crate::domain::user::{Email, User};

#[derive(Debug, Default, Clone)]
struct Tables {
    pvzs: Vec<Pvz>,
    receptions: Vec<Reception>,
    products: Vec<Product>,
    users: Vec<User>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing timestamps, so "last added" is never a tie
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let at = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(at);
        at
    }
}

/// In-process store with the same contract as the Postgres adapter
///
/// Transactions are fully serialized: `begin` waits for the previous
/// transaction to finish, and all writes go to a staged copy that is only
/// published on commit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_rollback: bool,
    rollback_stall: Option<std::time::Duration>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every rollback fail, for exercising the fatal-rollback path
    pub fn with_failing_rollback(mut self) -> Self {
        self.fail_rollback = true;
        self
    }

    /// Makes every rollback hang for `stall` before completing
    pub fn with_stalled_rollback(mut self, stall: std::time::Duration) -> Self {
        self.rollback_stall = Some(stall);
        self
    }
}

#[async_trait]
impl Store for InMemoryStore {
    type Tx = InMemoryTransaction;

    // the caller bounds the lock wait
    async fn begin(&self, _deadline: std::time::Duration) -> DomainResult<InMemoryTransaction> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            staged,
            fail_rollback: self.fail_rollback,
            rollback_stall: self.rollback_stall,
        })
    }
}

/// Transaction over [`InMemoryStore`]; dropping it discards staged writes
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
    fail_rollback: bool,
    rollback_stall: Option<std::time::Duration>,
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn commit(self) -> DomainResult<()> {
        let InMemoryTransaction {
            mut guard, staged, ..
        } = self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self) -> DomainResult<()> {
        if let Some(stall) = self.rollback_stall {
            tokio::time::sleep(stall).await;
        }
        if self.fail_rollback {
            return Err(DomainError::store("injected rollback failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl PvzRepository for InMemoryTransaction {
    async fn create_pvz(&mut self, id: Uuid, city: City) -> DomainResult<Pvz> {
        let pvz = Pvz {
            id,
            registration_date: self.staged.next_timestamp(),
            city,
        };
        self.staged.pvzs.push(pvz.clone());
        Ok(pvz)
    }

    async fn lock_pvz(&mut self, _pvz_id: Uuid) -> DomainResult<()> {
        // the transaction already holds the whole store
        Ok(())
    }

    async fn pvz_page(
        &mut self,
        window: Option<DateWindow>,
        page: PageRequest,
    ) -> DomainResult<Vec<Pvz>> {
        let tables = &self.staged;
        let mut eligible: Vec<Pvz> = tables
            .pvzs
            .iter()
            .filter(|pvz| match window {
                None => true,
                Some(window) => tables
                    .receptions
                    .iter()
                    .any(|r| r.pvz_id == pvz.id && window.contains(r.date_time)),
            })
            .cloned()
            .collect();

        eligible.sort_by(|a, b| {
            b.registration_date
                .cmp(&a.registration_date)
                .then_with(|| a.id.cmp(&b.id))
        });

        let offset = usize::try_from(page.offset()).map_err(DomainError::store)?;
        Ok(eligible
            .into_iter()
            .skip(offset)
            .take(page.limit() as usize)
            .collect())
    }
}

#[async_trait]
impl ReceptionRepository for InMemoryTransaction {
    async fn create_reception(&mut self, id: Uuid, pvz_id: Uuid) -> DomainResult<Reception> {
        if !self.staged.pvzs.iter().any(|p| p.id == pvz_id) {
            return Err(DomainError::Store(format!(
                "foreign key violation: pvz {} does not exist",
                pvz_id
            )));
        }
        if self
            .staged
            .receptions
            .iter()
            .any(|r| r.pvz_id == pvz_id && r.is_open())
        {
            return Err(DomainError::ReceptionNotClosed);
        }

        let reception = Reception {
            id,
            date_time: self.staged.next_timestamp(),
            pvz_id,
            status: ReceptionStatus::InProgress,
        };
        self.staged.receptions.push(reception.clone());
        Ok(reception)
    }

    async fn last_reception(&mut self, pvz_id: Uuid) -> DomainResult<Reception> {
        self.staged
            .receptions
            .iter()
            .filter(|r| r.pvz_id == pvz_id)
            .max_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)))
            .cloned()
            .ok_or(DomainError::ReceptionNotFound)
    }

    async fn update_reception_status(
        &mut self,
        reception_id: Uuid,
        status: ReceptionStatus,
    ) -> DomainResult<Reception> {
        let reception = self
            .staged
            .receptions
            .iter_mut()
            .find(|r| r.id == reception_id)
            .ok_or(DomainError::ReceptionNotFound)?;
        reception.status = status;
        Ok(reception.clone())
    }

    async fn receptions_of(
        &mut self,
        pvz_ids: &[Uuid],
        window: Option<DateWindow>,
    ) -> DomainResult<Vec<Reception>> {
        let wanted: HashSet<&Uuid> = pvz_ids.iter().collect();
        let mut receptions: Vec<Reception> = self
            .staged
            .receptions
            .iter()
            .filter(|r| wanted.contains(&r.pvz_id))
            .filter(|r| window.map_or(true, |w| w.contains(r.date_time)))
            .cloned()
            .collect();
        receptions.sort_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)));
        Ok(receptions)
    }
}

#[async_trait]
impl ProductRepository for InMemoryTransaction {
    async fn create_product(
        &mut self,
        id: Uuid,
        reception_id: Uuid,
        product_type: ProductType,
    ) -> DomainResult<Product> {
        if !self.staged.receptions.iter().any(|r| r.id == reception_id) {
            return Err(DomainError::Store(format!(
                "foreign key violation: reception {} does not exist",
                reception_id
            )));
        }

        let product = Product {
            id,
            date_time: self.staged.next_timestamp(),
            product_type,
            reception_id,
        };
        self.staged.products.push(product.clone());
        Ok(product)
    }

    async fn last_product(&mut self, reception_id: Uuid) -> DomainResult<Product> {
        self.staged
            .products
            .iter()
            .filter(|p| p.reception_id == reception_id)
            .max_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)))
            .cloned()
            .ok_or(DomainError::EmptyReception)
    }

    async fn delete_product(&mut self, product_id: Uuid) -> DomainResult<()> {
        let before = self.staged.products.len();
        self.staged.products.retain(|p| p.id != product_id);
        if self.staged.products.len() == before {
            return Err(DomainError::Store(format!(
                "product not found: {}",
                product_id
            )));
        }
        Ok(())
    }

    async fn products_of(&mut self, reception_ids: &[Uuid]) -> DomainResult<Vec<Product>> {
        let wanted: HashSet<&Uuid> = reception_ids.iter().collect();
        let mut products: Vec<Product> = self
            .staged
            .products
            .iter()
            .filter(|p| wanted.contains(&p.reception_id))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }
}

#[async_trait]
impl UserRepository for InMemoryTransaction {
    async fn create_user(&mut self, user: &User) -> DomainResult<()> {
        if self.staged.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyInUse);
        }
        self.staged.users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&mut self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self.staged.users.iter().find(|u| &u.email == email).cloned())
    }
}
