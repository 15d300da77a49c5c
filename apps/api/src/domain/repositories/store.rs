use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::time::{self, Instant};

use super::{ProductRepository, PvzRepository, ReceptionRepository, UserRepository};
use crate::domain::errors::{DomainError, DomainResult};

/// Source of transactions
#[async_trait]
pub trait Store: Send + Sync + 'static {
    type Tx: StoreTransaction;

    /// Open a new transaction (read committed or stronger)
    ///
    /// `deadline` is the budget of the whole transaction. Stores that can
    /// enforce it server side must do so, so that an abandoned statement does
    /// not keep running after the caller gave up on it.
    async fn begin(&self, deadline: Duration) -> DomainResult<Self::Tx>;
}

/// One in-flight transaction
///
/// The handle is the repository: every entity repository is implemented on
/// it, so repository calls cannot outlive or straddle transactions.
/// `commit` and `rollback` consume the handle. Dropping an unfinished handle
/// rolls it back.
#[async_trait]
pub trait StoreTransaction:
    PvzRepository + ReceptionRepository + ProductRepository + UserRepository + Send
{
    async fn commit(self) -> DomainResult<()>;

    async fn rollback(self) -> DomainResult<()>;
}

/// Runs `operation` inside a single transaction
///
/// Commits when the operation returns `Ok`. Rolls back when it returns
/// `Err` or the transaction (including `begin`) does not finish within
/// `timeout`; in the latter case the pending query is dropped before the
/// rollback is issued. A statement cancelled by the store's own deadline is
/// reported as `Timeout` as well.
///
/// Rollback and commit get their own `timeout` budget. A rollback that fails
/// or overruns is reported as `RollbackFailed` rather than the original
/// error, since the transaction state is then unknown.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use pvz_api::domain::pvz::City;
/// use pvz_api::domain::repositories::{with_transaction, PvzRepository};
/// use pvz_api::infrastructure::memory::InMemoryStore;
/// use uuid::Uuid;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemoryStore::new();
/// let pvz = with_transaction(&store, Duration::from_secs(1), |tx| {
///     Box::pin(async move { tx.create_pvz(Uuid::new_v4(), City::Kazan).await })
/// })
/// .await
/// .expect("pvz created");
/// assert_eq!(pvz.city, City::Kazan);
/// # }
/// ```
pub async fn with_transaction<S, T, F>(
    store: &S,
    timeout: Duration,
    operation: F,
) -> DomainResult<T>
where
    S: Store,
    T: Send,
    F: for<'t> FnOnce(&'t mut S::Tx) -> BoxFuture<'t, DomainResult<T>> + Send,
{
    let deadline = Instant::now() + timeout;

    let mut tx = match time::timeout_at(deadline, store.begin(timeout)).await {
        Ok(tx) => tx?,
        Err(_) => return Err(DomainError::Timeout(timeout)),
    };

    let outcome = match time::timeout_at(deadline, operation(&mut tx)).await {
        Ok(Err(DomainError::QueryCancelled)) | Err(_) => Err(DomainError::Timeout(timeout)),
        Ok(result) => result,
    };

    match outcome {
        Ok(value) => match time::timeout(timeout, tx.commit()).await {
            Ok(committed) => committed.map(|()| value),
            Err(_) => {
                tracing::error!(?timeout, "transaction commit did not finish in time");
                Err(DomainError::Store(format!(
                    "commit did not finish within {:?}, outcome unknown",
                    timeout
                )))
            }
        },
        Err(err) => {
            let rollback_err = match time::timeout(timeout, tx.rollback()).await {
                Ok(Ok(())) => return Err(err),
                Ok(Err(rollback_err)) => rollback_err.to_string(),
                Err(_) => format!("rollback did not finish within {:?}", timeout),
            };
            tracing::error!(
                error = %rollback_err,
                cause = %err,
                "transaction rollback failed"
            );
            Err(DomainError::RollbackFailed(rollback_err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pvz::{City, PageRequest};
    use crate::infrastructure::memory::InMemoryStore;
    use uuid::Uuid;

    const TIMEOUT: Duration = Duration::from_secs(1);

    async fn pvz_count(store: &InMemoryStore) -> usize {
        with_transaction(store, TIMEOUT, |tx| {
            Box::pin(async move {
                let page = PageRequest::new(1, 30).map_err(DomainError::Store)?;
                Ok(tx.pvz_page(None, page).await?.len())
            })
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn commits_on_success() {
        let store = InMemoryStore::new();

        with_transaction(&store, TIMEOUT, |tx| {
            Box::pin(async move { tx.create_pvz(Uuid::new_v4(), City::Moscow).await })
        })
        .await
        .unwrap();

        assert_eq!(pvz_count(&store).await, 1);
    }

    #[tokio::test]
    async fn rolls_back_on_error() {
        let store = InMemoryStore::new();

        let result: DomainResult<()> = with_transaction(&store, TIMEOUT, |tx| {
            Box::pin(async move {
                tx.create_pvz(Uuid::new_v4(), City::Moscow).await?;
                Err(DomainError::ReceptionNotFound)
            })
        })
        .await;

        assert!(matches!(result, Err(DomainError::ReceptionNotFound)));
        assert_eq!(pvz_count(&store).await, 0);
    }

    #[tokio::test]
    async fn rolls_back_on_timeout() {
        let store = InMemoryStore::new();
        let timeout = Duration::from_millis(20);

        let result: DomainResult<()> = with_transaction(&store, timeout, |tx| {
            Box::pin(async move {
                tx.create_pvz(Uuid::new_v4(), City::Kazan).await?;
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
        })
        .await;

        assert!(matches!(result, Err(DomainError::Timeout(t)) if t == timeout));
        assert_eq!(pvz_count(&store).await, 0);
    }

    #[tokio::test]
    async fn failed_rollback_is_surfaced() {
        let store = InMemoryStore::new().with_failing_rollback();

        let result: DomainResult<()> = with_transaction(&store, TIMEOUT, |_tx| {
            Box::pin(async move { Err(DomainError::ReceptionClosed) })
        })
        .await;

        assert!(matches!(result, Err(DomainError::RollbackFailed(_))));
    }

    #[tokio::test]
    async fn store_side_cancellation_reported_as_timeout() {
        let store = InMemoryStore::new();

        let result: DomainResult<()> = with_transaction(&store, TIMEOUT, |tx| {
            Box::pin(async move {
                tx.create_pvz(Uuid::new_v4(), City::Moscow).await?;
                Err(DomainError::QueryCancelled)
            })
        })
        .await;

        assert!(matches!(result, Err(DomainError::Timeout(t)) if t == TIMEOUT));
        assert_eq!(pvz_count(&store).await, 0);
    }

    #[tokio::test]
    async fn waiting_for_a_busy_store_counts_against_the_deadline() {
        let store = InMemoryStore::new();
        let timeout = Duration::from_millis(50);
        let holder = store.begin(TIMEOUT).await.unwrap();

        let started = Instant::now();
        let result: DomainResult<()> = with_transaction(&store, timeout, |tx| {
            Box::pin(async move { tx.lock_pvz(Uuid::new_v4()).await })
        })
        .await;

        assert!(matches!(result, Err(DomainError::Timeout(t)) if t == timeout));
        assert!(started.elapsed() < Duration::from_secs(1));
        drop(holder);
    }

    #[tokio::test]
    async fn stalled_rollback_is_bounded() {
        let store = InMemoryStore::new().with_stalled_rollback(Duration::from_secs(30));
        let timeout = Duration::from_millis(50);

        let started = Instant::now();
        let result: DomainResult<()> = with_transaction(&store, timeout, |_tx| {
            Box::pin(async move { Err(DomainError::ReceptionClosed) })
        })
        .await;

        assert!(matches!(result, Err(DomainError::RollbackFailed(_))));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
