use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::{Store, StoreTransaction};

/// Partial unique index allowing one `in_progress` reception per PVZ
pub const ONE_OPEN_RECEPTION_CONSTRAINT: &str = "reception_one_open_per_pvz";
/// Unique constraint on `users.email`
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_unique";

/// SQLSTATE raised when `statement_timeout` cancels a statement
const QUERY_CANCELED: &str = "57014";
/// SQLSTATE raised when `lock_timeout` gives up on a lock wait
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// PostgreSQL-backed store
///
/// Each transaction runs at the server default isolation (read committed);
/// lifecycle operations serialize per PVZ through `lock_pvz`. The deadline
/// passed to `begin` is installed as the transaction-local
/// `statement_timeout` and `lock_timeout`, so the server cancels a statement
/// the caller has stopped waiting for instead of holding the connection.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgresStore
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PostgresStore {
    type Tx = PostgresTransaction;

    async fn begin(&self, deadline: Duration) -> DomainResult<PostgresTransaction> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Store(format!("Failed to begin transaction: {}", e)))?;

        // 0 would disable the timeouts
        let limit = format!("{}ms", deadline.as_millis().max(1));
        sqlx::query(
            r#"
            SELECT set_config('statement_timeout', $1, true),
                   set_config('lock_timeout', $1, true)
            "#,
        )
        .bind(limit)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to set transaction deadline", e))?;

        Ok(PostgresTransaction { tx })
    }
}

/// In-flight PostgreSQL transaction
///
/// sqlx issues a rollback when the inner transaction is dropped unfinished.
pub struct PostgresTransaction {
    pub(super) tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PostgresTransaction {
    async fn commit(self) -> DomainResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DomainError::Store(format!("Failed to commit transaction: {}", e)))
    }

    async fn rollback(self) -> DomainResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DomainError::Store(format!("Failed to rollback transaction: {}", e)))
    }
}

/// Translates constraint violations and deadline cancellations into domain
/// errors
///
/// Anything not recognised becomes `DomainError::Store` with `context`
/// prefixed.
pub(super) fn map_sqlx_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some(ONE_OPEN_RECEPTION_CONSTRAINT) => return DomainError::ReceptionNotClosed,
            Some(USERS_EMAIL_CONSTRAINT) => return DomainError::EmailAlreadyInUse,
            _ => {}
        }
        if is_deadline_cancellation(db_err.code().as_deref()) {
            return DomainError::QueryCancelled;
        }
    }
    DomainError::Store(format!("{}: {}", context, err))
}

fn is_deadline_cancellation(sqlstate: Option<&str>) -> bool {
    matches!(sqlstate, Some(QUERY_CANCELED) | Some(LOCK_NOT_AVAILABLE))
}
