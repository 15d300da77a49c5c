use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::postgres_store::{map_sqlx_error, PostgresTransaction};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pvz::DateWindow;
use crate::domain::reception::{Reception, ReceptionStatus};
use crate::domain::repositories::ReceptionRepository;

#[async_trait]
impl ReceptionRepository for PostgresTransaction {
    async fn create_reception(&mut self, id: Uuid, pvz_id: Uuid) -> DomainResult<Reception> {
        sqlx::query_as::<_, Reception>(
            r#"
            INSERT INTO reception (id, pvz_id)
            VALUES ($1, $2)
            RETURNING id, started_at AS date_time, pvz_id, status
            "#,
        )
        .bind(id)
        .bind(pvz_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert reception", e))
    }

    async fn last_reception(&mut self, pvz_id: Uuid) -> DomainResult<Reception> {
        sqlx::query_as::<_, Reception>(
            r#"
            SELECT id, started_at AS date_time, pvz_id, status
            FROM reception
            WHERE pvz_id = $1
            ORDER BY started_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(pvz_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to find last reception", e))?
        .ok_or(DomainError::ReceptionNotFound)
    }

    async fn update_reception_status(
        &mut self,
        reception_id: Uuid,
        status: ReceptionStatus,
    ) -> DomainResult<Reception> {
        sqlx::query_as::<_, Reception>(
            r#"
            UPDATE reception
            SET status = $2
            WHERE id = $1
            RETURNING id, started_at AS date_time, pvz_id, status
            "#,
        )
        .bind(reception_id)
        .bind(status)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to update reception status", e))?
        .ok_or(DomainError::ReceptionNotFound)
    }

    async fn receptions_of(
        &mut self,
        pvz_ids: &[Uuid],
        window: Option<DateWindow>,
    ) -> DomainResult<Vec<Reception>> {
        let start: Option<DateTime<Utc>> = window.map(|w| w.start());
        let end: Option<DateTime<Utc>> = window.map(|w| w.end());

        sqlx::query_as::<_, Reception>(
            r#"
            SELECT id, started_at AS date_time, pvz_id, status
            FROM reception
            WHERE pvz_id = ANY($1)
              AND ($2::timestamptz IS NULL OR started_at BETWEEN $2 AND $3)
            ORDER BY started_at, id
            "#,
        )
        .bind(pvz_ids)
        .bind(start)
        .bind(end)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to list receptions", e))
    }
}
