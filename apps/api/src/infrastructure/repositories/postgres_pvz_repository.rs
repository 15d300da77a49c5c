use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::postgres_store::{map_sqlx_error, PostgresTransaction};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pvz::{City, DateWindow, PageRequest, Pvz};
use crate::domain::repositories::PvzRepository;

#[async_trait]
impl PvzRepository for PostgresTransaction {
    async fn create_pvz(&mut self, id: Uuid, city: City) -> DomainResult<Pvz> {
        sqlx::query_as::<_, Pvz>(
            r#"
            INSERT INTO pvz (id, city)
            VALUES ($1, $2)
            RETURNING id, registration_date, city
            "#,
        )
        .bind(id)
        .bind(city)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert pvz", e))
    }

    async fn lock_pvz(&mut self, pvz_id: Uuid) -> DomainResult<()> {
        sqlx::query(
            r#"
            SELECT id FROM pvz WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(pvz_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to lock pvz", e))?;

        Ok(())
    }

    async fn pvz_page(
        &mut self,
        window: Option<DateWindow>,
        page: PageRequest,
    ) -> DomainResult<Vec<Pvz>> {
        let start: Option<DateTime<Utc>> = window.map(|w| w.start());
        let end: Option<DateTime<Utc>> = window.map(|w| w.end());
        let limit = i64::from(page.limit());
        let offset = i64::try_from(page.offset()).map_err(DomainError::store)?;

        sqlx::query_as::<_, Pvz>(
            r#"
            SELECT p.id, p.registration_date, p.city
            FROM pvz p
            WHERE $1::timestamptz IS NULL
               OR EXISTS (
                    SELECT 1
                    FROM reception r
                    WHERE r.pvz_id = p.id
                      AND r.started_at BETWEEN $1 AND $2
               )
            ORDER BY p.registration_date DESC, p.id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to list pvz page", e))
    }
}
