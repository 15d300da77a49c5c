use async_trait::async_trait;
use uuid::Uuid;

use super::postgres_store::{map_sqlx_error, PostgresTransaction};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::{Product, ProductType};
use crate::domain::repositories::ProductRepository;

#[async_trait]
impl ProductRepository for PostgresTransaction {
    async fn create_product(
        &mut self,
        id: Uuid,
        reception_id: Uuid,
        product_type: ProductType,
    ) -> DomainResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO product (id, reception_id, product_type)
            VALUES ($1, $2, $3)
            RETURNING id, added_at AS date_time, product_type, reception_id
            "#,
        )
        .bind(id)
        .bind(reception_id)
        .bind(product_type)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert product", e))
    }

    async fn last_product(&mut self, reception_id: Uuid) -> DomainResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, added_at AS date_time, product_type, reception_id
            FROM product
            WHERE reception_id = $1
            ORDER BY added_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(reception_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to find last product", e))?
        .ok_or(DomainError::EmptyReception)
    }

    async fn delete_product(&mut self, product_id: Uuid) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM product WHERE id = $1
            "#,
        )
        .bind(product_id)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to delete product", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Store(format!(
                "Product not found: {}",
                product_id
            )));
        }

        Ok(())
    }

    async fn products_of(&mut self, reception_ids: &[Uuid]) -> DomainResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, added_at AS date_time, product_type, reception_id
            FROM product
            WHERE reception_id = ANY($1)
            ORDER BY added_at, id
            "#,
        )
        .bind(reception_ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to list products", e))
    }
}
