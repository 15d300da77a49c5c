use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::product::{Product, ProductType};

/// Repository contract for products
#[async_trait]
pub trait ProductRepository: Send {
    /// Insert a product; the store assigns the added timestamp
    async fn create_product(
        &mut self,
        id: Uuid,
        reception_id: Uuid,
        product_type: ProductType,
    ) -> DomainResult<Product>;

    /// Most recently added product of the reception
    ///
    /// Fails with `EmptyReception` if the reception has none.
    async fn last_product(&mut self, reception_id: Uuid) -> DomainResult<Product>;

    /// Delete exactly one product by id
    async fn delete_product(&mut self, product_id: Uuid) -> DomainResult<()>;

    /// Products of the given receptions ordered by added timestamp then id
    async fn products_of(&mut self, reception_ids: &[Uuid]) -> DomainResult<Vec<Product>>;
}
