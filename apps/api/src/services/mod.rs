// Application services
// Each operation runs inside exactly one store transaction

pub mod auth_service;
pub mod product_service;
pub mod pvz_service;
pub mod reception_service;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::product::Product;
use crate::domain::pvz::{DateWindow, ExtendedPvz, PageRequest, Pvz};
use crate::domain::reception::Reception;
use crate::domain::user::{Role, User};

pub use crate::config::ServiceConfig;
pub use auth_service::AuthService;
pub use product_service::ProductService;
pub use pvz_service::PvzService;
pub use reception_service::ReceptionService;

/// PVZ registration and the historical listing
#[async_trait]
pub trait PvzOperations: Send + Sync {
    /// Registers a PVZ in `city`, failing with `IncorrectCity` for unknown cities
    async fn add_pvz(&self, city: &str) -> DomainResult<Pvz>;

    /// One page of PVZs with their receptions and products
    async fn list_pvz(
        &self,
        window: Option<DateWindow>,
        page: PageRequest,
    ) -> DomainResult<Vec<ExtendedPvz>>;
}

/// Reception lifecycle: `open -> close`
#[async_trait]
pub trait ReceptionOperations: Send + Sync {
    async fn open_reception(&self, pvz_id: Uuid) -> DomainResult<Reception>;

    async fn close_last_reception(&self, pvz_id: Uuid) -> DomainResult<Reception>;
}

/// Products within the current reception of a PVZ
#[async_trait]
pub trait ProductOperations: Send + Sync {
    async fn add_product(&self, pvz_id: Uuid, product_type: &str) -> DomainResult<Product>;

    async fn delete_last_product(&self, pvz_id: Uuid) -> DomainResult<()>;
}

/// Registration and token issuance
#[async_trait]
pub trait AuthOperations: Send + Sync {
    async fn register(&self, email: &str, password: &str, role: &str) -> DomainResult<User>;

    /// Returns a bearer token for a registered user
    async fn login(&self, email: &str, password: &str) -> DomainResult<String>;

    /// Returns a bearer token for `role` without any user record
    async fn dummy_login(&self, role: Role) -> DomainResult<String>;
}
