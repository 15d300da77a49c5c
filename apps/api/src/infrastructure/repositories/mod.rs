// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces on a Postgres transaction

pub mod postgres_product_repository;
pub mod postgres_pvz_repository;
pub mod postgres_reception_repository;
pub mod postgres_store;
pub mod postgres_user_repository;

pub use postgres_store::{PostgresStore, PostgresTransaction};
